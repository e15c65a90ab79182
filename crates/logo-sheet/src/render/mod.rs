//! Sheet rasterization
//!
//! This module paints the planned grid onto a page-sized canvas:
//! - Clip regions (rectangle or antialiased ellipse)
//! - Scaling sources to the tile size
//! - Compositing every tile
//! - Optional crop marks at tile corners

mod clip;
mod marks;
mod page;

pub use clip::ClipRegion;
pub use marks::draw_crop_marks;
pub use page::{render_sheet, scale_to_tile};
