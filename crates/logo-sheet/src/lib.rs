pub mod color;
mod compose;
pub mod constants;
pub mod export;
pub mod layout;
mod options;
pub mod preprocess;
pub mod render;
mod stats;
mod types;

pub use color::{ColorSpec, parse_color_spec};
pub use compose::{compose, compose_sheet};
pub use constants::{cm_to_px, mm_to_pt, mm_to_px};
pub use export::{OutputKind, load_image, load_images, save_pdf, save_raster, save_sheet};
pub use layout::{GridPlan, GridPosition, SourcePicker, assign_sources, plan_grid};
pub use options::*;
pub use preprocess::{CircleCrop, CropValue, prepare_source};
pub use render::render_sheet;
pub use stats::calculate_statistics;
pub use types::*;
