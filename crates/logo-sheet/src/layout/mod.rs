//! Layout calculation for the tile grid
//!
//! This module handles all the geometric calculations for a sheet:
//! - Physical page and tile sizes converted to pixels
//! - How many columns and rows fit, and where the block is centered
//! - Which source image each tile shows

mod cycle;
mod grid;
mod types;

pub use cycle::*;
pub use grid::*;
pub use types::*;
