//! Sheet composition pipeline
//!
//! Ties the stages together: validate, plan, preprocess, render.
//! The grid is planned before any pixel work so configuration errors
//! surface immediately.

use crate::layout::plan_grid;
use crate::options::SheetConfig;
use crate::preprocess::prepare_source;
use crate::render::render_sheet;
use crate::types::*;
use image::RgbaImage;
use rayon::prelude::*;

/// Compose a full sheet from decoded source images.
///
/// # Arguments
/// * `sources` - Source images in cycle order
/// * `config` - Sheet configuration
///
/// # Errors
/// Returns an error for an invalid configuration, an empty source set, or
/// a tile that does not fit on the page.
pub fn compose_sheet(sources: &[RgbaImage], config: &SheetConfig) -> Result<RgbaImage> {
    config.validate()?;
    if sources.is_empty() {
        return Err(SheetError::EmptySourceSet);
    }

    let plan = plan_grid(config, sources.len())?;
    log::info!(
        "Grid: {} cols x {} rows = {} tiles (cycling through {} source logos)",
        plan.cols,
        plan.rows,
        plan.tile_count(),
        sources.len()
    );
    log::debug!(
        "Page {}x{}px, tile {}x{}px, origin ({}, {})",
        plan.page_width_px,
        plan.page_height_px,
        plan.tile_width_px,
        plan.tile_height_px,
        plan.start_x,
        plan.start_y
    );

    let prepared: Vec<RgbaImage> = sources
        .par_iter()
        .map(|src| prepare_source(src, config))
        .collect();

    render_sheet(&prepared, &plan, config)
}

/// Compose a sheet on the blocking thread pool
pub async fn compose(sources: Vec<RgbaImage>, config: SheetConfig) -> Result<RgbaImage> {
    tokio::task::spawn_blocking(move || compose_sheet(&sources, &config)).await?
}
