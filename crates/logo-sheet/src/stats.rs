use crate::layout::{assign_sources, plan_grid};
use crate::options::SheetConfig;
use crate::types::*;

/// Calculate sheet statistics without touching any pixels
pub fn calculate_statistics(config: &SheetConfig, source_count: usize) -> Result<SheetStatistics> {
    config.validate()?;
    let plan = plan_grid(config, source_count)?;
    let assignments = assign_sources(&plan, config.cycle, source_count)?;

    let mut tiles_per_source = vec![0; source_count];
    for index in assignments {
        tiles_per_source[index] += 1;
    }

    Ok(SheetStatistics {
        page_px: (plan.page_width_px, plan.page_height_px),
        tile_px: (plan.tile_width_px, plan.tile_height_px),
        cols: plan.cols,
        rows: plan.rows,
        tiles: plan.tile_count(),
        sources: source_count,
        tiles_per_source,
    })
}
