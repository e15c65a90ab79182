//! Grid layout calculation
//!
//! This module turns the physical sheet description into a pixel grid:
//! page size, tile size, how many columns and rows fit, and the offsets
//! that center the tile block inside the margins.

use crate::constants::{cm_to_px, mm_to_px};
use crate::options::SheetConfig;
use crate::types::{Result, RowFill, SheetError, TileShape};

use super::GridPlan;

// =============================================================================
// Grid Creation
// =============================================================================

/// Plan the tile grid for `source_count` sources.
///
/// # Errors
/// * `EmptySourceSet` when no sources are given
/// * `NothingFits` when not a single column or row fits in the usable area
pub fn plan_grid(config: &SheetConfig, source_count: usize) -> Result<GridPlan> {
    if source_count == 0 {
        return Err(SheetError::EmptySourceSet);
    }

    let dpi = config.dpi;
    let (page_width_mm, page_height_mm) = config.page_dimensions_mm();
    let page_width_px = mm_to_px(page_width_mm, dpi);
    let page_height_px = mm_to_px(page_height_mm, dpi);

    let (tile_width_px, tile_height_px) = tile_size_px(config.shape, dpi);
    let margin_px = mm_to_px(config.margin_mm, dpi);
    let gap_px = mm_to_px(config.gap_mm, dpi);

    let usable_width = page_width_px as i64 - 2 * margin_px as i64;
    let usable_height = page_height_px as i64 - 2 * margin_px as i64;

    let cols = fit_count(usable_width, tile_width_px, gap_px);
    let max_rows = fit_count(usable_height, tile_height_px, gap_px);
    let rows = match config.row_fill {
        RowFill::Repeat => max_rows,
        RowFill::OnePerSource => max_rows.min(source_count.min(u32::MAX as usize) as u32),
    };

    if cols == 0 || rows == 0 {
        return Err(SheetError::NothingFits {
            tile_width_px,
            tile_height_px,
            usable_width_px: usable_width,
            usable_height_px: usable_height,
        });
    }

    // Both counts fit, so the block never exceeds the usable area
    let block_width = cols * tile_width_px + (cols - 1) * gap_px;
    let block_height = rows * tile_height_px + (rows - 1) * gap_px;
    let start_x = margin_px + (usable_width as u32 - block_width) / 2;
    let start_y = margin_px + (usable_height as u32 - block_height) / 2;

    Ok(GridPlan {
        page_width_px,
        page_height_px,
        tile_width_px,
        tile_height_px,
        cols,
        rows,
        start_x,
        start_y,
        gap_px,
        margin_px,
    })
}

/// Tile size in pixels; circles occupy a square cell.
pub fn tile_size_px(shape: TileShape, dpi: u32) -> (u32, u32) {
    match shape {
        TileShape::Circle { diameter_cm } => {
            let side = cm_to_px(diameter_cm, dpi);
            (side, side)
        }
        TileShape::Rect {
            width_cm,
            height_cm,
        } => (cm_to_px(width_cm, dpi), cm_to_px(height_cm, dpi)),
    }
}

/// How many tiles of `tile` px separated by `gap` px fit into `usable` px.
fn fit_count(usable: i64, tile: u32, gap: u32) -> u32 {
    if usable <= 0 || tile == 0 {
        return 0;
    }
    let step = tile as i64 + gap as i64;
    ((usable + gap as i64) / step).min(u32::MAX as i64) as u32
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridPosition;

    fn circle_config() -> SheetConfig {
        SheetConfig::default()
    }

    fn rect_config() -> SheetConfig {
        SheetConfig {
            shape: TileShape::Rect {
                width_cm: 4.0,
                height_cm: 2.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_circle_grid_a4_300dpi() {
        let plan = plan_grid(&circle_config(), 1).unwrap();

        assert_eq!(plan.page_width_px, 2480);
        assert_eq!(plan.page_height_px, 3508);
        assert_eq!(plan.tile_width_px, 378);
        assert_eq!(plan.tile_height_px, 378);
        assert_eq!(plan.margin_px, 24);
        assert_eq!(plan.gap_px, 94);
        assert_eq!(plan.cols, 5);
        assert_eq!(plan.rows, 7);
        assert_eq!(plan.start_x, 107);
        assert_eq!(plan.start_y, 149);
    }

    #[test]
    fn test_block_fits_inside_margins() {
        for config in [circle_config(), rect_config()] {
            let plan = plan_grid(&config, 3).unwrap();
            assert!(plan.cols >= 1 && plan.rows >= 1);
            assert!(plan.start_x >= plan.margin_px);
            assert!(plan.start_y >= plan.margin_px);
            assert!(plan.block_width() <= plan.usable_width());
            assert!(plan.block_height() <= plan.usable_height());
            assert!(plan.start_x + plan.block_width() <= plan.page_width_px - plan.margin_px);
            assert!(plan.start_y + plan.block_height() <= plan.page_height_px - plan.margin_px);
        }
    }

    #[test]
    fn test_rect_grid() {
        let plan = plan_grid(&rect_config(), 1).unwrap();
        assert_eq!((plan.tile_width_px, plan.tile_height_px), (472, 236));
        assert_eq!(plan.cols, 4);
        assert_eq!(plan.rows, 10);
        assert_eq!(plan.start_x, 155);
        assert_eq!(plan.start_y, 151);
    }

    #[test]
    fn test_tile_origin() {
        let plan = plan_grid(&circle_config(), 1).unwrap();
        assert_eq!(plan.tile_origin(GridPosition::new(0, 0)), (107, 149));
        assert_eq!(plan.tile_origin(GridPosition::new(2, 1)), (107 + 472, 149 + 2 * 472));
    }

    #[test]
    fn test_one_row_per_source_caps_rows() {
        let config = SheetConfig {
            row_fill: RowFill::OnePerSource,
            ..circle_config()
        };
        assert_eq!(plan_grid(&config, 3).unwrap().rows, 3);
        // More sources than rows: extra sources are ignored
        assert_eq!(plan_grid(&config, 20).unwrap().rows, 7);
        // Repeat fills every row regardless of source count
        assert_eq!(plan_grid(&circle_config(), 3).unwrap().rows, 7);
    }

    #[test]
    fn test_nothing_fits() {
        let config = SheetConfig {
            shape: TileShape::Circle { diameter_cm: 25.0 },
            ..Default::default()
        };
        assert!(matches!(
            plan_grid(&config, 1),
            Err(SheetError::NothingFits { .. })
        ));

        let config = SheetConfig {
            margin_mm: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            plan_grid(&config, 1),
            Err(SheetError::NothingFits { .. })
        ));
    }

    #[test]
    fn test_empty_source_set() {
        assert!(matches!(
            plan_grid(&circle_config(), 0),
            Err(SheetError::EmptySourceSet)
        ));
    }

    #[test]
    fn test_positions_row_major() {
        let plan = plan_grid(&circle_config(), 1).unwrap();
        let positions: Vec<_> = plan.positions().take(6).collect();
        assert_eq!(positions[0], GridPosition::new(0, 0));
        assert_eq!(positions[4], GridPosition::new(0, 4));
        assert_eq!(positions[5], GridPosition::new(1, 0));
        assert_eq!(plan.positions().count(), plan.tile_count());
    }
}
