//! Sheet rendering
//!
//! Every tile is composited independently: scale the assigned source,
//! center it in the tile, and blend it through the tile's clip region.

use crate::color::blend_over;
use crate::layout::{GridPlan, PixelRect, assign_sources};
use crate::options::SheetConfig;
use crate::types::{Result, TileShape};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use rayon::prelude::*;

use super::clip::ClipRegion;
use super::marks::draw_crop_marks;

// =============================================================================
// Public API
// =============================================================================

/// Render all tiles of `plan` onto a fresh page canvas.
///
/// `sources` must already be preprocessed. The canvas starts filled with the
/// page background (`none` gives a transparent page).
///
/// # Arguments
/// * `sources` - Prepared source images, indexed by the cycle policy
/// * `plan` - Grid computed by [`crate::plan_grid`]
/// * `config` - Sheet configuration (background, shape, masking, cycle, marks)
pub fn render_sheet(
    sources: &[RgbaImage],
    plan: &GridPlan,
    config: &SheetConfig,
) -> Result<RgbaImage> {
    let assignments = assign_sources(plan, config.cycle, sources.len())?;

    let background = config.page_background.rgba_or([0, 0, 0, 0]);
    let mut canvas = RgbaImage::from_pixel(plan.page_width_px, plan.page_height_px, background);

    let clip = ClipRegion::for_tile(
        config.shape,
        config.mask_circle,
        plan.tile_width_px,
        plan.tile_height_px,
    );

    // Tiles share one size, so each referenced source is scaled once
    let mut used = vec![false; sources.len()];
    for &index in &assignments {
        used[index] = true;
    }
    let scaled: Vec<Option<RgbaImage>> = sources
        .par_iter()
        .zip(used.into_par_iter())
        .map(|(src, used)| {
            if used {
                scale_to_tile(src, plan.tile_width_px, plan.tile_height_px, config.shape)
            } else {
                None
            }
        })
        .collect();

    for (pos, &index) in plan.positions().zip(&assignments) {
        match &scaled[index] {
            Some(tile) => draw_tile(&mut canvas, tile, plan.tile_rect(pos), &clip),
            None => log::warn!(
                "Source {} is empty, leaving tile ({}, {}) blank",
                index,
                pos.row,
                pos.col
            ),
        }
    }

    if config.crop_marks {
        draw_crop_marks(&mut canvas, plan, config.dpi);
    }

    Ok(canvas)
}

/// Scale `src` for a `tile_width` x `tile_height` tile.
///
/// Rect tiles letterbox (the whole source fits), circle tiles fill (the
/// shorter source side matches the diameter). Returns `None` for an empty
/// source.
pub fn scale_to_tile(
    src: &RgbaImage,
    tile_width: u32,
    tile_height: u32,
    shape: TileShape,
) -> Option<RgbaImage> {
    let (width, height) = src.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let scale = match shape {
        TileShape::Circle { .. } => tile_width as f64 / width.min(height) as f64,
        TileShape::Rect { .. } => {
            (tile_width as f64 / width as f64).min(tile_height as f64 / height as f64)
        }
    };

    let draw_width = ((width as f64 * scale).round() as u32).max(1);
    let draw_height = ((height as f64 * scale).round() as u32).max(1);

    if (draw_width, draw_height) == (width, height) {
        return Some(src.clone());
    }

    log::debug!(
        "Scaling source {}x{} -> {}x{}",
        width,
        height,
        draw_width,
        draw_height
    );
    Some(imageops::resize(
        src,
        draw_width,
        draw_height,
        FilterType::CatmullRom,
    ))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Blend `tile` centered in `rect`, restricted to the rect and the clip.
fn draw_tile(canvas: &mut RgbaImage, tile: &RgbaImage, rect: PixelRect, clip: &ClipRegion) {
    let (canvas_width, canvas_height) = canvas.dimensions();
    let (draw_width, draw_height) = tile.dimensions();

    // Offset of the scaled image relative to the tile's top-left corner;
    // negative when the image overflows the tile
    let offset_x = (rect.width as i64 - draw_width as i64) / 2;
    let offset_y = (rect.height as i64 - draw_height as i64) / 2;

    for ty in 0..rect.height {
        let y = rect.y + ty;
        let sy = ty as i64 - offset_y;
        if y >= canvas_height || sy < 0 || sy >= draw_height as i64 {
            continue;
        }
        for tx in 0..rect.width {
            let x = rect.x + tx;
            let sx = tx as i64 - offset_x;
            if x >= canvas_width || sx < 0 || sx >= draw_width as i64 {
                continue;
            }
            let coverage = clip.coverage(tx, ty);
            if coverage == 0 {
                continue;
            }
            let src = *tile.get_pixel(sx as u32, sy as u32);
            blend_over(canvas.get_pixel_mut(x, y), src, coverage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorSpec;
    use crate::types::CyclePolicy;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn plan(cols: u32, rows: u32) -> GridPlan {
        GridPlan {
            page_width_px: 100,
            page_height_px: 60,
            tile_width_px: 20,
            tile_height_px: 20,
            cols,
            rows,
            start_x: 10,
            start_y: 10,
            gap_px: 10,
            margin_px: 5,
        }
    }

    fn rect_config() -> SheetConfig {
        SheetConfig {
            shape: TileShape::Rect {
                width_cm: 2.0,
                height_cm: 2.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_scale_rect_letterboxes() {
        let src = RgbaImage::from_pixel(200, 100, RED);
        let shape = TileShape::Rect {
            width_cm: 4.0,
            height_cm: 4.0,
        };
        let out = scale_to_tile(&src, 40, 40, shape).unwrap();
        assert_eq!(out.dimensions(), (40, 20));
    }

    #[test]
    fn test_scale_circle_fills() {
        let src = RgbaImage::from_pixel(200, 100, RED);
        let out = scale_to_tile(&src, 40, 40, TileShape::default()).unwrap();
        assert_eq!(out.dimensions(), (80, 40));
    }

    #[test]
    fn test_scale_never_collapses() {
        let src = RgbaImage::from_pixel(1000, 1, RED);
        let shape = TileShape::Rect {
            width_cm: 1.0,
            height_cm: 1.0,
        };
        let out = scale_to_tile(&src, 10, 10, shape).unwrap();
        assert_eq!(out.dimensions(), (10, 1));

        assert!(scale_to_tile(&RgbaImage::new(0, 5), 10, 10, shape).is_none());
    }

    #[test]
    fn test_render_rect_tiles_and_background() {
        let sources = vec![RgbaImage::from_pixel(20, 20, RED)];
        let canvas = render_sheet(&sources, &plan(2, 1), &rect_config()).unwrap();

        assert_eq!(canvas.dimensions(), (100, 60));
        assert_eq!(*canvas.get_pixel(10, 10), RED);
        assert_eq!(*canvas.get_pixel(29, 29), RED);
        assert_eq!(*canvas.get_pixel(40, 10), RED);
        // Gap, margin and area below the block keep the background
        assert_eq!(*canvas.get_pixel(35, 15), WHITE);
        assert_eq!(*canvas.get_pixel(0, 0), WHITE);
        assert_eq!(*canvas.get_pixel(15, 45), WHITE);
    }

    #[test]
    fn test_render_by_row_cycles_sources() {
        let sources = vec![
            RgbaImage::from_pixel(20, 20, RED),
            RgbaImage::from_pixel(20, 20, BLUE),
        ];
        let config = SheetConfig {
            cycle: CyclePolicy::ByRow,
            ..rect_config()
        };
        let canvas = render_sheet(&sources, &plan(2, 2), &config).unwrap();
        assert_eq!(*canvas.get_pixel(15, 15), RED);
        assert_eq!(*canvas.get_pixel(45, 15), RED);
        assert_eq!(*canvas.get_pixel(15, 45), BLUE);
        assert_eq!(*canvas.get_pixel(45, 45), BLUE);
    }

    #[test]
    fn test_render_circle_mask() {
        let sources = vec![RgbaImage::from_pixel(20, 20, RED)];
        let canvas = render_sheet(&sources, &plan(1, 1), &SheetConfig::default()).unwrap();
        // Center is source, tile corner stays background
        assert_eq!(*canvas.get_pixel(20, 20), RED);
        assert_eq!(*canvas.get_pixel(10, 10), WHITE);

        let unmasked = SheetConfig {
            mask_circle: false,
            ..Default::default()
        };
        let canvas = render_sheet(&sources, &plan(1, 1), &unmasked).unwrap();
        assert_eq!(*canvas.get_pixel(10, 10), RED);
    }

    #[test]
    fn test_render_transparent_page() {
        let sources = vec![RgbaImage::from_pixel(20, 20, RED)];
        let config = SheetConfig {
            page_background: ColorSpec::NoColor,
            ..rect_config()
        };
        let canvas = render_sheet(&sources, &plan(1, 1), &config).unwrap();
        assert_eq!(canvas.get_pixel(0, 0)[3], 0);
        assert_eq!(*canvas.get_pixel(15, 15), RED);
    }

    #[test]
    fn test_render_circle_overflow_is_clipped_to_tile() {
        // Wide source overflows the circle tile horizontally
        let sources = vec![RgbaImage::from_pixel(40, 20, BLUE)];
        let unmasked = SheetConfig {
            mask_circle: false,
            ..Default::default()
        };
        let canvas = render_sheet(&sources, &plan(1, 1), &unmasked).unwrap();
        assert_eq!(*canvas.get_pixel(10, 15), BLUE);
        assert_eq!(*canvas.get_pixel(29, 15), BLUE);
        assert_eq!(*canvas.get_pixel(9, 15), WHITE);
        assert_eq!(*canvas.get_pixel(30, 15), WHITE);
    }
}
