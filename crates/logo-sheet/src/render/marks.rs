//! Crop marks
//!
//! Short L-shaped guides drawn just outside every tile corner so tiles can
//! be cut out by hand. Marks are faint and blended over whatever is below.

use crate::color::blend_over;
use crate::constants::{CROP_MARK_COLOR, CROP_MARK_LENGTH_MM, mm_to_px};
use crate::layout::{GridPlan, PixelRect};
use image::{Rgba, RgbaImage};

/// Draw crop marks at the four corners of every tile in `plan`.
pub fn draw_crop_marks(canvas: &mut RgbaImage, plan: &GridPlan, dpi: u32) {
    let len = mm_to_px(CROP_MARK_LENGTH_MM, dpi).max(1) as i64;
    let color = Rgba(CROP_MARK_COLOR);

    for pos in plan.positions() {
        let rect = plan.tile_rect(pos);
        for (cx, cy, dir_x, dir_y) in corners(&rect) {
            // Horizontal arm, then vertical arm, both pointing away from the tile
            for i in 1..=len {
                put(canvas, cx + dir_x * i, cy, color);
                put(canvas, cx, cy + dir_y * i, color);
            }
        }
    }
}

/// Corner pixels of `rect` with the outward direction on each axis
fn corners(rect: &PixelRect) -> [(i64, i64, i64, i64); 4] {
    let left = rect.x as i64;
    let top = rect.y as i64;
    let right = rect.right() as i64 - 1;
    let bottom = rect.bottom() as i64 - 1;
    [
        (left, top, -1, -1),
        (right, top, 1, -1),
        (left, bottom, -1, 1),
        (right, bottom, 1, 1),
    ]
}

fn put(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
        return;
    }
    blend_over(canvas.get_pixel_mut(x as u32, y as u32), color, 255);
}
