//! Per-tile clip regions

use crate::constants::MASK_SUBSAMPLES;
use crate::types::TileShape;

/// Coverage mask applied to every tile
///
/// All tiles share one size, so the mask is computed once per sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipRegion {
    /// Whole tile rectangle, full coverage
    Rect,
    /// Ellipse inscribed in the tile, one coverage byte per pixel
    Ellipse {
        width: u32,
        height: u32,
        coverage: Vec<u8>,
    },
}

impl ClipRegion {
    /// Pick the clip for a `width` x `height` tile of `shape`.
    ///
    /// Circles are clipped to their inscribed ellipse only when `mask_circle`
    /// is set; otherwise the full tile square is drawn.
    pub fn for_tile(shape: TileShape, mask_circle: bool, width: u32, height: u32) -> Self {
        if shape.is_circle() && mask_circle {
            ClipRegion::Ellipse {
                width,
                height,
                coverage: ellipse_coverage(width, height),
            }
        } else {
            ClipRegion::Rect
        }
    }

    /// Coverage (0..=255) at tile-local pixel `(x, y)`
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        match self {
            ClipRegion::Rect => 255,
            ClipRegion::Ellipse {
                width,
                height,
                coverage,
            } => {
                if x >= *width || y >= *height {
                    return 0;
                }
                coverage[(y * width + x) as usize]
            }
        }
    }
}

/// Supersampled coverage of the ellipse inscribed in a `width` x `height` box.
fn ellipse_coverage(width: u32, height: u32) -> Vec<u8> {
    let n = MASK_SUBSAMPLES;
    let samples = (n * n) as f64;
    let rx = width as f64 / 2.0;
    let ry = height as f64 / 2.0;

    let mut coverage = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let mut hits = 0u32;
            for sy in 0..n {
                let py = y as f64 + (sy as f64 + 0.5) / n as f64;
                let dy = (py - ry) / ry;
                for sx in 0..n {
                    let px = x as f64 + (sx as f64 + 0.5) / n as f64;
                    let dx = (px - rx) / rx;
                    if dx * dx + dy * dy <= 1.0 {
                        hits += 1;
                    }
                }
            }
            coverage.push((hits as f64 * 255.0 / samples).round() as u8);
        }
    }
    coverage
}
