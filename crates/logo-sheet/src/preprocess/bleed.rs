//! Alpha bleeding
//!
//! Fully transparent pixels often carry black RGB. When the image is later
//! resampled, that black leaks into semi-transparent edges as a dark fringe.
//! Bleeding copies the color of the most opaque neighbour into those pixels
//! while leaving their alpha at zero.

use image::RgbaImage;
use rayon::prelude::*;

/// Run `iterations` bleed passes over `src`.
///
/// Alpha is never modified; only the RGB of alpha == 0 pixels changes.
pub fn alpha_bleed(src: &RgbaImage, iterations: u32) -> RgbaImage {
    let mut current = src.clone();
    for _ in 0..iterations {
        current = bleed_pass(&current);
    }
    current
}

fn bleed_pass(current: &RgbaImage) -> RgbaImage {
    let (width, height) = current.dimensions();
    let mut next = RgbaImage::new(width, height);
    if width == 0 || height == 0 {
        return next;
    }

    let row_len = width as usize * 4;
    let buf: &mut [u8] = &mut next;

    buf.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as i64;
            for x in 0..width as i64 {
                let px = current.get_pixel(x as u32, y as u32);
                let i = x as usize * 4;
                if px[3] != 0 {
                    row[i..i + 4].copy_from_slice(&px.0);
                    continue;
                }

                // Strictly greater wins, so the first maximum in scan order is kept
                let mut best = *px;
                let mut best_alpha = 0u8;
                for dy in -1..=1 {
                    let yy = y + dy;
                    if yy < 0 || yy >= height as i64 {
                        continue;
                    }
                    for dx in -1..=1 {
                        let xx = x + dx;
                        if xx < 0 || xx >= width as i64 || (dx == 0 && dy == 0) {
                            continue;
                        }
                        let n = current.get_pixel(xx as u32, yy as u32);
                        if n[3] > best_alpha {
                            best_alpha = n[3];
                            best = *n;
                        }
                    }
                }

                row[i..i + 4].copy_from_slice(&[best[0], best[1], best[2], 0]);
            }
        });

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_opaque_image_is_fixed_point() {
        let src = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8 * 50, y as u8 * 50, 7, 255]));
        assert_eq!(alpha_bleed(&src, 3), src);
    }

    #[test]
    fn test_alpha_channel_untouched() {
        let src = RgbaImage::from_fn(6, 6, |x, y| {
            let a = if (x + y) % 3 == 0 { 0 } else { (x * 40) as u8 };
            Rgba([x as u8, y as u8, 3, a])
        });
        let out = alpha_bleed(&src, 2);
        for (a, b) in src.pixels().zip(out.pixels()) {
            assert_eq!(a[3], b[3]);
            if a[3] != 0 {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_most_opaque_neighbour_wins() {
        let mut src = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 0]));
        src.put_pixel(0, 0, Rgba([10, 10, 10, 100]));
        src.put_pixel(2, 2, Rgba([200, 0, 0, 250]));
        let out = alpha_bleed(&src, 1);
        assert_eq!(*out.get_pixel(1, 1), Rgba([200, 0, 0, 0]));
    }

    #[test]
    fn test_ties_keep_first_in_scan_order() {
        let mut src = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 0]));
        src.put_pixel(2, 0, Rgba([1, 2, 3, 255]));
        src.put_pixel(0, 2, Rgba([9, 9, 9, 255]));
        let out = alpha_bleed(&src, 1);
        // Upper-right neighbour is visited before the lower-left one
        assert_eq!(*out.get_pixel(1, 1), Rgba([1, 2, 3, 0]));
    }

    #[test]
    fn test_color_only_comes_from_visible_pixels() {
        let mut src = RgbaImage::from_pixel(5, 1, Rgba([0, 0, 0, 0]));
        src.put_pixel(0, 0, Rgba([50, 60, 70, 255]));

        let once = alpha_bleed(&src, 1);
        assert_eq!(*once.get_pixel(1, 0), Rgba([50, 60, 70, 0]));
        // Neighbours of x=2 all had alpha 0 in the previous buffer
        assert_eq!(*once.get_pixel(2, 0), Rgba([0, 0, 0, 0]));

        // Bled pixels keep alpha 0, so they never act as a color source
        let twice = alpha_bleed(&src, 2);
        assert_eq!(*twice.get_pixel(2, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*twice.get_pixel(1, 0), Rgba([50, 60, 70, 0]));
    }

    #[test]
    fn test_zero_iterations_is_copy() {
        let src = RgbaImage::from_pixel(2, 2, Rgba([5, 5, 5, 0]));
        assert_eq!(alpha_bleed(&src, 0), src);
    }
}
