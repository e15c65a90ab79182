//! Horizontal / vertical mirroring

use crate::types::Mirror;
use image::RgbaImage;
use rayon::prelude::*;

/// Mirror `src` according to `mirror`.
///
/// Pixel `(x, y)` moves to `(w-1-x, y)`, `(x, h-1-y)` or both; alpha is
/// carried along. Both flags together amount to a 180° rotation.
pub fn mirror_image(src: &RgbaImage, mirror: Mirror) -> RgbaImage {
    let (width, height) = src.dimensions();
    if !mirror.any() || width == 0 || height == 0 {
        return src.clone();
    }

    let mut out = RgbaImage::new(width, height);
    let row_len = width as usize * 4;
    let buf: &mut [u8] = &mut out;

    buf.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            let src_y = if mirror.vertical { height - 1 - y } else { y };
            for x in 0..width {
                let src_x = if mirror.horizontal { width - 1 - x } else { x };
                let i = x as usize * 4;
                row[i..i + 4].copy_from_slice(&src.get_pixel(src_x, src_y).0);
            }
        });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(5, 3, |x, y| Rgba([x as u8, y as u8, (x * y) as u8, 100 + x as u8]))
    }

    const H: Mirror = Mirror {
        horizontal: true,
        vertical: false,
    };
    const V: Mirror = Mirror {
        horizontal: false,
        vertical: true,
    };
    const BOTH: Mirror = Mirror {
        horizontal: true,
        vertical: true,
    };

    #[test]
    fn test_horizontal_flip() {
        let src = sample();
        let out = mirror_image(&src, H);
        assert_eq!(out.get_pixel(0, 1), src.get_pixel(4, 1));
        assert_eq!(out.get_pixel(4, 2), src.get_pixel(0, 2));
    }

    #[test]
    fn test_vertical_flip() {
        let src = sample();
        let out = mirror_image(&src, V);
        assert_eq!(out.get_pixel(3, 0), src.get_pixel(3, 2));
    }

    #[test]
    fn test_mirror_twice_is_identity() {
        let src = sample();
        for flags in [H, V, BOTH] {
            assert_eq!(mirror_image(&mirror_image(&src, flags), flags), src);
        }
    }

    #[test]
    fn test_both_is_half_turn() {
        let src = sample();
        let out = mirror_image(&src, BOTH);
        assert_eq!(out, image::imageops::rotate180(&src));
    }

    #[test]
    fn test_no_flags_is_copy() {
        let src = sample();
        assert_eq!(mirror_image(&src, Mirror::default()), src);
    }
}
