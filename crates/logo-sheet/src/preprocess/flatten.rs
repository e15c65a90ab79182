//! Flattening onto a solid background

use crate::color::blend_over;
use image::{Rgba, RgbaImage};

/// Composite `src` over a solid `background` fill of the same size.
///
/// With an opaque background the result is fully opaque:
/// `out = src * a + bg * (1 - a)`.
pub fn flatten_on_background(src: &RgbaImage, background: Rgba<u8>) -> RgbaImage {
    let (width, height) = src.dimensions();
    let mut out = RgbaImage::from_pixel(width, height, background);
    for (dst, px) in out.pixels_mut().zip(src.pixels()) {
        blend_over(dst, *px, 255);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_on_white() {
        let src = RgbaImage::from_fn(3, 1, |x, _| match x {
            0 => Rgba([10, 20, 30, 255]),
            1 => Rgba([0, 0, 0, 0]),
            _ => Rgba([0, 0, 0, 51]),
        });
        let out = flatten_on_background(&src, Rgba([255, 255, 255, 255]));

        assert_eq!(*out.get_pixel(0, 0), Rgba([10, 20, 30, 255]));
        assert_eq!(*out.get_pixel(1, 0), Rgba([255, 255, 255, 255]));
        // 20% black over white
        assert_eq!(*out.get_pixel(2, 0), Rgba([204, 204, 204, 255]));
    }

    #[test]
    fn test_flatten_on_translucent_background() {
        let src = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        let bg = Rgba([255, 0, 0, 128]);
        let out = flatten_on_background(&src, bg);
        assert!(out.pixels().all(|p| *p == bg));
    }
}
