//! Saturation boost for pastel logos
//!
//! Colors go through hue/saturation/brightness space; only saturation is
//! scaled. Low-saturation colors get an extra lift so pastels print vividly.

use crate::constants::{PASTEL_BOOST, PASTEL_SATURATION};
use image::RgbaImage;
use rayon::prelude::*;

/// Boost saturation by `factor`.
///
/// `factor <= 1.0` returns an identical copy. Alpha is never changed.
pub fn boost_saturation(src: &RgbaImage, factor: f64) -> RgbaImage {
    let (width, height) = src.dimensions();
    if factor <= 1.0 || width == 0 || height == 0 {
        return src.clone();
    }

    let mut out = src.clone();
    let row_len = width as usize * 4;
    let buf: &mut [u8] = &mut out;

    buf.par_chunks_mut(row_len).for_each(|row| {
        for px in row.chunks_exact_mut(4) {
            let [hue, saturation, brightness] = rgb_to_hsb(px[0], px[1], px[2]);

            let mut f = factor;
            if saturation < PASTEL_SATURATION {
                f *= PASTEL_BOOST;
            }
            let boosted = (saturation as f64 * f).min(1.0) as f32;

            let [r, g, b] = hsb_to_rgb(hue, boosted, brightness);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
    });

    out
}

/// Convert RGB to `[hue, saturation, brightness]`, each in `0.0..=1.0`.
pub fn rgb_to_hsb(r: u8, g: u8, b: u8) -> [f32; 3] {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);

    let brightness = cmax as f32 / 255.0;
    let saturation = if cmax != 0 {
        (cmax - cmin) as f32 / cmax as f32
    } else {
        0.0
    };

    if saturation == 0.0 {
        return [0.0, saturation, brightness];
    }

    let span = (cmax - cmin) as f32;
    let red_c = (cmax - r) as f32 / span;
    let green_c = (cmax - g) as f32 / span;
    let blue_c = (cmax - b) as f32 / span;

    let mut hue = if r == cmax {
        blue_c - green_c
    } else if g == cmax {
        2.0 + red_c - blue_c
    } else {
        4.0 + green_c - red_c
    };
    hue /= 6.0;
    if hue < 0.0 {
        hue += 1.0;
    }

    [hue, saturation, brightness]
}

/// Convert hue/saturation/brightness back to RGB.
///
/// Only the fractional part of `hue` is used.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> [u8; 3] {
    let to_byte = |v: f32| (v * 255.0 + 0.5) as u8;

    if saturation == 0.0 {
        let v = to_byte(brightness);
        return [v, v, v];
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match h as u32 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };

    [to_byte(r), to_byte(g), to_byte(b)]
}
