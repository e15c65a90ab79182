//! Color specs and pixel compositing
//!
//! Background options arrive as short strings (`white`, `none`, `#RRGGBB`,
//! `#AARRGGBB`). They are resolved once, before any pixel work, into a
//! [`ColorSpec`].

use crate::types::{Result, SheetError};
use image::Rgba;
use std::fmt;
use std::str::FromStr;

/// A resolved background color, or the absence of one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum ColorSpec {
    /// No background: keep the source alpha
    #[default]
    NoColor,
    /// Straight (non-premultiplied) RGBA
    Rgba([u8; 4]),
}

impl ColorSpec {
    pub const WHITE: ColorSpec = ColorSpec::Rgba([255, 255, 255, 255]);
    pub const BLACK: ColorSpec = ColorSpec::Rgba([0, 0, 0, 255]);
    pub const TRANSPARENT: ColorSpec = ColorSpec::Rgba([0, 0, 0, 0]);

    /// The color as a pixel, or `default` for `NoColor`
    pub fn rgba_or(self, default: [u8; 4]) -> Rgba<u8> {
        match self {
            ColorSpec::NoColor => Rgba(default),
            ColorSpec::Rgba(c) => Rgba(c),
        }
    }
}

/// Parse a color spec, returning `fallback` when the input is missing or blank.
///
/// Accepts (case-insensitive, surrounding whitespace ignored):
/// - `white`, `black`, `transparent`
/// - `none` for [`ColorSpec::NoColor`]
/// - `#RRGGBB` / `RRGGBB` (opaque)
/// - `#AARRGGBB` / `AARRGGBB` (alpha first)
pub fn parse_color_spec(spec: Option<&str>, fallback: ColorSpec) -> Result<ColorSpec> {
    let Some(raw) = spec else {
        return Ok(fallback);
    };
    let s = raw.trim();
    if s.is_empty() {
        return Ok(fallback);
    }

    let lower = s.to_ascii_lowercase();
    match lower.as_str() {
        "white" => return Ok(ColorSpec::WHITE),
        "black" => return Ok(ColorSpec::BLACK),
        "transparent" => return Ok(ColorSpec::TRANSPARENT),
        "none" => return Ok(ColorSpec::NoColor),
        _ => {}
    }

    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    parse_hex(hex).ok_or_else(|| SheetError::InvalidColorSpec(raw.to_string()))
}

fn parse_hex(hex: &str) -> Option<ColorSpec> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    let [a, r, g, b] = value.to_be_bytes();
    match hex.len() {
        6 => Some(ColorSpec::Rgba([r, g, b, 255])),
        8 => Some(ColorSpec::Rgba([r, g, b, a])),
        _ => None,
    }
}

impl FromStr for ColorSpec {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        parse_color_spec(Some(s), ColorSpec::NoColor)
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpec::NoColor => f.write_str("none"),
            ColorSpec::Rgba([r, g, b, a]) => write!(f, "#{a:02X}{r:02X}{g:02X}{b:02X}"),
        }
    }
}

impl TryFrom<String> for ColorSpec {
    type Error = SheetError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ColorSpec> for String {
    fn from(color: ColorSpec) -> Self {
        color.to_string()
    }
}

// =============================================================================
// Compositing
// =============================================================================

/// Composite `src` over `dst` (Porter-Duff source-over, straight alpha).
///
/// `coverage` scales the source alpha; 255 means fully covered.
#[inline]
pub fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: u8) {
    let sa = src[3] as f32 / 255.0 * (coverage as f32 / 255.0);
    if sa <= 0.0 {
        return;
    }
    if sa >= 1.0 {
        *dst = src;
        return;
    }

    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }

    let dst_weight = da * (1.0 - sa);
    for c in 0..3 {
        let v = (src[c] as f32 * sa + dst[c] as f32 * dst_weight) / out_a;
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}
