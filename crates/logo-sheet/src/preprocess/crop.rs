//! Circular sub-region extraction
//!
//! A circle is given as `cx,cy,r`, each component either absolute pixels
//! (`512`) or a percentage of the smaller source dimension (`42%`).
//! The crop keeps the circle's square bounding box; masking happens later
//! at render time.

use crate::types::{Result, SheetError};
use image::RgbaImage;
use std::fmt;
use std::str::FromStr;

/// One component of a circle spec
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropValue {
    /// Absolute pixel value
    Pixels(i64),
    /// Percentage of `min(width, height)`
    Percent(f64),
}

impl CropValue {
    /// Resolve to pixels for a source whose smaller side is `min_dim`.
    ///
    /// Results are clamped to the `i32` range.
    pub fn resolve(self, min_dim: u32) -> i64 {
        let limit = i32::MAX as i64;
        match self {
            CropValue::Pixels(px) => px.clamp(-limit, limit),
            CropValue::Percent(p) => {
                ((p / 100.0 * min_dim as f64).round() as i64).clamp(-limit, limit)
            }
        }
    }
}

impl FromStr for CropValue {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let invalid = || SheetError::InvalidCropSpec(s.to_string());
        match token.strip_suffix('%') {
            Some(percent) => {
                let p: f64 = percent.trim().parse().map_err(|_| invalid())?;
                if !p.is_finite() {
                    return Err(invalid());
                }
                Ok(CropValue::Percent(p))
            }
            None => token
                .parse::<i32>()
                .map(|px| CropValue::Pixels(px as i64))
                .map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for CropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropValue::Pixels(px) => write!(f, "{}", px),
            CropValue::Percent(p) => write!(f, "{}%", p),
        }
    }
}

/// Circle to extract from every source before tiling
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct CircleCrop {
    pub cx: CropValue,
    pub cy: CropValue,
    pub radius: CropValue,
}

impl CircleCrop {
    /// Square bounding box `(x, y, side)` of the circle, clamped into a
    /// `width` x `height` image. The box shrinks instead of overflowing and
    /// is never empty.
    pub fn bounds(&self, width: u32, height: u32) -> (u32, u32, u32) {
        let min_dim = width.min(height);
        let cx = self.cx.resolve(min_dim);
        let cy = self.cy.resolve(min_dim);
        let r = self.radius.resolve(min_dim);

        let max_x = (width as i64 - 1).max(0);
        let max_y = (height as i64 - 1).max(0);
        let x = cx.saturating_sub(r).clamp(0, max_x);
        let y = cy.saturating_sub(r).clamp(0, max_y);

        let mut side = r.saturating_mul(2).max(1);
        if x + side > width as i64 {
            side = width as i64 - x;
        }
        if y + side > height as i64 {
            side = height as i64 - y;
        }

        (x as u32, y as u32, side.max(1) as u32)
    }
}

impl FromStr for CircleCrop {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').collect();
        let [cx, cy, r] = parts.as_slice() else {
            return Err(SheetError::InvalidCropSpec(s.to_string()));
        };
        let component = |token: &str| {
            token
                .parse::<CropValue>()
                .map_err(|_| SheetError::InvalidCropSpec(s.to_string()))
        };
        Ok(CircleCrop {
            cx: component(*cx)?,
            cy: component(*cy)?,
            radius: component(*r)?,
        })
    }
}

impl fmt::Display for CircleCrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.cx, self.cy, self.radius)
    }
}

impl TryFrom<String> for CircleCrop {
    type Error = SheetError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CircleCrop> for String {
    fn from(crop: CircleCrop) -> Self {
        crop.to_string()
    }
}

/// Crop the square bounding box of `circle` out of `src`.
pub fn crop_circle_to_square(src: &RgbaImage, circle: &CircleCrop) -> RgbaImage {
    let (width, height) = src.dimensions();
    if width == 0 || height == 0 {
        return src.clone();
    }

    let (x, y, side) = circle.bounds(width, height);
    let wanted = circle.radius.resolve(width.min(height)).saturating_mul(2);
    if (side as i64) < wanted {
        log::warn!(
            "Source circle {} exceeds the {}x{} image, cropping {}px square instead",
            circle,
            width,
            height,
            side
        );
    }

    image::imageops::crop_imm(src, x, y, side, side).to_image()
}
