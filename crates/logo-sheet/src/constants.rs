//! Shared constants for sheet composition
//!
//! This module centralizes unit conversions and the magic numbers used
//! throughout preprocessing, rendering and export.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f64 = 72.0 / MM_PER_INCH; // ≈ 2.83465

/// Convert millimeters to pixels at the given resolution.
///
/// Rounds half away from zero; negative lengths clamp to zero.
#[inline]
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    let px = (mm / MM_PER_INCH * dpi as f64).round();
    if px <= 0.0 { 0 } else { px as u32 }
}

/// Convert centimeters to pixels at the given resolution
#[inline]
pub fn cm_to_px(cm: f64, dpi: u32) -> u32 {
    mm_to_px(cm * 10.0, dpi)
}

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

/// Highest accepted output resolution
pub const MAX_DPI: u32 = 2400;

/// Largest page canvas, in pixels (4 bytes each)
pub const MAX_PAGE_PIXELS: u64 = 1 << 30;

// =============================================================================
// Preprocessing
// =============================================================================

/// Default number of alpha-bleed passes
pub const DEFAULT_BLEED_ITERATIONS: u32 = 2;

/// Saturation below which a color counts as pastel and gets an extra lift
pub const PASTEL_SATURATION: f32 = 0.3;

/// Extra saturation multiplier applied to pastel colors
pub const PASTEL_BOOST: f64 = 1.2;

// =============================================================================
// Rendering
// =============================================================================

/// Subsamples per axis when computing antialiased ellipse coverage
pub const MASK_SUBSAMPLES: u32 = 4;

/// Length of crop marks at tile corners (millimeters)
pub const CROP_MARK_LENGTH_MM: f64 = 1.0;

/// Crop mark color (faint black)
pub const CROP_MARK_COLOR: [u8; 4] = [0, 0, 0, 40];

// =============================================================================
// Export
// =============================================================================

/// Name of the page image inside the PDF resources
pub const PDF_IMAGE_NAME: &str = "Im0";
