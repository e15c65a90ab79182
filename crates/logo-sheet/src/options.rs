use crate::color::ColorSpec;
use crate::constants::{DEFAULT_BLEED_ITERATIONS, MAX_DPI, MAX_PAGE_PIXELS, mm_to_px};
use crate::preprocess::CircleCrop;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete sheet composition configuration
///
/// Every stage receives this struct (or a piece of it) explicitly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetConfig {
    // Page
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub dpi: u32,
    pub margin_mm: f64,
    pub gap_mm: f64,
    pub page_background: ColorSpec,

    // Tiles
    pub shape: TileShape,
    /// Clip circle tiles to an ellipse; when false the full tile square is drawn
    pub mask_circle: bool,
    pub cycle: CyclePolicy,
    pub row_fill: RowFill,
    pub crop_marks: bool,

    // Source preprocessing
    pub source_circle: Option<CircleCrop>,
    pub mirror: Mirror,
    /// Flatten every source onto this color before scaling
    pub logo_background: ColorSpec,
    pub alpha_bleed: bool,
    pub alpha_bleed_iterations: u32,
    /// Saturation factor; values <= 1.0 leave sources untouched
    pub saturation_boost: f64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            dpi: 300,
            margin_mm: 2.0,
            gap_mm: 8.0,
            page_background: ColorSpec::WHITE,
            shape: TileShape::default(),
            mask_circle: true,
            cycle: CyclePolicy::ByRow,
            row_fill: RowFill::Repeat,
            crop_marks: false,
            source_circle: None,
            mirror: Mirror::default(),
            logo_background: ColorSpec::NoColor,
            alpha_bleed: false,
            alpha_bleed_iterations: DEFAULT_BLEED_ITERATIONS,
            saturation_boost: 1.0,
        }
    }
}

impl SheetConfig {
    /// Load configuration from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config = serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SheetError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Page size in millimeters with orientation applied
    pub fn page_dimensions_mm(&self) -> (f64, f64) {
        self.paper_size.dimensions_with_orientation(self.orientation)
    }

    /// Whether sources are bled (flattening takes precedence)
    pub fn bleed_enabled(&self) -> bool {
        self.logo_background == ColorSpec::NoColor && self.alpha_bleed
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 || self.dpi > MAX_DPI {
            return Err(SheetError::Config(format!(
                "DPI must be between 1 and {}, got {}",
                MAX_DPI, self.dpi
            )));
        }

        let (page_w, page_h) = self.page_dimensions_mm();
        if !(page_w.is_finite() && page_h.is_finite() && page_w > 0.0 && page_h > 0.0) {
            return Err(SheetError::Config(format!(
                "Paper dimensions must be positive, got {}x{} mm",
                page_w, page_h
            )));
        }

        let page_pixels = mm_to_px(page_w, self.dpi) as u64 * mm_to_px(page_h, self.dpi) as u64;
        if page_pixels > MAX_PAGE_PIXELS {
            return Err(SheetError::Config(format!(
                "Page of {}x{} mm at {} DPI is too large to render",
                page_w, page_h, self.dpi
            )));
        }

        let (tile_w, tile_h) = self.shape.dimensions_cm();
        if !(tile_w.is_finite() && tile_h.is_finite() && tile_w > 0.0 && tile_h > 0.0) {
            return Err(SheetError::Config(format!(
                "Tile dimensions must be positive, got {}x{} cm",
                tile_w, tile_h
            )));
        }

        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !non_negative(self.margin_mm) || !non_negative(self.gap_mm) {
            return Err(SheetError::Config(
                "Margin and gap must not be negative".to_string(),
            ));
        }

        if !self.saturation_boost.is_finite() {
            return Err(SheetError::Config(
                "Saturation boost must be a finite number".to_string(),
            ));
        }

        Ok(())
    }
}
