//! Loading sources and writing the finished sheet
//!
//! The output format follows the file extension: `.pdf` embeds the canvas
//! as a single full-page image, anything else goes through the `image`
//! crate's encoders.

mod io;
mod pdf;

pub use io::{load_image, load_images, save_raster};
pub use pdf::{build_pdf, save_pdf};

use crate::options::SheetConfig;
use crate::types::Result;
use image::RgbaImage;
use std::path::Path;

/// Output container chosen from the destination path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Single-page PDF sized to the paper
    Pdf,
    /// Raster image (PNG, JPEG, ...) at the canvas resolution
    Raster,
}

impl OutputKind {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let is_pdf = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            OutputKind::Pdf
        } else {
            OutputKind::Raster
        }
    }
}

/// Write `canvas` to `path` in the format implied by its extension.
///
/// PDF pages take their size from `config`'s paper and orientation.
pub async fn save_sheet(
    canvas: RgbaImage,
    path: impl AsRef<Path>,
    config: &SheetConfig,
) -> Result<OutputKind> {
    let path = path.as_ref();
    let kind = OutputKind::from_path(path);
    match kind {
        OutputKind::Pdf => save_pdf(canvas, path, config.page_dimensions_mm()).await?,
        OutputKind::Raster => save_raster(canvas, path).await?,
    }
    log::info!("Wrote {}", path.display());
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_kind_from_extension() {
        assert_eq!(OutputKind::from_path("sheet.pdf"), OutputKind::Pdf);
        assert_eq!(OutputKind::from_path("out/SHEET.PDF"), OutputKind::Pdf);
        assert_eq!(OutputKind::from_path("sheet.png"), OutputKind::Raster);
        assert_eq!(OutputKind::from_path("sheet.pdf.jpg"), OutputKind::Raster);
        assert_eq!(OutputKind::from_path("sheet"), OutputKind::Raster);
    }
}
