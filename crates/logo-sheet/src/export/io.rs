//! Image file I/O
//!
//! Decoding and encoding are CPU-bound, so they run on the blocking pool
//! while the file system access stays async.

use crate::types::*;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Load one image, converted to RGBA8
pub async fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let image = tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes)
            .map(|decoded| decoded.to_rgba8())
            .map_err(|source| SheetError::Decode { path, source })
    })
    .await??;
    Ok(image)
}

/// Load multiple images, preserving order
pub async fn load_images(paths: &[impl AsRef<Path>]) -> Result<Vec<RgbaImage>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let image = load_image(path).await?;
        log::debug!(
            "Loaded {} ({}x{})",
            path.as_ref().display(),
            image.width(),
            image.height()
        );
        images.push(image);
    }
    Ok(images)
}

/// Encode `canvas` in the format implied by the extension of `path`.
///
/// Fully opaque canvases are written without an alpha channel.
pub async fn save_raster(canvas: RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let encode_path = path.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        let encode_error = |source| SheetError::Encode {
            path: encode_path.clone(),
            source,
        };
        let format = ImageFormat::from_path(&encode_path).map_err(encode_error)?;
        let image = to_output_image(canvas, format);

        let mut writer = Cursor::new(Vec::new());
        image.write_to(&mut writer, format).map_err(encode_error)?;
        Ok::<_, SheetError>(writer.into_inner())
    })
    .await??;
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| SheetError::Encode {
            path: path.clone(),
            source: image::ImageError::IoError(e),
        })?;
    Ok(())
}

fn to_output_image(canvas: RgbaImage, format: ImageFormat) -> DynamicImage {
    let opaque = canvas.pixels().all(|p| p[3] == 255);
    if opaque {
        return DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8());
    }
    if format == ImageFormat::Jpeg {
        log::warn!("JPEG has no alpha channel, transparency is dropped");
        return DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8());
    }
    DynamicImage::ImageRgba8(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_opaque_canvas_drops_alpha() {
        let canvas = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
        let out = to_output_image(canvas, ImageFormat::Png);
        assert!(matches!(out, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn test_transparent_canvas_keeps_alpha() {
        let canvas = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 0]));
        let out = to_output_image(canvas.clone(), ImageFormat::Png);
        assert!(matches!(out, DynamicImage::ImageRgba8(_)));

        let jpeg = to_output_image(canvas, ImageFormat::Jpeg);
        assert!(matches!(jpeg, DynamicImage::ImageRgb8(_)));
    }
}
