//! Source preprocessing
//!
//! Each source image goes through a fixed pipeline before layout:
//! 1. Optional circular crop to a square bounding box
//! 2. Optional horizontal/vertical mirroring
//! 3. Either flattening onto a logo background, or alpha bleeding
//! 4. Optional saturation boost
//!
//! Every step takes a borrowed image and returns a new one.

mod bleed;
mod crop;
mod flatten;
mod mirror;
mod saturation;

pub use bleed::alpha_bleed;
pub use crop::{CircleCrop, CropValue, crop_circle_to_square};
pub use flatten::flatten_on_background;
pub use mirror::mirror_image;
pub use saturation::{boost_saturation, hsb_to_rgb, rgb_to_hsb};

use crate::color::ColorSpec;
use crate::options::SheetConfig;
use image::{Rgba, RgbaImage};

/// Run the full preprocessing pipeline on one source image.
pub fn prepare_source(src: &RgbaImage, config: &SheetConfig) -> RgbaImage {
    let mut image = match &config.source_circle {
        Some(circle) => crop_circle_to_square(src, circle),
        None => src.clone(),
    };

    if config.mirror.any() {
        log::debug!(
            "Mirroring source (horizontal: {}, vertical: {})",
            config.mirror.horizontal,
            config.mirror.vertical
        );
        image = mirror_image(&image, config.mirror);
    }

    match config.logo_background {
        ColorSpec::Rgba(bg) => {
            log::debug!("Flattening source onto {}", config.logo_background);
            image = flatten_on_background(&image, Rgba(bg));
        }
        ColorSpec::NoColor if config.alpha_bleed => {
            log::debug!(
                "Bleeding source edges ({} iterations)",
                config.alpha_bleed_iterations
            );
            image = alpha_bleed(&image, config.alpha_bleed_iterations);
        }
        ColorSpec::NoColor => {}
    }

    if config.saturation_boost > 1.0 {
        log::debug!("Boosting saturation by {}", config.saturation_boost);
        image = boost_saturation(&image, config.saturation_boost);
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mirror;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 20) as u8, (y * 20) as u8, 90, if x == 0 { 0 } else { 255 }])
        })
    }

    #[test]
    fn test_default_pipeline_is_identity() {
        let src = gradient(6, 4);
        let out = prepare_source(&src, &SheetConfig::default());
        assert_eq!(out, src);
    }

    #[test]
    fn test_crop_then_mirror() {
        let src = gradient(10, 10);
        let config = SheetConfig {
            source_circle: Some("5,5,2".parse().unwrap()),
            mirror: Mirror {
                horizontal: true,
                vertical: false,
            },
            ..Default::default()
        };
        let out = prepare_source(&src, &config);
        assert_eq!(out.dimensions(), (4, 4));
        // Crop starts at x=3, so after flipping the left column is source x=6
        assert_eq!(out.get_pixel(0, 0), src.get_pixel(6, 3));
    }

    #[test]
    fn test_oversized_source_circle_keeps_whole_image() {
        let src = gradient(10, 10);
        let config = SheetConfig {
            source_circle: Some("50%,50%,1e30%".parse().unwrap()),
            ..Default::default()
        };
        assert_eq!(prepare_source(&src, &config), src);
    }

    #[test]
    fn test_flatten_wins_over_bleed() {
        let src = gradient(4, 4);
        let config = SheetConfig {
            logo_background: ColorSpec::WHITE,
            alpha_bleed: true,
            ..Default::default()
        };
        let out = prepare_source(&src, &config);
        assert!(out.pixels().all(|p| p[3] == 255));
        // Fully transparent column became pure background
        assert_eq!(*out.get_pixel(0, 2), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_bleed_keeps_alpha() {
        let src = gradient(4, 4);
        let config = SheetConfig {
            alpha_bleed: true,
            ..Default::default()
        };
        let out = prepare_source(&src, &config);
        for (a, b) in src.pixels().zip(out.pixels()) {
            assert_eq!(a[3], b[3]);
        }
        // Transparent column borrowed its neighbour's color
        assert_eq!(out.get_pixel(0, 1)[0], 20);
    }
}
