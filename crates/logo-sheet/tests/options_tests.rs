use logo_sheet::*;

#[test]
fn test_validation_rejects_zero_dpi() {
    let config = SheetConfig {
        dpi: 0,
        ..Default::default()
    };
    match config.validate() {
        Err(SheetError::Config(msg)) => assert!(msg.contains("DPI")),
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_validation_custom_paper() {
    let mut config = SheetConfig {
        paper_size: PaperSize::Custom {
            width_mm: 100.0,
            height_mm: 150.0,
        },
        ..Default::default()
    };
    assert!(config.validate().is_ok());
    assert_eq!(config.page_dimensions_mm(), (100.0, 150.0));

    config.orientation = Orientation::Landscape;
    assert_eq!(config.page_dimensions_mm(), (150.0, 100.0));

    config.paper_size = PaperSize::Custom {
        width_mm: -1.0,
        height_mm: 150.0,
    };
    assert!(config.validate().is_err());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_config() {
    use tempfile::NamedTempFile;

    let config = SheetConfig {
        paper_size: PaperSize::Letter,
        orientation: Orientation::Landscape,
        dpi: 150,
        page_background: ColorSpec::TRANSPARENT,
        logo_background: ColorSpec::Rgba([10, 20, 30, 255]),
        shape: TileShape::Rect {
            width_cm: 5.0,
            height_cm: 2.5,
        },
        cycle: CyclePolicy::Random { seed: 42 },
        row_fill: RowFill::OnePerSource,
        source_circle: Some("50%,50%,42%".parse().unwrap()),
        mirror: Mirror {
            horizontal: true,
            vertical: false,
        },
        alpha_bleed: true,
        saturation_boost: 1.5,
        crop_marks: true,
        ..Default::default()
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    config.save(path).await.unwrap();
    let loaded = SheetConfig::load(path).await.unwrap();

    assert_eq!(loaded, config);
}

#[cfg(feature = "serde")]
#[test]
fn test_partial_json_uses_defaults() {
    let json = r##"{
        "dpi": 150,
        "page_background": "#00FF00",
        "cycle": { "random": { "seed": 7 } },
        "source_circle": "512,512,450"
    }"##;
    let config: SheetConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.dpi, 150);
    assert_eq!(config.page_background, ColorSpec::Rgba([0, 255, 0, 255]));
    assert_eq!(config.cycle, CyclePolicy::Random { seed: 7 });
    assert_eq!(
        config.source_circle.map(|c| c.radius),
        Some(CropValue::Pixels(450))
    );
    assert_eq!(config.gap_mm, 8.0);
    assert_eq!(config.shape, TileShape::Circle { diameter_cm: 3.2 });
}

#[cfg(feature = "serde")]
#[test]
fn test_invalid_color_in_json_is_rejected() {
    let json = r#"{ "page_background": "teal" }"#;
    assert!(serde_json::from_str::<SheetConfig>(json).is_err());
}
