//! Single-page PDF export
//!
//! The rendered canvas becomes one Flate-compressed image XObject drawn
//! over the whole page. Transparency is carried by a grayscale soft mask.

use crate::constants::{PDF_IMAGE_NAME, mm_to_pt};
use crate::types::*;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::RgbaImage;
use lopdf::{Dictionary, Document, Object, Stream};
use std::io::Write;
use std::path::Path;

/// Write `canvas` as a one-page PDF of `page_size_mm` (width, height).
pub async fn save_pdf(
    canvas: RgbaImage,
    path: impl AsRef<Path>,
    page_size_mm: (f64, f64),
) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut doc = build_pdf(&canvas, page_size_mm)?;
        let mut writer = Vec::new();
        doc.save_to(&mut writer)
            .map_err(|e| SheetError::Embed(format!("Failed to write PDF: {}", e)))?;
        Ok::<_, SheetError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| SheetError::Embed(format!("Failed to write {}: {}", path.display(), e)))?;
    Ok(())
}

/// Build the in-memory document for `canvas`.
///
/// The image keeps its aspect ratio and is centered on the page; at the
/// matching DPI it covers the page exactly.
pub fn build_pdf(canvas: &RgbaImage, page_size_mm: (f64, f64)) -> Result<Document> {
    let (img_width, img_height) = canvas.dimensions();
    if img_width == 0 || img_height == 0 {
        return Err(SheetError::Embed("Canvas is empty".to_string()));
    }

    let page_width_pt = mm_to_pt(page_size_mm.0);
    let page_height_pt = mm_to_pt(page_size_mm.1);

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    // ===== Image XObject =====
    let mut image_dict = image_dictionary(img_width, img_height, "DeviceRGB");
    let has_alpha = canvas.pixels().any(|p| p[3] < 255);
    if has_alpha {
        let alpha: Vec<u8> = canvas.pixels().map(|p| p[3]).collect();
        let mask = Stream::new(
            image_dictionary(img_width, img_height, "DeviceGray"),
            deflate(&alpha)?,
        )
        .with_compression(false);
        let mask_id = doc.add_object(mask);
        image_dict.set("SMask", Object::Reference(mask_id));
    }

    let rgb: Vec<u8> = canvas
        .pixels()
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();
    let image_id =
        doc.add_object(Stream::new(image_dict, deflate(&rgb)?).with_compression(false));

    // ===== Page =====
    let scale = (page_width_pt / img_width as f64).min(page_height_pt / img_height as f64);
    let draw_width = img_width as f64 * scale;
    let draw_height = img_height as f64 * scale;
    let x = (page_width_pt - draw_width) / 2.0;
    let y = (page_height_pt - draw_height) / 2.0;

    let content = format!(
        "q {:.4} 0 0 {:.4} {:.4} {:.4} cm /{} Do Q\n",
        draw_width, draw_height, x, y, PDF_IMAGE_NAME
    );
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut xobjects = Dictionary::new();
    xobjects.set(PDF_IMAGE_NAME, Object::Reference(image_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page_width_pt as f32),
            Object::Real(page_height_pt as f32),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));
    let page_id = doc.add_object(page_dict);

    // ===== Page tree and catalog =====
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

fn image_dictionary(width: u32, height: u32, color_space: &str) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(width as i64)),
        ("Height", Object::Integer(height as i64)),
        ("ColorSpace", Object::Name(color_space.as_bytes().to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(b"FlateDecode".to_vec())),
    ])
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
