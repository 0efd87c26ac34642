//! Multi-page PDF assembly from JPEG page bands.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use crate::error::CaptureError;
use crate::page::{PageGeometry, mm_to_pt};

/// One encoded page image.
pub(crate) struct PageBand {
    pub jpeg: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

const IMAGE_NAME: &str = "Im0";

/// Assemble one page per band. Each band is scaled to the printable width
/// and anchored at the top margin.
pub(crate) fn assemble(
    bands: Vec<PageBand>,
    geometry: &PageGeometry,
    title: &str,
) -> Result<Vec<u8>, CaptureError> {
    let (page_w, page_h) = geometry.format().size_pt();
    let margin = mm_to_pt(geometry.margin_mm());
    let printable_w = page_w - 2.0 * margin;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(bands.len());

    for band in bands {
        let draw_w = printable_w;
        let draw_h = band.height_px as f32 * printable_w / band.width_px as f32;
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(band.width_px),
                "Height" => i64::from(band.height_px),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8i64,
                "Filter" => "DCTDecode",
            },
            band.jpeg,
        )
        .with_compression(false);
        let image_id = doc.add_object(image);

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(draw_w),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(draw_h),
                        Object::Real(margin),
                        Object::Real(page_h - margin - draw_h),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content
            .encode()
            .map_err(|err| CaptureError::Assemble(err.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page_w),
                Object::Real(page_h),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { IMAGE_NAME => image_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let info_id = info(&mut doc, title);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|err| CaptureError::Assemble(err.to_string()))?;
    Ok(bytes)
}

fn info(doc: &mut Document, title: &str) -> ObjectId {
    let created = Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
    doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal(concat!("archdoc ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(created),
    })
}
