//! Multi-page PDF encoding of RGB images using lopdf
//!
//! Each image gets its own page, sized so the image fills it exactly at the
//! configured resolution. Page order follows the slice order.

use std::path::Path;
use chrono::{DateTime, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, info};
use crate::config::{PageEncoding, DEFAULT_RESOLUTION};
use crate::error::{Error, Result};
use crate::layout::PageDimensions;

/// Options for encoding images into a PDF
#[derive(Debug, Clone)]
pub struct PdfOptions {
    /// Resolution (dpi) used to turn pixel sizes into page sizes
    pub resolution: f32,
    /// How page images are stored
    pub encoding: PageEncoding,
    /// Document title (info dictionary)
    pub title: Option<String>,
    /// Document author (info dictionary)
    pub author: Option<String>,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            encoding: PageEncoding::Flate,
            title: None,
            author: None,
        }
    }
}

/// Write `images` as a multi-page PDF at `output`
///
/// Page 1 is the first image, and so on. The document is assembled in memory
/// and written with a single save. Returns the number of pages written.
///
/// # Example
///
/// ```no_run
/// use images_to_pdf::pdf::{write_pdf, PdfOptions};
/// use image::{Rgb, RgbImage};
/// use std::path::Path;
///
/// let pages = vec![RgbImage::from_pixel(850, 1100, Rgb([255, 255, 255]))];
/// write_pdf(&pages, Path::new("out.pdf"), &PdfOptions::default())
///     .expect("Failed to write PDF");
/// ```
pub fn write_pdf(images: &[RgbImage], output: &Path, options: &PdfOptions) -> Result<usize> {
    let mut doc = build_document(images, options)?;

    doc.compress();
    doc.save(output)?;

    info!("Wrote {} pages to {}", images.len(), output.display());

    Ok(images.len())
}

/// Assemble the PDF document in memory without saving it
pub fn build_document(images: &[RgbImage], options: &PdfOptions) -> Result<Document> {
    if images.is_empty() {
        return Err(Error::General("No images to encode".to_string()));
    }

    let mut doc = Document::with_version("1.5");

    // Reserve the Pages id up front so every page can point at its parent
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(images.len());
    for (index, img) in images.iter().enumerate() {
        let page_id = add_image_page(&mut doc, pages_id, img, options)?;
        debug!(
            "Page {}: {}x{} px as object {:?}",
            index + 1,
            img.width(),
            img.height(),
            page_id
        );
        kids.push(Object::Reference(page_id));
    }

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(kids.len() as i64));
    pages_object.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(pages_object));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);

    let info_id = doc.add_object(info_dictionary(options, Utc::now()));

    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    Ok(doc)
}

/// Add one page showing `img` full-bleed
fn add_image_page(
    doc: &mut Document,
    pages_id: ObjectId,
    img: &RgbImage,
    options: &PdfOptions,
) -> Result<ObjectId> {
    let image_id = doc.add_object(image_xobject(img, options.encoding)?);

    let [_, _, width, height] =
        PageDimensions::for_image(img.width(), img.height(), options.resolution).media_box();

    // Image space is the unit square, so scale it up to the page
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0.0f32.into(),
                    0.0f32.into(),
                    height.into(),
                    0.0f32.into(),
                    0.0f32.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

    let mut xobjects = Dictionary::new();
    xobjects.set("Im0", Object::Reference(image_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let mut page = Dictionary::new();
    page.set("Type", Object::Name(b"Page".to_vec()));
    page.set("Parent", Object::Reference(pages_id));
    page.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            width.into(),
            height.into(),
        ]),
    );
    page.set("Contents", Object::Reference(content_id));
    page.set("Resources", Object::Dictionary(resources));

    Ok(doc.add_object(page))
}

/// Build the Image XObject stream for one page
fn image_xobject(img: &RgbImage, encoding: PageEncoding) -> Result<Stream> {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(img.width() as i64));
    dict.set("Height", Object::Integer(img.height() as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));

    match encoding {
        // Flate is applied by Document::compress before saving
        PageEncoding::Flate => Ok(Stream::new(dict, img.as_raw().clone())),
        PageEncoding::Jpeg { quality } => {
            let mut jpeg = Vec::new();
            JpegEncoder::new_with_quality(&mut jpeg, quality).encode_image(img)?;
            dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
            Ok(Stream::new(dict, jpeg).with_compression(false))
        }
    }
}

/// Document info dictionary: producer, timestamps and optional title/author
fn info_dictionary(options: &PdfOptions, now: DateTime<Utc>) -> Dictionary {
    let mut info = Dictionary::new();
    info.set(
        "Producer",
        Object::string_literal(format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))),
    );

    let date = pdf_date(now);
    info.set("CreationDate", Object::string_literal(date.clone()));
    info.set("ModDate", Object::string_literal(date));

    if let Some(title) = &options.title {
        info.set("Title", Object::string_literal(title.clone()));
    }
    if let Some(author) = &options.author {
        info.set("Author", Object::string_literal(author.clone()));
    }

    info
}

/// Format a timestamp as a PDF date string, e.g. `D:20260118093000Z`
fn pdf_date(time: DateTime<Utc>) -> String {
    time.format("D:%Y%m%d%H%M%SZ").to_string()
}
