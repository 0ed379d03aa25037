//! Reading back page count, page sizes and document info from a written PDF

use std::path::Path;
use lopdf::{Dictionary, Document, Object};
use crate::error::{Error, Result};

/// Count pages by reading the Count field from the Pages dictionary
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog = doc.catalog()
        .map_err(|_| Error::General("No catalog in trailer".to_string()))?;

    let pages_id = match catalog.get(b"Pages") {
        Ok(Object::Reference(id)) => *id,
        Ok(_) => return Err(Error::General("Pages is not a reference".to_string())),
        Err(_) => return Err(Error::General("No Pages in catalog".to_string())),
    };

    let pages_dict = doc.get_dictionary(pages_id)?;

    match pages_dict.get(b"Count") {
        Ok(Object::Integer(n)) => usize::try_from(*n)
            .map_err(|_| Error::General(format!("Invalid page Count: {}", n))),
        Ok(_) => Err(Error::General("Count is not an integer".to_string())),
        Err(_) => Err(Error::General("No Count in Pages".to_string())),
    }
}

/// PDF metadata
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Document title (if present)
    pub title: Option<String>,
    /// Document author (if present)
    pub author: Option<String>,
    /// Producing application (if present)
    pub producer: Option<String>,
}

fn load_existing(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    Ok(Document::load(path)?)
}

fn info_string(info: &Dictionary, key: &[u8]) -> Option<String> {
    info.get(key)
        .ok()
        .and_then(|obj| obj.as_str().ok())
        .and_then(|bytes| String::from_utf8(bytes.to_vec()).ok())
}

/// Extract metadata from a PDF file
pub fn extract_metadata(path: &Path) -> Result<PdfMetadata> {
    let doc = load_existing(path)?;

    let page_count = count_pages_from_catalog(&doc)?;
    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    let info = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => doc.get_dictionary(*id).ok(),
        Ok(Object::Dictionary(dict)) => Some(dict),
        _ => None,
    };

    Ok(PdfMetadata {
        page_count,
        title: info.and_then(|i| info_string(i, b"Title")),
        author: info.and_then(|i| info_string(i, b"Author")),
        producer: info.and_then(|i| info_string(i, b"Producer")),
    })
}

/// Count the number of pages in a PDF file
///
/// This is a quick operation that reads the Count field from the Pages dictionary.
pub fn count_pages(path: &Path) -> Result<usize> {
    let doc = load_existing(path)?;
    let page_count = count_pages_from_catalog(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(page_count)
}

/// Width and height (in points) of every page, in page order
pub fn page_sizes(path: &Path) -> Result<Vec<(f32, f32)>> {
    let doc = load_existing(path)?;
    let pages = doc.get_pages();

    if pages.is_empty() {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    let mut sizes = Vec::with_capacity(pages.len());
    for page_id in pages.values() {
        let page = doc.get_dictionary(*page_id)?;
        let media_box = page.get(b"MediaBox")?.as_array()?;

        if media_box.len() != 4 {
            return Err(Error::General(format!(
                "MediaBox has {} entries, expected 4",
                media_box.len()
            )));
        }

        let coords = media_box
            .iter()
            .map(|v| v.as_float())
            .collect::<std::result::Result<Vec<f32>, _>>()?;

        sizes.push((coords[2] - coords[0], coords[3] - coords[1]));
    }

    Ok(sizes)
}
