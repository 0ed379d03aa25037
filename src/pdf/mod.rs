//! PDF output and inspection module

pub mod encode;
pub mod metadata;

// Re-export commonly used items
pub use encode::{build_document, write_pdf, PdfOptions};
pub use metadata::{count_pages, extract_metadata, page_sizes, PdfMetadata};
