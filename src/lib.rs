//! Images to PDF Library
//!
//! Combines a folder of scanned images into a single multi-page PDF.
//! This library provides functionality to:
//! - Find image files in a folder and order them by the number in their name
//!   (`Image (2).jpg` comes before `Image (10).jpg`)
//! - Load images and flatten them to opaque RGB (transparency becomes white)
//! - Encode the images as pages of one PDF
//! - Read back page counts and sizes from a written PDF
//!
//! # Example
//!
//! ```no_run
//! use images_to_pdf::{combine_images_to_pdf, Config};
//!
//! let config = Config::new("scans", "scans/Combined_Documents.pdf");
//!
//! combine_images_to_pdf(&config).expect("Failed to combine images");
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod layout;
pub mod normalize;
pub mod pdf;
pub mod scan;
pub mod sort_key;

// Re-export commonly used items
pub use config::{Config, ErrorPolicy, PageEncoding};
pub use convert::{combine_images_to_pdf, Outcome, SkippedImage};
pub use error::{Error, Result};
pub use scan::{find_images, ImageEntry};
pub use sort_key::extract_sort_key;
