//! Run configuration
//!
//! Everything the pipeline needs to know is carried in [`Config`], which is
//! passed to [`crate::convert::combine_images_to_pdf`]. Nothing is read from
//! global state.

use std::path::{Path, PathBuf};
use crate::error::{Error, Result};
use crate::pdf::PdfOptions;

/// File name used when no output path is given
pub const DEFAULT_OUTPUT_NAME: &str = "Combined_Documents.pdf";

/// Resolution written into the page geometry, in dots per inch
pub const DEFAULT_RESOLUTION: f32 = 100.0;

/// How each page image is stored inside the PDF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageEncoding {
    /// Raw RGB samples with Flate compression (lossless)
    #[default]
    Flate,
    /// Re-encoded as JPEG (DCTDecode) at the given quality, 1-100
    Jpeg { quality: u8 },
}

/// What to do when an image cannot be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the whole run on the first unreadable image
    #[default]
    Abort,
    /// Log a warning, leave the image out and keep going
    Skip,
}

/// Options for combining a folder of images into a PDF
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder to scan for images (not recursive)
    pub input_dir: PathBuf,
    /// PDF file to write
    pub output_file: PathBuf,
    /// Resolution used to size pages from pixel dimensions
    pub resolution: f32,
    /// Page image storage
    pub encoding: PageEncoding,
    /// Handling of unreadable images
    pub on_error: ErrorPolicy,
    /// Document title written to the PDF info dictionary
    pub title: Option<String>,
    /// Document author written to the PDF info dictionary
    pub author: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let input_dir = PathBuf::from(".");
        let output_file = Self::default_output_for(&input_dir);
        Self {
            input_dir,
            output_file,
            resolution: DEFAULT_RESOLUTION,
            encoding: PageEncoding::default(),
            on_error: ErrorPolicy::default(),
            title: None,
            author: None,
        }
    }
}

impl Config {
    /// Create a config for the given folder and output file, with defaults for the rest
    pub fn new(input_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_file: output_file.into(),
            ..Default::default()
        }
    }

    /// Default output location: `Combined_Documents.pdf` inside the input folder
    pub fn default_output_for(input_dir: &Path) -> PathBuf {
        input_dir.join(DEFAULT_OUTPUT_NAME)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "resolution must be a positive number of dpi, got {}",
                self.resolution
            )));
        }

        if let PageEncoding::Jpeg { quality } = self.encoding {
            if !(1..=100).contains(&quality) {
                return Err(Error::InvalidConfig(format!(
                    "JPEG quality must be between 1 and 100, got {}",
                    quality
                )));
            }
        }

        if self.output_file.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("output file path is empty".to_string()));
        }

        Ok(())
    }

    /// PDF encoder settings derived from this config
    pub fn pdf_options(&self) -> PdfOptions {
        PdfOptions {
            resolution: self.resolution,
            encoding: self.encoding,
            title: self.title.clone(),
            author: self.author.clone(),
        }
    }
}
