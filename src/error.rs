//! Error types for the images-to-pdf library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the images-to-pdf library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An input image could not be opened or decoded
    #[error("Failed to read image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Re-encoding a page image failed
    #[error("Failed to encode page image: {0}")]
    Encode(#[from] image::ImageError),

    /// Input folder missing or not a directory
    #[error("Input folder not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Every image in the folder was skipped
    #[error("None of the images in {} could be read", .0.display())]
    NoReadableImages(PathBuf),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// General error
    #[error("{0}")]
    General(String),
}
