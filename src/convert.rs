//! The folder → PDF pipeline
//!
//! `combine_images_to_pdf` runs every stage in order: scan, sort, load,
//! normalize, encode. The binary calls the stages separately so it can print
//! the file list before the (slow) decoding starts.

use std::path::PathBuf;
use image::RgbImage;
use tracing::{info, warn};
use crate::config::{Config, ErrorPolicy};
use crate::error::{Error, Result};
use crate::normalize::load_rgb;
use crate::pdf::write_pdf;
use crate::scan::{find_images, ImageEntry};

/// An image left out of the PDF under [`ErrorPolicy::Skip`]
#[derive(Debug, Clone)]
pub struct SkippedImage {
    pub entry: ImageEntry,
    pub reason: String,
}

/// Result of a run
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The folder held no recognized images; nothing was written
    NoImages,
    /// The PDF was written
    Created {
        output: PathBuf,
        /// Images in page order
        pages: Vec<ImageEntry>,
        skipped: Vec<SkippedImage>,
    },
}

/// Normalized images ready for encoding
#[derive(Debug, Default)]
pub struct LoadedImages {
    pub images: Vec<RgbImage>,
    /// Entries matching `images`, one-to-one
    pub included: Vec<ImageEntry>,
    pub skipped: Vec<SkippedImage>,
}

/// Load and normalize every entry, in order
///
/// Under [`ErrorPolicy::Abort`] the first unreadable image ends the run.
pub fn load_all(entries: &[ImageEntry], policy: ErrorPolicy) -> Result<LoadedImages> {
    let mut loaded = LoadedImages::default();

    for entry in entries {
        match load_rgb(&entry.path) {
            Ok(img) => {
                loaded.images.push(img);
                loaded.included.push(entry.clone());
            }
            Err(e) if policy == ErrorPolicy::Skip => {
                warn!("Skipping {}: {}", entry.name, e);
                loaded.skipped.push(SkippedImage {
                    entry: entry.clone(),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(loaded)
}

/// Load, normalize and encode already-scanned entries
///
/// `entries` must be non-empty and in page order.
pub fn write_images(config: &Config, entries: &[ImageEntry]) -> Result<Outcome> {
    if entries.is_empty() {
        return Err(Error::General("No input files provided".to_string()));
    }

    let loaded = load_all(entries, config.on_error)?;
    if loaded.images.is_empty() {
        return Err(Error::NoReadableImages(config.input_dir.clone()));
    }

    write_pdf(&loaded.images, &config.output_file, &config.pdf_options())?;

    Ok(Outcome::Created {
        output: config.output_file.clone(),
        pages: loaded.included,
        skipped: loaded.skipped,
    })
}

/// Combine all images in `config.input_dir` into one PDF at `config.output_file`
///
/// An empty folder is not an error: it yields [`Outcome::NoImages`] and no
/// file is created.
///
/// # Example
///
/// ```no_run
/// use images_to_pdf::{combine_images_to_pdf, Config, Outcome};
///
/// let config = Config::new("scans", "scans/Combined_Documents.pdf");
/// match combine_images_to_pdf(&config).expect("Failed to combine images") {
///     Outcome::NoImages => println!("nothing to do"),
///     Outcome::Created { pages, .. } => println!("{} pages", pages.len()),
/// }
/// ```
pub fn combine_images_to_pdf(config: &Config) -> Result<Outcome> {
    config.validate()?;

    let entries = find_images(&config.input_dir)?;
    if entries.is_empty() {
        info!("No images found in {}", config.input_dir.display());
        return Ok(Outcome::NoImages);
    }

    info!(
        "Combining {} images from {}",
        entries.len(),
        config.input_dir.display()
    );

    write_images(config, &entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;
    use tempfile::TempDir;

    fn save_png(dir: &std::path::Path, name: &str) -> ImageEntry {
        let path = dir.join(name);
        RgbImage::from_pixel(8, 8, Rgb([1, 2, 3])).save(&path).unwrap();
        ImageEntry::from_path(path)
    }

    fn save_garbage(dir: &std::path::Path, name: &str) -> ImageEntry {
        let path = dir.join(name);
        fs::write(&path, b"garbage").unwrap();
        ImageEntry::from_path(path)
    }

    #[test]
    fn test_load_all_abort_on_error() {
        let dir = TempDir::new().unwrap();
        let entries = vec![
            save_png(dir.path(), "a (1).png"),
            save_garbage(dir.path(), "b (2).png"),
            save_png(dir.path(), "c (3).png"),
        ];

        let result = load_all(&entries, ErrorPolicy::Abort);
        assert!(matches!(result, Err(Error::Image { .. })));
    }

    #[test]
    fn test_load_all_skip_on_error() {
        let dir = TempDir::new().unwrap();
        let entries = vec![
            save_png(dir.path(), "a (1).png"),
            save_garbage(dir.path(), "b (2).png"),
            save_png(dir.path(), "c (3).png"),
        ];

        let loaded = load_all(&entries, ErrorPolicy::Skip).unwrap();
        assert_eq!(loaded.images.len(), 2);
        assert_eq!(loaded.included.len(), 2);
        assert_eq!(loaded.included[1].name, "c (3).png");
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].entry.name, "b (2).png");
    }

    #[test]
    fn test_write_images_all_skipped() {
        let dir = TempDir::new().unwrap();
        let entries = vec![save_garbage(dir.path(), "only.png")];
        let config = Config {
            on_error: ErrorPolicy::Skip,
            ..Config::new(dir.path(), dir.path().join("out.pdf"))
        };

        let result = write_images(&config, &entries);
        assert!(matches!(result, Err(Error::NoReadableImages(_))));
        assert!(!dir.path().join("out.pdf").exists());
    }

    #[test]
    fn test_write_images_empty_entries() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path(), dir.path().join("out.pdf"));
        assert!(write_images(&config, &[]).is_err());
    }

    #[test]
    fn test_combine_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            resolution: -1.0,
            ..Config::new(dir.path(), dir.path().join("out.pdf"))
        };
        assert!(matches!(combine_images_to_pdf(&config), Err(Error::InvalidConfig(_))));
    }
}
