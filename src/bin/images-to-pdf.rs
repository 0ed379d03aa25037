//! Images to PDF CLI tool
//!
//! A command-line tool for combining a folder of numbered scans into one PDF.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use images_to_pdf::convert::write_images;
use images_to_pdf::pdf::count_pages;
use images_to_pdf::{find_images, Config, ErrorPolicy, ImageEntry, Outcome, PageEncoding, SkippedImage};

/// Images to PDF - Combine numbered scans into a single PDF
#[derive(Parser)]
#[command(name = "images-to-pdf")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Combine the scans in the current folder into Combined_Documents.pdf
    images-to-pdf

    # Combine a folder into a specific file
    images-to-pdf ~/Scans -o receipts.pdf

    # Smaller output with JPEG pages, skipping unreadable files
    images-to-pdf ~/Scans -o receipts.pdf --jpeg-quality 80 --skip-unreadable")]
struct Cli {
    /// Folder containing the images (not searched recursively)
    #[arg(default_value = ".")]
    input_dir: PathBuf,

    /// Output PDF file path [default: <INPUT_DIR>/Combined_Documents.pdf]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Resolution in dpi used to size pages from image pixels
    #[arg(long, default_value_t = images_to_pdf::config::DEFAULT_RESOLUTION)]
    resolution: f32,

    /// Store pages as JPEG at this quality (1-100) instead of lossless Flate.
    /// Lossless pages of photographic scans are typically several times larger.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: Option<u8>,

    /// Warn about and leave out images that cannot be read instead of stopping
    #[arg(long)]
    skip_unreadable: bool,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Document author
    #[arg(long)]
    author: Option<String>,

    /// Open the output file after creation
    #[arg(long)]
    open: bool,

    /// Enable debug logs
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Config {
    let output_file = cli
        .output
        .clone()
        .unwrap_or_else(|| Config::default_output_for(&cli.input_dir));

    Config {
        resolution: cli.resolution,
        encoding: match cli.jpeg_quality {
            Some(quality) => PageEncoding::Jpeg { quality },
            None => PageEncoding::Flate,
        },
        on_error: if cli.skip_unreadable {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Abort
        },
        title: cli.title.clone(),
        author: cli.author.clone(),
        ..Config::new(cli.input_dir.clone(), output_file)
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli);
    config.validate()?;

    let entries = find_images(&config.input_dir)
        .with_context(|| format!("Failed to scan {}", config.input_dir.display()))?;

    let mut stdout = io::stdout().lock();

    if entries.is_empty() {
        report_no_images(&mut stdout)?;
        return Ok(());
    }

    report_found(&mut stdout, &entries)?;

    let outcome = write_images(&config, &entries)
        .with_context(|| format!("Failed to create {}", config.output_file.display()))?;

    if let Outcome::Created { output, skipped, .. } = outcome {
        let page_count = count_pages(&output)
            .with_context(|| format!("Failed to read back {}", output.display()))?;

        report_created(&mut stdout, &output, page_count, &skipped)?;

        if cli.open {
            open_file(&output)?;
        }
    }

    Ok(())
}

fn report_no_images(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "No image files found in the folder.")
}

/// List the images in page order, numbered from 1
fn report_found(out: &mut impl Write, entries: &[ImageEntry]) -> io::Result<()> {
    writeln!(out, "Found {} images:", entries.len())?;
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, entry.name)?;
    }
    Ok(())
}

fn report_created(
    out: &mut impl Write,
    output: &Path,
    page_count: usize,
    skipped: &[SkippedImage],
) -> io::Result<()> {
    for skip in skipped {
        writeln!(out, "Skipped {}: {}", skip.entry.name, skip.reason)?;
    }
    writeln!(out, "\nSuccessfully created: {}", output.display())?;
    writeln!(out, "PDF contains {} pages", page_count)
}

/// Open a file with the system default application
fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}
