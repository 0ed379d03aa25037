//! Image loading and color normalization
//!
//! PDF pages carry no transparency here, so every image is reduced to opaque
//! 8-bit RGB before encoding:
//!
//! - RGBA is composited over an opaque white canvas using its own alpha as the mask
//! - palette images (indexed PNG, GIF) are converted directly, keeping the
//!   palette color even where tRNS marks the entry transparent
//! - any other mode (grayscale, grayscale+alpha, 16-bit, float) is converted directly
//! - RGB8 passes through untouched
//!
//! Transparent regions of true RGBA images always come out white, never black.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage, RgbaImage};
use tracing::debug;
use crate::error::{Error, Result};

/// Open and decode an image file
///
/// The format is sniffed from the file content, so a PNG saved with a `.jpg`
/// extension still decodes.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    decode(path).map(|(img, _)| img)
}

fn decode(path: &Path) -> Result<(DynamicImage, Option<ImageFormat>)> {
    let image_error = |source| Error::Image { path: path.to_path_buf(), source };

    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| image_error(image::ImageError::IoError(e)))?;
    let format = reader.format();
    let img = reader.decode().map_err(image_error)?;

    debug!(
        "Decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    Ok((img, format))
}

/// Convert a decoded image to opaque 8-bit RGB
pub fn to_rgb(img: DynamicImage) -> RgbImage {
    match img {
        DynamicImage::ImageRgb8(rgb) => rgb,
        DynamicImage::ImageRgba8(rgba) => flatten_on_white(&rgba),
        other => {
            let color = other.color();
            if color.has_alpha() && color.has_color() {
                flatten_on_white(&other.to_rgba8())
            } else {
                other.to_rgb8()
            }
        }
    }
}

/// Load an image and normalize it to RGB in one step
///
/// The decoder expands palette images with transparency to RGBA. Those are
/// converted straight to RGB so each pixel keeps its palette color instead of
/// being blended onto white.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let (img, format) = decode(path)?;

    if is_palette_source(path, format) {
        debug!("{} is palette based, dropping alpha", path.display());
        return Ok(img.to_rgb8());
    }

    Ok(to_rgb(img))
}

/// Whether the file stores indexed colors (any GIF, or a PNG with color type 3)
pub fn is_palette_source(path: &Path, format: Option<ImageFormat>) -> bool {
    match format {
        Some(ImageFormat::Gif) => true,
        Some(ImageFormat::Png) => is_indexed_png(path).unwrap_or(false),
        _ => false,
    }
}

fn is_indexed_png(path: &Path) -> Option<bool> {
    let file = File::open(path).ok()?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    let info = decoder.read_header_info().ok()?;
    Some(info.color_type == png::ColorType::Indexed)
}

/// Composite an RGBA image onto opaque white, using alpha as the blend mask
///
/// Each channel is `div255(src * a + 255 * (255 - a))` with rounding, so
/// alpha 255 keeps the source color exactly and alpha 0 gives pure white.
pub fn flatten_on_white(rgba: &RgbaImage) -> RgbImage {
    let mut out = RgbImage::new(rgba.width(), rgba.height());

    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = Rgb([blend_white(r, a), blend_white(g, a), blend_white(b, a)]);
    }

    out
}

#[inline]
fn blend_white(channel: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    let v = channel as u32 * a + 255 * (255 - a);
    div255(v) as u8
}

/// Rounded division by 255 without a divide
#[inline]
fn div255(v: u32) -> u32 {
    let tmp = v + 128;
    ((tmp >> 8) + tmp) >> 8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, LumaA, Rgba};
    use tempfile::TempDir;

    #[test]
    fn test_div255_matches_rounded_division() {
        for v in (0..=255u32 * 255).step_by(7) {
            let expected = (v as f64 / 255.0).round() as u32;
            assert_eq!(div255(v), expected, "v = {}", v);
        }
    }

    #[test]
    fn test_fully_transparent_becomes_white() {
        let rgba = RgbaImage::from_pixel(3, 2, Rgba([12, 200, 7, 0]));
        let rgb = flatten_on_white(&rgba);
        assert_eq!(rgb.dimensions(), (3, 2));
        assert!(rgb.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_fully_opaque_keeps_color() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([12, 200, 7, 255]));
        let rgb = flatten_on_white(&rgba);
        assert!(rgb.pixels().all(|p| p.0 == [12, 200, 7]));
    }

    #[test]
    fn test_half_alpha_blend() {
        let rgba = RgbaImage::from_pixel(1, 1, Rgba([0, 200, 255, 128]));
        let rgb = flatten_on_white(&rgba);
        // 0*128 + 255*127 = 32385 → 127; 200*128 + 255*127 = 57985 → 227
        assert_eq!(rgb.get_pixel(0, 0).0, [127, 227, 255]);
    }

    #[test]
    fn test_mixed_alpha_regions() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([10, 20, 30, 0]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        let rgb = to_rgb(DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(1, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_rgb_passes_through() {
        let rgb = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let out = to_rgb(DynamicImage::ImageRgb8(rgb.clone()));
        assert_eq!(out, rgb);
    }

    #[test]
    fn test_grayscale_converted() {
        let gray = image::GrayImage::from_pixel(2, 2, image::Luma([90]));
        let out = to_rgb(DynamicImage::ImageLuma8(gray));
        assert!(out.pixels().all(|p| p.0 == [90, 90, 90]));
    }

    #[test]
    fn test_gray_alpha_drops_alpha() {
        let la: ImageBuffer<LumaA<u8>, Vec<u8>> = ImageBuffer::from_pixel(1, 1, LumaA([100, 0]));
        let out = to_rgb(DynamicImage::ImageLumaA8(la));
        assert_eq!(out.get_pixel(0, 0).0, [100, 100, 100]);
    }

    #[test]
    fn test_rgba16_flattened_on_white() {
        let rgba16: ImageBuffer<Rgba<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(1, 1, Rgba([65535, 0, 0, 0]));
        let out = to_rgb(DynamicImage::ImageRgba16(rgba16));
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_load_rgb_from_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clear.png");
        RgbaImage::from_pixel(5, 4, Rgba([0, 0, 0, 0])).save(&path).unwrap();

        let rgb = load_rgb(&path).unwrap();
        assert_eq!(rgb.dimensions(), (5, 4));
        assert!(rgb.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    /// 1x1 indexed PNG with a single palette entry and its tRNS alpha
    fn write_indexed_png(path: &Path, color: [u8; 3], alpha: u8) {
        let file = std::fs::File::create(path).unwrap();
        let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), 1, 1);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(color.to_vec());
        encoder.set_trns(vec![alpha]);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0]).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_indexed_png_keeps_palette_color() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("indexed.png");
        write_indexed_png(&path, [200, 10, 10], 0);

        assert!(is_palette_source(&path, Some(ImageFormat::Png)));
        let rgb = load_rgb(&path).unwrap();
        assert_eq!(rgb.get_pixel(0, 0).0, [200, 10, 10]);
    }

    #[test]
    fn test_truecolor_png_is_not_palette() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rgba.png");
        RgbaImage::from_pixel(1, 1, Rgba([200, 10, 10, 0])).save(&path).unwrap();

        assert!(!is_palette_source(&path, Some(ImageFormat::Png)));
        assert_eq!(load_rgb(&path).unwrap().get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_gif_is_palette() {
        assert!(is_palette_source(Path::new("any.gif"), Some(ImageFormat::Gif)));
        assert!(!is_palette_source(Path::new("any.bmp"), Some(ImageFormat::Bmp)));
        assert!(!is_palette_source(Path::new("any"), None));
    }

    #[test]
    fn test_load_corrupt_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = load_image(&path);
        assert!(matches!(result, Err(Error::Image { .. })));
    }

    #[test]
    fn test_load_missing_image() {
        let result = load_image(Path::new("does-not-exist.png"));
        assert!(matches!(result, Err(Error::Image { .. })));
    }
}
