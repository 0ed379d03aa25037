//! Page size calculations

/// Simple length type in PDF points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from inches
    pub fn from_inches(inches: f64) -> Self {
        Length(inches * 72.0)
    }

    /// Physical length of `pixels` printed at `dpi`
    pub fn from_pixels(pixels: u32, dpi: f32) -> Self {
        Self::from_inches(pixels as f64 / dpi as f64)
    }

    /// Get the value in points
    pub fn pt(&self) -> f64 {
        self.0
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy)]
pub struct PageDimensions {
    pub width: Length,
    pub height: Length,
}

impl PageDimensions {
    /// Page that exactly fits an image of the given pixel size at `dpi`
    pub fn for_image(width_px: u32, height_px: u32, dpi: f32) -> Self {
        Self {
            width: Length::from_pixels(width_px, dpi),
            height: Length::from_pixels(height_px, dpi),
        }
    }

    /// MediaBox rectangle `[0 0 width height]` in points
    pub fn media_box(&self) -> [f32; 4] {
        [0.0, 0.0, self.width.pt() as f32, self.height.pt() as f32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversions() {
        assert!((Length::from_inches(1.0).pt() - 72.0).abs() < 1e-9);
        assert!((Length::from_inches(0.5).pt() - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_pixels_at_100_dpi() {
        // 100 px at 100 dpi is one inch
        let len = Length::from_pixels(100, 100.0);
        assert!((len.pt() - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_pixels_at_72_dpi_are_points() {
        let len = Length::from_pixels(595, 72.0);
        assert!((len.pt() - 595.0).abs() < 1e-9);
    }

    #[test]
    fn test_page_for_image() {
        let page = PageDimensions::for_image(200, 100, 100.0);
        assert!((page.width.pt() - 144.0).abs() < 1e-9);
        assert!((page.height.pt() - 72.0).abs() < 1e-9);
        assert_eq!(page.media_box(), [0.0, 0.0, 144.0, 72.0]);
    }

    #[test]
    fn test_letter_scan_at_300_dpi() {
        // 2550 x 3300 px at 300 dpi is US Letter (8.5" x 11")
        let page = PageDimensions::for_image(2550, 3300, 300.0);
        assert!((page.width.pt() - 612.0).abs() < 1e-9);
        assert!((page.height.pt() - 792.0).abs() < 1e-9);
    }
}
