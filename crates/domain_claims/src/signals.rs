//! Image feature extraction
//!
//! Turns an uploaded photo into the four scalar signals the damage classifier
//! consumes. Every step is integer or fixed-order floating point arithmetic
//! over the decoded bitmap, so identical bytes always yield identical signals.
//!
//! Pipeline:
//!
//! ```text
//! bytes -> decode -> RGB8 -> thumbnail (longest edge <= 800, Lanczos3)
//!       -> luma -> edge map -> {edge_intensity, edge_ratio}
//!       -> luma -> 2x contrast -> contrast_variance
//!       -> RGB -> dark_ratio
//! ```

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Longest edge after normalisation
pub const MAX_EDGE_PX: u32 = 800;

/// Pixels whose mean channel value is below this count as dark
pub const DARK_PIXEL_THRESHOLD: u32 = 50;

/// Edge-map pixels above this count as strong edges
pub const STRONG_EDGE_THRESHOLD: u8 = 100;

/// Contrast boost applied before measuring variance
pub const CONTRAST_FACTOR: f64 = 2.0;

/// The four scalar signals derived from one image
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageSignal {
    /// Mean value of the edge-detected grayscale image
    pub edge_intensity: f64,
    /// Fraction of pixels whose mean channel value is below 50
    pub dark_ratio: f64,
    /// Grayscale variance after a 2x contrast boost
    pub contrast_variance: f64,
    /// Fraction of edge-map pixels above 100
    pub edge_ratio: f64,
}

/// Extracts damage signals from raw image bytes
///
/// Returns `None` when no bytes were supplied or they do not decode as a
/// supported bitmap format. Failures are logged, never raised.
pub fn extract_signals(image_bytes: Option<&[u8]>) -> Option<DamageSignal> {
    let bytes = image_bytes.filter(|b| !b.is_empty())?;

    let decoded = match image::load_from_memory(bytes) {
        Ok(img) => img,
        Err(err) => {
            debug!(error = %err, len = bytes.len(), "image decode failed, signals unavailable");
            return None;
        }
    };

    let rgb = thumbnail(decoded.to_rgb8());
    if rgb.width() == 0 || rgb.height() == 0 {
        return None;
    }

    let signal = signals_from_rgb(&rgb);
    debug!(
        width = rgb.width(),
        height = rgb.height(),
        edge_intensity = signal.edge_intensity,
        dark_ratio = signal.dark_ratio,
        contrast_variance = signal.contrast_variance,
        edge_ratio = signal.edge_ratio,
        "extracted damage signals"
    );
    Some(signal)
}

/// Computes the signals from an already-normalised RGB bitmap
pub fn signals_from_rgb(rgb: &RgbImage) -> DamageSignal {
    let gray = to_luma(rgb);
    let edges = find_edges(&gray);
    let pixel_count = f64::from(rgb.width()) * f64::from(rgb.height());

    let edge_sum: u64 = edges.pixels().map(|p| u64::from(p.0[0])).sum();
    let strong_edges = edges
        .pixels()
        .filter(|p| p.0[0] > STRONG_EDGE_THRESHOLD)
        .count();

    // Mean channel value < 50 compared without division
    let dark_pixels = rgb
        .pixels()
        .filter(|p| {
            let sum = u32::from(p.0[0]) + u32::from(p.0[1]) + u32::from(p.0[2]);
            sum < DARK_PIXEL_THRESHOLD * 3
        })
        .count();

    let boosted = enhance_contrast(&gray, CONTRAST_FACTOR);

    DamageSignal {
        edge_intensity: edge_sum as f64 / pixel_count,
        dark_ratio: dark_pixels as f64 / pixel_count,
        contrast_variance: variance(&boosted),
        edge_ratio: strong_edges as f64 / pixel_count,
    }
}

/// Shrinks the image so its longest edge is at most [`MAX_EDGE_PX`], keeping aspect ratio
///
/// Images already within bounds are returned untouched; nothing is upscaled.
pub fn thumbnail(rgb: RgbImage) -> RgbImage {
    let (width, height) = rgb.dimensions();
    match thumbnail_dimensions(width, height) {
        Some((w, h)) => imageops::resize(&rgb, w, h, FilterType::Lanczos3),
        None => rgb,
    }
}

/// Target size for [`thumbnail`], or `None` if no resize is needed
pub fn thumbnail_dimensions(width: u32, height: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= MAX_EDGE_PX {
        return None;
    }
    let scale = |side: u32| -> u32 {
        let scaled = (f64::from(side) * f64::from(MAX_EDGE_PX) / f64::from(longest)).round();
        (scaled as u32).max(1)
    };
    if width >= height {
        Some((MAX_EDGE_PX, scale(height)))
    } else {
        Some((scale(width), MAX_EDGE_PX))
    }
}

/// ITU-R 601-2 luma in 16-bit fixed point, rounded
pub fn to_luma(rgb: &RgbImage) -> GrayImage {
    let (w, h) = rgb.dimensions();
    let mut gray = GrayImage::new(w, h);
    for (x, y, p) in rgb.enumerate_pixels() {
        let [r, g, b] = p.0;
        let l = (u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000) >> 16;
        gray.put_pixel(x, y, Luma([l.min(255) as u8]));
    }
    gray
}

/// Edge detection kernel: 8 at the centre, -1 on each neighbour
pub const FIND_EDGES_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];

/// 3x3 edge filter, clamped to 0..=255
///
/// Border pixels keep their grayscale value. Images smaller than 3x3 have no
/// interior and are returned unchanged.
pub fn find_edges(gray: &GrayImage) -> GrayImage {
    let (w, h) = gray.dimensions();
    if w < 3 || h < 3 {
        return gray.clone();
    }

    let mut out = imageops::filter3x3(gray, &FIND_EDGES_KERNEL);
    for x in 0..w {
        out.put_pixel(x, 0, *gray.get_pixel(x, 0));
        out.put_pixel(x, h - 1, *gray.get_pixel(x, h - 1));
    }
    for y in 1..h - 1 {
        out.put_pixel(0, y, *gray.get_pixel(0, y));
        out.put_pixel(w - 1, y, *gray.get_pixel(w - 1, y));
    }
    out
}

/// Blends the image away from its rounded mean grey by `factor`
///
/// `p' = clamp(m + factor * (p - m))` with `m = floor(mean + 0.5)`, truncated
/// toward zero after clamping.
pub fn enhance_contrast(gray: &GrayImage, factor: f64) -> GrayImage {
    let count = u64::from(gray.width()) * u64::from(gray.height());
    if count == 0 {
        return gray.clone();
    }
    let sum: u64 = gray.pixels().map(|p| u64::from(p.0[0])).sum();
    let mean = (sum as f64 / count as f64 + 0.5).floor();

    let mut out = GrayImage::new(gray.width(), gray.height());
    for (x, y, p) in gray.enumerate_pixels() {
        let v = mean + factor * (f64::from(p.0[0]) - mean);
        let clamped = if v <= 0.0 {
            0
        } else if v >= 255.0 {
            255
        } else {
            v as u8
        };
        out.put_pixel(x, y, Luma([clamped]));
    }
    out
}

/// Population variance of pixel values
pub fn variance(gray: &GrayImage) -> f64 {
    let count = u64::from(gray.width()) * u64::from(gray.height());
    if count == 0 {
        return 0.0;
    }
    let n = count as f64;
    let mean = gray.pixels().map(|p| f64::from(p.0[0])).sum::<f64>() / n;
    gray.pixels()
        .map(|p| {
            let d = f64::from(p.0[0]) - mean;
            d * d
        })
        .sum::<f64>()
        / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(w: u32, h: u32, value: u8) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([value, value, value]))
    }

    #[test]
    fn test_missing_bytes() {
        assert_eq!(extract_signals(None), None);
        assert_eq!(extract_signals(Some(&[])), None);
    }

    #[test]
    fn test_undecodable_bytes() {
        assert_eq!(extract_signals(Some(b"definitely not an image")), None);
    }

    #[test]
    fn test_thumbnail_dimensions() {
        assert_eq!(thumbnail_dimensions(640, 480), None);
        assert_eq!(thumbnail_dimensions(800, 800), None);
        assert_eq!(thumbnail_dimensions(1600, 1200), Some((800, 600)));
        assert_eq!(thumbnail_dimensions(1000, 3000), Some((267, 800)));
        assert_eq!(thumbnail_dimensions(5000, 2), Some((800, 1)));
    }

    #[test]
    fn test_luma_fixed_point() {
        let mut rgb = RgbImage::new(3, 1);
        rgb.put_pixel(0, 0, Rgb([255, 255, 255]));
        rgb.put_pixel(1, 0, Rgb([255, 0, 0]));
        rgb.put_pixel(2, 0, Rgb([0, 0, 255]));
        let gray = to_luma(&rgb);
        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
        assert_eq!(gray.get_pixel(1, 0).0[0], 76);
        assert_eq!(gray.get_pixel(2, 0).0[0], 29);
    }

    #[test]
    fn test_flat_image_has_no_interior_edges() {
        let gray = to_luma(&solid(10, 10, 128));
        let edges = find_edges(&gray);
        assert_eq!(edges.get_pixel(5, 5).0[0], 0);
        // border keeps the source value
        assert_eq!(edges.get_pixel(0, 0).0[0], 128);
    }

    #[test]
    fn test_single_bright_pixel_edge_response() {
        let mut gray = GrayImage::new(5, 5);
        gray.put_pixel(2, 2, Luma([20]));
        let edges = find_edges(&gray);
        assert_eq!(edges.get_pixel(2, 2).0[0], 160);
        // neighbours go negative and clamp to zero
        assert_eq!(edges.get_pixel(1, 2).0[0], 0);
    }

    #[test]
    fn test_edge_filter_interior_and_border() {
        let mut gray = GrayImage::from_pixel(4, 4, Luma([5]));
        gray.put_pixel(0, 0, Luma([77]));
        gray.put_pixel(1, 2, Luma([20]));
        let edges = find_edges(&gray);

        assert_eq!(edges.get_pixel(1, 2).0[0], 120);
        assert_eq!(edges.get_pixel(2, 1).0[0], 0);
        assert_eq!(edges.get_pixel(0, 0).0[0], 77);
        assert_eq!(edges.get_pixel(3, 3).0[0], 5);
        assert_eq!(edges.get_pixel(0, 2).0[0], 5);
    }

    #[test]
    fn test_tiny_image_is_its_own_edge_map() {
        let gray = GrayImage::from_pixel(2, 5, Luma([42]));
        assert_eq!(find_edges(&gray), gray);
    }

    #[test]
    fn test_contrast_boost_around_mean() {
        let mut gray = GrayImage::new(2, 1);
        gray.put_pixel(0, 0, Luma([100]));
        gray.put_pixel(1, 0, Luma([140]));
        let boosted = enhance_contrast(&gray, 2.0);
        assert_eq!(boosted.get_pixel(0, 0).0[0], 80);
        assert_eq!(boosted.get_pixel(1, 0).0[0], 160);
        assert_eq!(variance(&boosted), 1600.0);
    }

    #[test]
    fn test_dark_image_signals() {
        let signal = signals_from_rgb(&solid(20, 20, 10));
        assert_eq!(signal.dark_ratio, 1.0);
        assert_eq!(signal.contrast_variance, 0.0);
        assert_eq!(signal.edge_ratio, 0.0);
    }

    #[test]
    fn test_bright_image_has_no_dark_pixels() {
        let signal = signals_from_rgb(&solid(20, 20, 200));
        assert_eq!(signal.dark_ratio, 0.0);
    }

    #[test]
    fn test_dark_threshold_is_strict() {
        // mean channel exactly 50 is not dark
        let signal = signals_from_rgb(&solid(4, 4, 50));
        assert_eq!(signal.dark_ratio, 0.0);
        let signal = signals_from_rgb(&solid(4, 4, 49));
        assert_eq!(signal.dark_ratio, 1.0);
    }
}
