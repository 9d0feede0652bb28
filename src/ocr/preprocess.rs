//! Pixel-level preparation of an image before it is handed to the OCR engine.
//!
//! The pipeline is grayscale reduction followed by a global binarization whose
//! threshold is chosen from the image's own histogram (Otsu's method).

use image::{DynamicImage, GrayImage, Luma};

pub const FOREGROUND: u8 = 0;
pub const BACKGROUND: u8 = 255;

/// Reduces any decoded image to one 8-bit luminance channel.
///
/// Transparent pixels are composited onto white first so that cut-outs and
/// screenshots with alpha read as dark text on paper.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut luma = GrayImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        let r = r as f32 * alpha + 255.0 * (1.0 - alpha);
        let g = g as f32 * alpha + 255.0 * (1.0 - alpha);
        let b = b as f32 * alpha + 255.0 * (1.0 - alpha);
        let value = (0.299 * r + 0.587 * g + 0.114 * b).round().clamp(0.0, 255.0) as u8;
        luma.put_pixel(x, y, Luma([value]));
    }
    luma
}

pub fn histogram(image: &GrayImage) -> [u64; 256] {
    let mut bins = [0u64; 256];
    for pixel in image.pixels() {
        bins[pixel[0] as usize] += 1;
    }
    bins
}

/// Picks the split point that maximises between-class variance, where the
/// lower class is `0..=threshold`. Ties keep the lowest candidate; a histogram
/// with a single populated bin yields 0.
pub fn otsu_threshold(bins: &[u64; 256]) -> u8 {
    let total: u64 = bins.iter().sum();
    if total == 0 {
        return 0;
    }
    let total_sum: f64 = bins
        .iter()
        .enumerate()
        .map(|(value, &count)| value as f64 * count as f64)
        .sum();

    let mut lower_weight = 0u64;
    let mut lower_sum = 0.0f64;
    let mut best_threshold = 0u8;
    let mut best_variance = 0.0f64;

    for (value, &count) in bins.iter().enumerate() {
        lower_weight += count;
        lower_sum += value as f64 * count as f64;
        if lower_weight == 0 {
            continue;
        }
        let upper_weight = total - lower_weight;
        if upper_weight == 0 {
            break;
        }

        let lower_mean = lower_sum / lower_weight as f64;
        let upper_mean = (total_sum - lower_sum) / upper_weight as f64;
        let diff = lower_mean - upper_mean;
        let variance = lower_weight as f64 * upper_weight as f64 * diff * diff;
        if variance > best_variance {
            best_variance = variance;
            best_threshold = value as u8;
        }
    }
    best_threshold
}

/// Maps every pixel above `threshold` to [`BACKGROUND`] and the rest to
/// [`FOREGROUND`].
pub fn binarize(image: &mut GrayImage, threshold: u8) {
    for pixel in image.pixels_mut() {
        pixel[0] = if pixel[0] > threshold {
            BACKGROUND
        } else {
            FOREGROUND
        };
    }
}

/// Binarizes in place with an automatically chosen threshold and returns it.
pub fn binarize_otsu(image: &mut GrayImage) -> u8 {
    let threshold = otsu_threshold(&histogram(image));
    binarize(image, threshold);
    threshold
}
