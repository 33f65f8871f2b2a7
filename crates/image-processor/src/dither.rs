//! Dithering algorithms for converting images to black-and-white.
//!
//! Rec. 601 grayscale conversion followed by Floyd-Steinberg error diffusion.

use image::{DynamicImage, GrayImage, Luma};
use tracing::debug;

use crate::bitmap::{BLACK, BinaryImage, WHITE};

/// Threshold separating white (at or above) from black.
pub const THRESHOLD: u8 = 128;

/// Convert any image to 8-bit grayscale with Rec. 601 luma weights.
///
/// Uses the fixed-point `(R*19595 + G*38470 + B*7471 + 0x8000) >> 16`
/// formula; alpha is ignored. Single-channel 8-bit input passes through
/// untouched.
pub fn to_gray(img: &DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLumaA8(gray_alpha) => {
            GrayImage::from_fn(gray_alpha.width(), gray_alpha.height(), |x, y| {
                Luma([gray_alpha.get_pixel(x, y).0[0]])
            })
        }
        DynamicImage::ImageRgb8(rgb) => {
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                Luma([rec601_luma(r, g, b)])
            })
        }
        DynamicImage::ImageRgba8(rgba) => {
            GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
                let [r, g, b, _] = rgba.get_pixel(x, y).0;
                Luma([rec601_luma(r, g, b)])
            })
        }
        // 16-bit and float sources are narrowed to 8-bit RGB first.
        other => to_gray(&DynamicImage::ImageRgb8(other.to_rgb8())),
    }
}

fn rec601_luma(r: u8, g: u8, b: u8) -> u8 {
    let luma = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000;
    (luma >> 16) as u8
}

/// Apply Floyd-Steinberg dithering to a grayscale image.
///
/// Pixels are visited row-major, left to right, top to bottom. Samples at or
/// above [`THRESHOLD`] become white. Error distribution pattern:
/// - Right:        7/16
/// - Bottom-left:  3/16
/// - Bottom:       5/16
/// - Bottom-right: 1/16
pub fn floyd_steinberg_dither(img: &GrayImage) -> BinaryImage {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying Floyd-Steinberg dithering");

    // i16 accumulator; every write is clamped back into 0..=255.
    let mut buffer: Vec<i16> = img.as_raw().iter().map(|&v| i16::from(v)).collect();
    let mut output = BinaryImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let idx = y as usize * width as usize + x as usize;
            let old_pixel = buffer[idx];
            let new_pixel = if old_pixel >= i16::from(THRESHOLD) {
                i16::from(WHITE)
            } else {
                i16::from(BLACK)
            };
            let error = old_pixel - new_pixel;
            buffer[idx] = new_pixel;
            output.set(x, y, new_pixel == i16::from(BLACK));

            distribute_error(&mut buffer, x, y, width, height, error);
        }
    }

    debug!(black = output.black_count(), "Floyd-Steinberg dithering complete");
    output
}

/// Distribute quantization error to the not-yet-visited neighbors.
fn distribute_error(buffer: &mut [i16], x: u32, y: u32, width: u32, height: u32, error: i16) {
    let w = width as usize;
    let at = |dx: usize, dy: usize| (y as usize + dy) * w + x as usize + dx;
    let mut add = |i: usize, delta: i16| {
        buffer[i] = (buffer[i] + delta).clamp(i16::from(BLACK), i16::from(WHITE));
    };

    // Right: 7/16
    if x + 1 < width {
        add(at(1, 0), error * 7 / 16);
    }
    if y + 1 < height {
        // Bottom-left: 3/16
        if x > 0 {
            add(at(0, 1) - 1, error * 3 / 16);
        }
        // Bottom: 5/16
        add(at(0, 1), error * 5 / 16);
        // Bottom-right: 1/16
        if x + 1 < width {
            add(at(1, 1), error / 16);
        }
    }
}
