//! Image resizing for thermal printer output.
//!
//! Provides aspect-ratio-preserving resize to the printer width using Lanczos3 filtering.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

use crate::{ImageError, Result};

/// Height an image of `orig_w x orig_h` gets when scaled to `width`, at least 1.
pub(crate) fn scaled_height(orig_w: u32, orig_h: u32, width: u32) -> u32 {
    let ratio = f64::from(width) / f64::from(orig_w);
    let new_height = (f64::from(orig_h) * ratio).round() as u32;
    new_height.max(1)
}

/// Resize an image to a target width while maintaining aspect ratio.
///
/// Uses Lanczos3 filtering for high-quality downsampling.
/// Returns the image unchanged if it already matches the target width.
pub fn resize_to_width(img: DynamicImage, width: u32) -> Result<DynamicImage> {
    let (orig_w, orig_h) = (img.width(), img.height());

    if width == 0 {
        return Err(ImageError::InvalidDimension(
            "target width must be greater than 0".to_string(),
        ));
    }
    if orig_w == 0 || orig_h == 0 {
        return Err(ImageError::InvalidDimension(format!(
            "source image is empty ({orig_w}x{orig_h})"
        )));
    }

    if orig_w == width {
        debug!(width, "Image already at target width, skipping resize");
        return Ok(img);
    }

    let new_height = scaled_height(orig_w, orig_h, width);

    debug!(
        orig_w,
        orig_h,
        new_width = width,
        new_height,
        "Resizing image to target width"
    );

    Ok(img.resize_exact(width, new_height, FilterType::Lanczos3))
}
