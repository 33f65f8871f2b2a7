//! Nearest-neighbor pixelation for a visibly blocky look.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

use crate::resize::scaled_height;

/// Downscale to `small_width` and scale back up, both with nearest-neighbor sampling.
///
/// The result keeps the original dimensions and consists of square blocks of
/// roughly `width / small_width` pixels. A `small_width` of 0, or one that is not
/// smaller than the current width, returns the image unchanged.
pub fn pixelate(img: DynamicImage, small_width: u32) -> DynamicImage {
    let (w, h) = (img.width(), img.height());

    if small_width == 0 || small_width >= w {
        debug!(w, small_width, "Pixelation disabled for this image");
        return img;
    }

    let small_height = scaled_height(w, h, small_width);
    debug!(w, h, small_width, small_height, "Pixelating image");

    img.resize_exact(small_width, small_height, FilterType::Nearest)
        .resize_exact(w, h, FilterType::Nearest)
}
