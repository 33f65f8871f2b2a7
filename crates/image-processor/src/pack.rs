//! Bit packing of monochrome images into printer raster rows.
//!
//! Rows are packed MSB-first: bit 7 of byte `x / 8` holds pixel `x`,
//! set to 1 when the pixel is black.

use image::GrayImage;
use tracing::debug;

use crate::Result;
use crate::bitmap::{BinaryImage, PackedBitmap};

/// Pack a binary image into a [`PackedBitmap`].
pub fn pack_bits(img: &BinaryImage) -> PackedBitmap {
    let (width, height) = img.dimensions();
    let mut out = PackedBitmap::zeroed(width, height);
    debug!(
        width,
        height,
        bytes_per_row = out.bytes_per_row(),
        "Packing bitmap"
    );

    for y in 0..height {
        let dst = out.row_mut(y);
        for (x, &black) in img.row(y).iter().enumerate() {
            if black {
                dst[x / 8] |= 0x80 >> (x % 8);
            }
        }
    }

    out
}

/// Pack an 8-bit grayscale image that must contain only 0 (black) and 255 (white).
///
/// Fails with [`crate::ImageError::UnsupportedPixelFormat`] on the first
/// intermediate gray sample.
pub fn pack_luma(img: &GrayImage) -> Result<PackedBitmap> {
    let binary = BinaryImage::from_luma(img)?;
    Ok(pack_bits(&binary))
}
