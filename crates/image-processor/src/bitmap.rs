//! Monochrome image types shared by the dithering and packing stages.

use image::{GrayImage, Luma};

use crate::{ImageError, Result};

/// Sample value of a black pixel in an 8-bit grayscale image.
pub const BLACK: u8 = 0;
/// Sample value of a white pixel in an 8-bit grayscale image.
pub const WHITE: u8 = 255;

/// A strictly two-level image: every pixel is black (`true`) or white (`false`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl BinaryImage {
    /// Create an all-white image.
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width as usize * height as usize],
        }
    }

    /// Build an image from row-major pixel flags (`true` = black).
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<bool>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ImageError::InvalidDimension(format!(
                "{width}x{height} image needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Interpret a grayscale image whose samples are exactly 0 or 255.
    ///
    /// Any other sample value is rejected with [`ImageError::UnsupportedPixelFormat`].
    pub fn from_luma(img: &GrayImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        let mut out = Self::new(width, height);
        for (x, y, px) in img.enumerate_pixels() {
            match px.0[0] {
                BLACK => out.set(x, y, true),
                WHITE => {}
                value => return Err(ImageError::UnsupportedPixelFormat { x, y, value }),
            }
        }
        Ok(out)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the pixel at `(x, y)` is black.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn is_black(&self, x: u32, y: u32) -> bool {
        self.pixels[self.index(x, y)]
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, black: bool) {
        let i = self.index(x, y);
        self.pixels[i] = black;
    }

    /// Row `y` as pixel flags.
    pub fn row(&self, y: u32) -> &[bool] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Number of black pixels.
    pub fn black_count(&self) -> usize {
        self.pixels.iter().filter(|&&b| b).count()
    }

    /// Render back to an 8-bit grayscale image (black = 0, white = 255).
    pub fn to_luma(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.is_black(x, y) { BLACK } else { WHITE }])
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}

/// Row-major, MSB-first packed 1-bit bitmap.
///
/// The buffer always holds exactly `bytes_per_row * height` bytes and the
/// unused low-order bits at the end of each row are zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    width: u32,
    height: u32,
    bytes_per_row: usize,
    data: Vec<u8>,
}

impl PackedBitmap {
    /// Allocate a zeroed (all white) bitmap.
    pub(crate) fn zeroed(width: u32, height: u32) -> Self {
        let bytes_per_row = bytes_per_row(width);
        Self {
            width,
            height,
            bytes_per_row,
            data: vec![0u8; bytes_per_row * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Packed bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.bytes_per_row;
        &self.data[start..start + self.bytes_per_row]
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.bytes_per_row;
        &mut self.data[start..start + self.bytes_per_row]
    }

    /// Expand back into a [`BinaryImage`] (bit set = black).
    pub fn unpack(&self) -> BinaryImage {
        let mut out = BinaryImage::new(self.width, self.height);
        for y in 0..self.height {
            let row = self.row(y);
            for x in 0..self.width {
                let byte = row[x as usize / 8];
                if byte & (0x80 >> (x % 8)) != 0 {
                    out.set(x, y, true);
                }
            }
        }
        out
    }
}

/// Bytes needed to hold one row of `width` pixels.
pub fn bytes_per_row(width: u32) -> usize {
    (width as usize).div_ceil(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_row_rounds_up() {
        assert_eq!(bytes_per_row(1), 1);
        assert_eq!(bytes_per_row(8), 1);
        assert_eq!(bytes_per_row(9), 2);
        assert_eq!(bytes_per_row(384), 48);
    }

    #[test]
    fn test_from_pixels_rejects_wrong_length() {
        let result = BinaryImage::from_pixels(3, 2, vec![false; 5]);
        assert!(matches!(result, Err(ImageError::InvalidDimension(_))));
    }

    #[test]
    fn test_from_luma_accepts_binary() {
        let mut img = GrayImage::from_pixel(3, 1, Luma([WHITE]));
        img.put_pixel(1, 0, Luma([BLACK]));

        let bin = BinaryImage::from_luma(&img).expect("binary input");
        assert_eq!(bin.row(0), &[false, true, false]);
    }

    #[test]
    fn test_from_luma_rejects_gray() {
        let mut img = GrayImage::from_pixel(4, 2, Luma([WHITE]));
        img.put_pixel(2, 1, Luma([128]));

        match BinaryImage::from_luma(&img) {
            Err(ImageError::UnsupportedPixelFormat { x, y, value }) => {
                assert_eq!((x, y, value), (2, 1, 128));
            }
            other => panic!("expected UnsupportedPixelFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_to_luma_matches_flags() {
        let bin = BinaryImage::from_pixels(2, 2, vec![true, false, false, true]).unwrap();
        let luma = bin.to_luma();
        assert_eq!(luma.get_pixel(0, 0).0[0], BLACK);
        assert_eq!(luma.get_pixel(1, 0).0[0], WHITE);
        assert_eq!(luma.get_pixel(0, 1).0[0], WHITE);
        assert_eq!(luma.get_pixel(1, 1).0[0], BLACK);
        assert_eq!(bin.black_count(), 2);
    }

    #[test]
    fn test_zeroed_bitmap_size() {
        let bmp = PackedBitmap::zeroed(13, 4);
        assert_eq!(bmp.bytes_per_row(), 2);
        assert_eq!(bmp.as_bytes().len(), 8);
        assert!(bmp.as_bytes().iter().all(|&b| b == 0));
    }
}
