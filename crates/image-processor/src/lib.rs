//! Image processing for thermal printer output.
//!
//! Turns an arbitrary raster image into a packed 1-bit bitmap:
//! resize (Lanczos3) → optional pixelation (nearest-neighbor) →
//! Floyd-Steinberg dithering → MSB-first bit packing.

pub mod bitmap;
pub mod dither;
pub mod pack;
pub mod pipeline;
pub mod pixelate;
pub mod resize;

// Re-exports for convenience
pub use bitmap::{BinaryImage, PackedBitmap};
pub use dither::{floyd_steinberg_dither, to_gray};
pub use pack::{pack_bits, pack_luma};
pub use pipeline::{RenderConfig, Rendered, render};
pub use pixelate::pixelate;
pub use resize::resize_to_width;

/// Standard thermal printer paper width in pixels (58 mm paper).
pub const PAPER_WIDTH: u32 = 384;

/// Default width of the intermediate image used by the pixelation pass.
pub const DEFAULT_PIXELATE_WIDTH: u32 = 96;

/// Errors raised by the rasterization stages.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("Unsupported pixel format: sample {value} at ({x}, {y}) is neither black nor white")]
    UnsupportedPixelFormat { x: u32, y: u32, value: u8 },
}

/// Result type alias for image processing operations.
pub type Result<T> = std::result::Result<T, ImageError>;
