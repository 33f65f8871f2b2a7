//! The rasterization stage chain: resize → pixelate → dither → pack.

use image::DynamicImage;
use tracing::{debug, info};

use crate::bitmap::{BinaryImage, PackedBitmap};
use crate::dither::{floyd_steinberg_dither, to_gray};
use crate::pack::pack_bits;
use crate::pixelate::pixelate;
use crate::resize::resize_to_width;
use crate::{DEFAULT_PIXELATE_WIDTH, PAPER_WIDTH, Result};

/// Parameters of a single rasterization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Output width in pixels.
    pub printer_width: u32,
    /// Width of the intermediate pixelation image; 0 disables the pass.
    pub pixelate_width: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            printer_width: PAPER_WIDTH,
            pixelate_width: DEFAULT_PIXELATE_WIDTH,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set printer width.
    pub fn with_printer_width(mut self, val: u32) -> Self {
        self.printer_width = val;
        self
    }

    /// Builder: set pixelation width (0 disables).
    pub fn with_pixelate_width(mut self, val: u32) -> Self {
        self.pixelate_width = val;
        self
    }
}

/// Output of [`render`]: the binarized image and its packed form.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub binary: BinaryImage,
    pub packed: PackedBitmap,
}

/// Run the image through every rasterization stage in order.
///
/// Any stage error aborts the run; no partial bitmap is produced.
pub fn render(img: DynamicImage, config: &RenderConfig) -> Result<Rendered> {
    debug!(
        src_w = img.width(),
        src_h = img.height(),
        printer_width = config.printer_width,
        pixelate_width = config.pixelate_width,
        "Rendering image for printer"
    );

    let resized = resize_to_width(img, config.printer_width)?;
    let pixelated = pixelate(resized, config.pixelate_width);
    let binary = floyd_steinberg_dither(&to_gray(&pixelated));
    let packed = pack_bits(&binary);

    info!(
        width = packed.width(),
        height = packed.height(),
        bytes = packed.as_bytes().len(),
        "Rendered packed bitmap"
    );

    Ok(Rendered { binary, packed })
}
