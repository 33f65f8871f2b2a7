//! Rasterize an image and persist the printer artifacts.
//!
//! Each artifact is fully computed before its file is created, so a failing
//! stage never leaves a partial bitmap or command stream behind. Artifacts of
//! stages that already completed stay on disk.

use std::path::{Path, PathBuf};

use escpos::{PrinterCommand, encode_raster};
use image::DynamicImage;
use image_processor::{RenderConfig, render};
use serde::Serialize;

use super::artifacts::{ArtifactPaths, save_png, write_bytes};
use crate::error::{PipelineError, Result};

/// Summary of a completed render, printed by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    pub width: u32,
    pub height: u32,
    pub bytes_per_row: usize,
    pub black_pixels: usize,
    pub final_png: PathBuf,
    pub bitmap: PathBuf,
    pub escpos: PathBuf,
}

/// A render's report plus the framed command, ready for a printer.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub report: RenderReport,
    pub command: PrinterCommand,
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let bytes = std::fs::read(path).map_err(|e| PipelineError::io(path, e))?;
    image::load_from_memory(&bytes).map_err(|source| PipelineError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Run the rasterization pipeline on `img` and write the three output artifacts.
pub fn render_image(
    img: DynamicImage,
    config: &RenderConfig,
    paths: &ArtifactPaths,
) -> Result<RenderOutput> {
    let rendered = render(img, config)?;

    save_png(
        &paths.final_png,
        &DynamicImage::ImageLuma8(rendered.binary.to_luma()),
    )?;
    write_bytes(&paths.bitmap, rendered.packed.as_bytes())?;

    let command = encode_raster(&rendered.packed)?;
    write_bytes(&paths.escpos, command.as_bytes())?;

    let report = RenderReport {
        width: rendered.packed.width(),
        height: rendered.packed.height(),
        bytes_per_row: rendered.packed.bytes_per_row(),
        black_pixels: rendered.binary.black_count(),
        final_png: paths.final_png.clone(),
        bitmap: paths.bitmap.clone(),
        escpos: paths.escpos.clone(),
    };

    Ok(RenderOutput { report, command })
}
