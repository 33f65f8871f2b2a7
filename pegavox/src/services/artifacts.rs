//! Output artifact naming and writing.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::Serialize;

use crate::error::{PipelineError, Result};

/// File names derived from an output prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPaths {
    /// Binarized image at printer width.
    pub final_png: PathBuf,
    /// Raw packed rows, no header.
    pub bitmap: PathBuf,
    /// `GS v 0` command stream.
    pub escpos: PathBuf,
    pub transcription: PathBuf,
    pub prompt: PathBuf,
    /// Source image as handed over by the generator.
    pub generated: PathBuf,
}

impl ArtifactPaths {
    pub fn from_prefix(prefix: &str) -> Self {
        let path = |suffix: &str| PathBuf::from(format!("{prefix}.{suffix}"));
        Self {
            final_png: path("final.png"),
            bitmap: path("final.bitmap.bin"),
            escpos: path("final.escpos.bin"),
            transcription: path("transcription.txt"),
            prompt: path("prompt.txt"),
            generated: path("generated.png"),
        }
    }
}

/// Write `data` to `path` atomically.
///
/// The bytes go to a temporary file in the same directory, which is renamed
/// over `path` only once fully written. On failure `path` is left untouched
/// and the temporary file is removed.
pub fn write_bytes(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| PipelineError::io(path, e))?;
    tmp.write_all(data)
        .and_then(|()| tmp.flush())
        .map_err(|e| PipelineError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| PipelineError::io(path, e.error))?;
    tracing::info!(path = %path.display(), bytes = data.len(), "Saved artifact");
    Ok(())
}

/// Encode an image as PNG in memory, then write it with [`write_bytes`].
pub fn save_png(path: &Path, img: &DynamicImage) -> Result<()> {
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|source| PipelineError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    write_bytes(path, &png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    #[test]
    fn test_paths_from_prefix() {
        let paths = ArtifactPaths::from_prefix("out/run1");
        assert_eq!(paths.final_png, PathBuf::from("out/run1.final.png"));
        assert_eq!(paths.bitmap, PathBuf::from("out/run1.final.bitmap.bin"));
        assert_eq!(paths.escpos, PathBuf::from("out/run1.final.escpos.bin"));
        assert_eq!(paths.transcription, PathBuf::from("out/run1.transcription.txt"));
        assert_eq!(paths.prompt, PathBuf::from("out/run1.prompt.txt"));
        assert_eq!(paths.generated, PathBuf::from("out/run1.generated.png"));
    }

    #[test]
    fn test_write_bytes_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("x.bin");
        let err = write_bytes(&path, &[1, 2]).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
        assert!(err.to_string().contains("x.bin"));
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_bytes_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.final.bitmap.bin");
        std::fs::write(&path, [0xAA; 64]).unwrap();

        write_bytes(&path, &[0x80, 0x01]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x80, 0x01]);
        assert_eq!(entries(dir.path()), vec!["run.final.bitmap.bin"]);
    }

    #[test]
    fn test_write_bytes_failure_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory occupies the target name, so the final rename fails.
        let path = dir.path().join("run.final.escpos.bin");
        std::fs::create_dir(&path).unwrap();

        let err = write_bytes(&path, &[0x1d, 0x76, 0x30, 0x00]).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
        assert!(path.is_dir());
        assert_eq!(entries(dir.path()), vec!["run.final.escpos.bin"]);
    }

    #[test]
    fn test_save_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bw.png");
        let img = GrayImage::from_fn(5, 3, |x, _| image::Luma([if x % 2 == 0 { 0 } else { 255 }]));

        save_png(&path, &DynamicImage::ImageLuma8(img.clone())).unwrap();
        let loaded = image::open(&path).unwrap().to_luma8();
        assert_eq!(loaded, img);
    }
}
