//! Printer transports.
//!
//! A transport delivers a finished byte stream to a printer: either straight
//! into a device node (USB line printer, serial TTY) or through a CUPS queue.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::{EscPosError, Result};

/// Default write chunk size for device transports.
const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Default delay between chunks, giving slow serial links time to drain.
const CHUNK_WRITE_DELAY: Duration = Duration::from_millis(20);

/// Interface for delivering print data to a printer.
pub trait PrinterTransport: Send + Sync {
    /// Human-readable target (device path or queue name).
    fn target(&self) -> String;

    /// Send the complete byte stream.
    fn send(&self, data: &[u8]) -> impl Future<Output = Result<()>> + Send;
}

/// Writes raw bytes to a device node such as `/dev/usb/lp0` or `/dev/ttyUSB0`.
#[derive(Debug, Clone)]
pub struct DeviceTransport {
    path: PathBuf,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceTransport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay: CHUNK_WRITE_DELAY,
        }
    }

    /// Builder: set chunk size and inter-chunk delay.
    pub fn with_chunking(mut self, chunk_size: usize, delay: Duration) -> Self {
        self.chunk_size = chunk_size.max(1);
        self.chunk_delay = delay;
        self
    }

    fn io_error(&self, source: std::io::Error) -> EscPosError {
        EscPosError::Io {
            target: self.target(),
            source,
        }
    }
}

impl PrinterTransport for DeviceTransport {
    fn target(&self) -> String {
        self.path.display().to_string()
    }

    async fn send(&self, data: &[u8]) -> Result<()> {
        let mut device = tokio::fs::OpenOptions::new()
            .write(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        let chunks: Vec<&[u8]> = data.chunks(self.chunk_size).collect();
        tracing::debug!(
            target_path = %self.path.display(),
            chunk_count = chunks.len(),
            chunk_size = self.chunk_size,
            total_bytes = data.len(),
            "Writing data in chunks"
        );

        for (i, chunk) in chunks.iter().enumerate() {
            device.write_all(chunk).await.map_err(|e| self.io_error(e))?;
            if i + 1 < chunks.len() && !self.chunk_delay.is_zero() {
                tokio::time::sleep(self.chunk_delay).await;
            }
        }
        device.flush().await.map_err(|e| self.io_error(e))?;

        Ok(())
    }
}

/// Sends the stream to a CUPS queue as a raw job via `lpr`.
#[derive(Debug, Clone)]
pub struct LprTransport {
    printer_name: String,
    spool_dir: PathBuf,
}

impl LprTransport {
    pub fn new(printer_name: impl Into<String>) -> Self {
        Self {
            printer_name: printer_name.into(),
            spool_dir: std::env::temp_dir().join("pegavox-print"),
        }
    }

    /// Builder: set the directory the job file is written to before spooling.
    pub fn with_spool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spool_dir = dir.into();
        self
    }

    fn lpr_args(&self, job_file: &Path) -> Vec<String> {
        vec![
            "-P".to_string(),
            self.printer_name.clone(),
            "-o".to_string(),
            "raw".to_string(),
            job_file.display().to_string(),
        ]
    }
}

impl PrinterTransport for LprTransport {
    fn target(&self) -> String {
        self.printer_name.clone()
    }

    async fn send(&self, data: &[u8]) -> Result<()> {
        if self.printer_name.trim().is_empty() {
            return Err(EscPosError::Transport(
                "CUPS printer name is not configured".to_string(),
            ));
        }

        let spool_error = |source| EscPosError::Io {
            target: self.spool_dir.display().to_string(),
            source,
        };
        tokio::fs::create_dir_all(&self.spool_dir)
            .await
            .map_err(spool_error)?;

        let job_file = self.spool_dir.join("current_job.bin");
        tokio::fs::write(&job_file, data).await.map_err(spool_error)?;

        let output = Command::new("lpr")
            .args(self.lpr_args(&job_file))
            .output()
            .await
            .map_err(|e| EscPosError::Transport(format!("Failed to run lpr: {e}")));

        if let Err(e) = tokio::fs::remove_file(&job_file).await {
            tracing::warn!(path = %job_file.display(), "Failed to remove spool file: {e}");
        }

        let output = output?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EscPosError::Transport(format!(
                "lpr failed: {}",
                stderr.trim()
            )));
        }

        tracing::info!(printer = %self.printer_name, bytes = data.len(), "Job sent via lpr");
        Ok(())
    }
}
