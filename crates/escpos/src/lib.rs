//! ESC/POS framing and delivery for 58 mm thermal receipt printers.
//!
//! Provides the `GS v 0` raster bit-image command, the auxiliary
//! init/feed/cut commands, print-job assembly, and transports that push the
//! resulting byte stream to a printer device or a CUPS queue.

pub mod commands;
pub mod job;
pub mod raster;
pub mod transport;

// Re-exports for convenience
pub use job::PrintJob;
pub use raster::{PrinterCommand, encode_raster};
pub use transport::{DeviceTransport, LprTransport, PrinterTransport};

/// Errors that can occur while framing or sending printer data.
#[derive(Debug, thiserror::Error)]
pub enum EscPosError {
    #[error("Invalid dimension: {field} = {value} exceeds the 16-bit header limit of 65535")]
    InvalidDimension { field: &'static str, value: usize },

    #[error("Malformed raster command: {0}")]
    Malformed(String),

    #[error("Printer I/O error on {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias for ESC/POS operations.
pub type Result<T> = std::result::Result<T, EscPosError>;
