//! Printer dispatch: pick a transport from the configuration and send a job.

use std::path::Path;

use escpos::{DeviceTransport, LprTransport, PrinterCommand, PrinterTransport};

use crate::config::AppConfig;
use crate::error::{PipelineError, Result};

/// Transport selected by the configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredTransport {
    Device(DeviceTransport),
    Lpr(LprTransport),
}

impl ConfiguredTransport {
    /// `PRINTER_DEVICE` wins over `PRINTER_NAME`; neither set is an error.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        if let Some(device) = config.printer_device() {
            return Ok(Self::Device(DeviceTransport::new(device)));
        }
        let name = config.printer_name.trim();
        if !name.is_empty() {
            return Ok(Self::Lpr(LprTransport::new(name)));
        }
        Err(PipelineError::NoPrinter)
    }

    pub fn target(&self) -> String {
        match self {
            Self::Device(t) => t.target(),
            Self::Lpr(t) => t.target(),
        }
    }

    pub async fn send(&self, data: &[u8]) -> Result<()> {
        match self {
            Self::Device(t) => t.send(data).await?,
            Self::Lpr(t) => t.send(data).await?,
        }
        Ok(())
    }
}

/// Wrap `command` in the configured print job and send it.
pub async fn print_command(config: &AppConfig, command: &PrinterCommand) -> Result<()> {
    let transport = ConfiguredTransport::from_config(config)?;
    let payload = config.print_job().build(command);

    tracing::info!(
        target_printer = %transport.target(),
        bytes = payload.len(),
        rows = command.height(),
        "Sending print job"
    );
    transport.send(&payload).await
}

/// Load a stored `GS v 0` command file and print it.
pub async fn print_file(config: &AppConfig, path: &Path) -> Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| PipelineError::io(path, e))?;
    let command = PrinterCommand::parse(bytes)?;
    print_command(config, &command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use escpos::encode_raster;
    use image_processor::{BinaryImage, pack_bits};

    fn command() -> PrinterCommand {
        let img = BinaryImage::from_pixels(16, 2, vec![true; 32]).unwrap();
        encode_raster(&pack_bits(&img)).unwrap()
    }

    #[test]
    fn test_device_wins_over_name() {
        let mut config = AppConfig::default();
        config.set("PRINTER_NAME", "thermal").unwrap();
        config.set("PRINTER_DEVICE", "/dev/usb/lp0").unwrap();

        let transport = ConfiguredTransport::from_config(&config).unwrap();
        assert!(matches!(transport, ConfiguredTransport::Device(_)));
        assert_eq!(transport.target(), "/dev/usb/lp0");
    }

    #[test]
    fn test_lpr_when_only_name() {
        let mut config = AppConfig::default();
        config.set("PRINTER_NAME", "thermal").unwrap();

        let transport = ConfiguredTransport::from_config(&config).unwrap();
        assert!(matches!(transport, ConfiguredTransport::Lpr(_)));
    }

    #[test]
    fn test_no_printer_configured() {
        let result = ConfiguredTransport::from_config(&AppConfig::default());
        assert!(matches!(result, Err(PipelineError::NoPrinter)));
    }

    #[tokio::test]
    async fn test_print_command_to_device() {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("lp0");
        std::fs::File::create(&device).unwrap();

        let mut config = AppConfig::default();
        config.set("PRINTER_DEVICE", device.to_str().unwrap()).unwrap();
        config.set("FEED_LINES", "2").unwrap();

        let cmd = command();
        print_command(&config, &cmd).await.unwrap();

        let written = std::fs::read(&device).unwrap();
        assert_eq!(&written[..2], &[0x1b, 0x40]);
        assert_eq!(&written[2..2 + cmd.len()], cmd.as_bytes());
        assert_eq!(&written[2 + cmd.len()..], &[0x1b, 0x64, 0x02]);
    }

    #[tokio::test]
    async fn test_print_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.bin");
        std::fs::write(&path, [0u8; 4]).unwrap();

        let mut config = AppConfig::default();
        config.set("PRINTER_DEVICE", "/dev/null").unwrap();

        let err = print_file(&config, &path).await.unwrap_err();
        assert!(matches!(err, PipelineError::Printer(escpos::EscPosError::Malformed(_))));
    }
}
