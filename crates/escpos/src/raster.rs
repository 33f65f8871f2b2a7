//! `GS v 0` raster bit-image framing.
//!
//! Frame layout: `GS 'v' '0' m xL xH yL yH d1..dk` where `x` is the number of
//! bytes per row and `y` the number of rows, both little-endian u16, and
//! `k = x * y`.

use image_processor::PackedBitmap;
use tracing::debug;

use crate::commands::GS;
use crate::{EscPosError, Result};

/// Raster-image subcommand (`v`).
const CMD_RASTER: u8 = 0x76;
/// Raster mode selector (`0`).
const RASTER_MODE: u8 = 0x30;
/// Density parameter `m`: normal size.
const DENSITY_NORMAL: u8 = 0x00;

/// Length of the `GS v 0` header.
pub const HEADER_LEN: usize = 8;

/// A complete, immutable raster print command: header followed by bitmap rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterCommand {
    bytes: Vec<u8>,
}

impl PrinterCommand {
    /// Validate a previously encoded command stream.
    ///
    /// The header must be `GS v 0` and the payload length must equal
    /// `bytes_per_row * height` as declared in the header.
    pub fn parse(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(EscPosError::Malformed(format!(
                "{} bytes is shorter than the {HEADER_LEN}-byte header",
                bytes.len()
            )));
        }
        if bytes[..3] != [GS, CMD_RASTER, RASTER_MODE] {
            return Err(EscPosError::Malformed(
                "missing GS v 0 prefix".to_string(),
            ));
        }
        let bytes_per_row = usize::from(u16::from_le_bytes([bytes[4], bytes[5]]));
        let height = usize::from(u16::from_le_bytes([bytes[6], bytes[7]]));
        let expected = bytes_per_row * height;
        let actual = bytes.len() - HEADER_LEN;
        if actual != expected {
            return Err(EscPosError::Malformed(format!(
                "header declares {bytes_per_row}x{height} = {expected} bytes, payload has {actual}"
            )));
        }
        Ok(Self { bytes })
    }

    /// Bytes per row declared in the header.
    pub fn bytes_per_row(&self) -> u16 {
        u16::from_le_bytes([self.bytes[4], self.bytes[5]])
    }

    /// Number of rows declared in the header.
    pub fn height(&self) -> u16 {
        u16::from_le_bytes([self.bytes[6], self.bytes[7]])
    }

    /// The 8-byte header.
    pub fn header(&self) -> &[u8] {
        &self.bytes[..HEADER_LEN]
    }

    /// The packed bitmap following the header.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn header_field(field: &'static str, value: usize) -> Result<[u8; 2]> {
    u16::try_from(value)
        .map(u16::to_le_bytes)
        .map_err(|_| EscPosError::InvalidDimension { field, value })
}

/// Wrap a packed bitmap in a `GS v 0` raster command.
///
/// Fails with [`EscPosError::InvalidDimension`] when bytes-per-row or height
/// do not fit the 16-bit header fields.
pub fn encode_raster(bitmap: &PackedBitmap) -> Result<PrinterCommand> {
    let [xl, xh] = header_field("bytes_per_row", bitmap.bytes_per_row())?;
    let [yl, yh] = header_field("height", bitmap.height() as usize)?;

    let data = bitmap.as_bytes();
    let mut bytes = Vec::with_capacity(HEADER_LEN + data.len());
    bytes.extend_from_slice(&[GS, CMD_RASTER, RASTER_MODE, DENSITY_NORMAL, xl, xh, yl, yh]);
    bytes.extend_from_slice(data);

    debug!(
        bytes_per_row = bitmap.bytes_per_row(),
        height = bitmap.height(),
        total = bytes.len(),
        "Encoded GS v 0 raster command"
    );

    Ok(PrinterCommand { bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_processor::{BinaryImage, pack_bits};

    fn blank_bitmap(width: u32, height: u32) -> PackedBitmap {
        let pixels = vec![false; width as usize * height as usize];
        pack_bits(&BinaryImage::from_pixels(width, height, pixels).unwrap())
    }

    #[test]
    fn test_encode_paper_width_header() {
        let cmd = encode_raster(&blank_bitmap(384, 100)).unwrap();
        assert_eq!(
            cmd.header(),
            &[0x1d, 0x76, 0x30, 0x00, 0x30, 0x00, 0x64, 0x00]
        );
        assert_eq!(cmd.payload().len(), 4800);
        assert_eq!(cmd.len(), 8 + 4800);
    }

    #[test]
    fn test_encode_payload_is_bitmap() {
        let img = BinaryImage::from_pixels(9, 2, (0..18).map(|i| i % 3 == 0).collect()).unwrap();
        let bitmap = pack_bits(&img);
        let cmd = encode_raster(&bitmap).unwrap();
        assert_eq!(cmd.payload(), bitmap.as_bytes());
    }

    #[test]
    fn test_encode_width_one() {
        let img = BinaryImage::from_pixels(1, 2, vec![true, false]).unwrap();
        let cmd = encode_raster(&pack_bits(&img)).unwrap();
        assert_eq!(cmd.header()[4..], [0x01, 0x00, 0x02, 0x00]);
        assert_eq!(cmd.payload(), &[0x80, 0x00]);
    }

    #[test]
    fn test_encode_little_endian_height() {
        let cmd = encode_raster(&blank_bitmap(8, 300)).unwrap();
        // 300 = 0x012c
        assert_eq!(cmd.header()[6..], [0x2c, 0x01]);
    }

    #[test]
    fn test_encode_rejects_wide_rows() {
        // 524288 px -> 65536 bytes per row
        let result = encode_raster(&blank_bitmap(524_288, 1));
        assert!(matches!(
            result,
            Err(EscPosError::InvalidDimension {
                field: "bytes_per_row",
                value: 65536
            })
        ));
    }

    #[test]
    fn test_encode_rejects_tall_images() {
        let result = encode_raster(&blank_bitmap(1, 65_536));
        assert!(matches!(
            result,
            Err(EscPosError::InvalidDimension { field: "height", .. })
        ));
    }

    #[test]
    fn test_parse_accepts_encoded_command() {
        let cmd = encode_raster(&blank_bitmap(20, 5)).unwrap();
        let parsed = PrinterCommand::parse(cmd.as_bytes().to_vec()).unwrap();
        assert_eq!(parsed, cmd);
        assert_eq!(parsed.bytes_per_row(), 3);
        assert_eq!(parsed.height(), 5);
    }

    #[test]
    fn test_parse_rejects_truncated_payload() {
        let mut bytes = encode_raster(&blank_bitmap(16, 4)).unwrap().into_bytes();
        bytes.pop();
        assert!(matches!(
            PrinterCommand::parse(bytes),
            Err(EscPosError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_other_commands() {
        let bytes = vec![0x1b, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(
            PrinterCommand::parse(bytes),
            Err(EscPosError::Malformed(_))
        ));
        assert!(matches!(
            PrinterCommand::parse(vec![0x1d, 0x76]),
            Err(EscPosError::Malformed(_))
        ));
    }

    #[test]
    fn test_encode_accepts_max_fields() {
        let cmd = encode_raster(&blank_bitmap(8, 65_535)).unwrap();
        assert_eq!(cmd.header()[6..], [0xff, 0xff]);
    }
}
