//! Auxiliary ESC/POS commands sent around a raster image.

/// Escape prefix.
pub const ESC: u8 = 0x1b;
/// Group-separator prefix.
pub const GS: u8 = 0x1d;

/// `ESC @`: reset the printer to its power-on state.
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// `ESC d n`: print the buffer and feed `n` lines.
pub fn feed_lines(lines: u8) -> Vec<u8> {
    vec![ESC, b'd', lines]
}

/// `GS V 1`: partial cut, on printers fitted with a cutter.
pub fn cut_partial() -> Vec<u8> {
    vec![GS, b'V', 0x01]
}
