//! Print-job assembly.
//!
//! A job is the init sequence, the raster command, and the finish sequence
//! (paper feed and optional cut) concatenated into one byte stream.

use crate::commands;
use crate::raster::PrinterCommand;

/// Default number of lines fed after the image so it clears the tear bar.
pub const DEFAULT_FEED_LINES: u8 = 3;

/// Options controlling what surrounds the raster command.
#[derive(Debug, Clone)]
pub struct PrintJob {
    /// Send `ESC @` before the image.
    pub reset: bool,

    /// Lines to feed after the image.
    pub feed_lines: u8,

    /// Issue a partial cut at the end.
    pub cut: bool,
}

impl Default for PrintJob {
    fn default() -> Self {
        Self {
            reset: true,
            feed_lines: DEFAULT_FEED_LINES,
            cut: false,
        }
    }
}

impl PrintJob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set reset flag.
    pub fn with_reset(mut self, val: bool) -> Self {
        self.reset = val;
        self
    }

    /// Builder: set feed lines.
    pub fn with_feed_lines(mut self, val: u8) -> Self {
        self.feed_lines = val;
        self
    }

    /// Builder: set cut flag.
    pub fn with_cut(mut self, val: bool) -> Self {
        self.cut = val;
        self
    }

    /// Commands sent before the image.
    pub fn build_init_sequence(&self) -> Vec<Vec<u8>> {
        if self.reset {
            vec![commands::init()]
        } else {
            Vec::new()
        }
    }

    /// Commands sent after the image.
    pub fn build_finish_sequence(&self) -> Vec<Vec<u8>> {
        let mut seq = Vec::new();
        if self.feed_lines > 0 {
            seq.push(commands::feed_lines(self.feed_lines));
        }
        if self.cut {
            seq.push(commands::cut_partial());
        }
        seq
    }

    /// Concatenate init sequence, raster command, and finish sequence.
    pub fn build(&self, raster: &PrinterCommand) -> Vec<u8> {
        let mut payload = Vec::with_capacity(raster.len() + 16);
        for cmd in self.build_init_sequence() {
            payload.extend_from_slice(&cmd);
        }
        payload.extend_from_slice(raster.as_bytes());
        for cmd in self.build_finish_sequence() {
            payload.extend_from_slice(&cmd);
        }
        payload
    }
}
