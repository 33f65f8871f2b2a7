//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

/// (key, default, description)
type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    ("PRINTER_WIDTH", "384", "Target printer width in pixels (384 for 58 mm paper)"),
    ("PIXELATE_WIDTH", "96", "Intermediate width for the pixelation pass; 0 disables it"),
    ("OUT_PREFIX", "run", "Prefix for output artifact file names"),
    ("DEBUG_OUTPUT", "false", "Write transcription, prompt and generated image alongside the outputs"),
    ("PRINTER_DEVICE", "", "Printer device node (e.g. /dev/usb/lp0); takes precedence over PRINTER_NAME"),
    ("PRINTER_NAME", "", "CUPS queue used when no device node is configured"),
    ("FEED_LINES", "3", "Lines fed after the image when printing"),
    ("CUT_PAPER", "false", "Issue a partial cut after printing"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Setting keys in declaration order.
pub fn setting_keys() -> impl Iterator<Item = &'static str> {
    DEFS.iter().map(|&(key, _, _)| key)
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});
