//! Runtime application configuration loaded from the environment with defaults.

use std::path::PathBuf;

use escpos::PrintJob;
use image_processor::RenderConfig;

use super::defaults::{DEFAULT_SETTINGS, setting_keys};
use super::validation::validate_setting;
use super::SettingInfo;

/// Runtime configuration for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub printer_width: u32,
    pub pixelate_width: u32,
    pub out_prefix: String,
    pub debug_output: bool,
    pub printer_device: String,
    pub printer_name: String,
    pub feed_lines: u8,
    pub cut_paper: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            printer_width: image_processor::PAPER_WIDTH,
            pixelate_width: image_processor::DEFAULT_PIXELATE_WIDTH,
            out_prefix: "run".into(),
            debug_output: false,
            printer_device: String::new(),
            printer_name: String::new(),
            feed_lines: escpos::job::DEFAULT_FEED_LINES,
            cut_paper: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup, falling back to defaults.
    ///
    /// Empty values are treated as unset.
    pub fn load_from<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        for key in setting_keys() {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                config.set(key, &value)?;
            }
        }
        Ok(config)
    }

    /// Validate and assign a single setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        validate_setting(key, value)
            .map_err(|e| anyhow::anyhow!("validation error for {key}: {e}"))?;

        let value = value.trim();
        match key {
            "PRINTER_WIDTH" => self.printer_width = value.parse()?,
            "PIXELATE_WIDTH" => self.pixelate_width = value.parse()?,
            "OUT_PREFIX" => self.out_prefix = value.to_string(),
            "DEBUG_OUTPUT" => self.debug_output = value == "true",
            "PRINTER_DEVICE" => self.printer_device = value.to_string(),
            "PRINTER_NAME" => self.printer_name = value.to_string(),
            "FEED_LINES" => self.feed_lines = value.parse()?,
            "CUT_PAPER" => self.cut_paper = value == "true",
            _ => anyhow::bail!("unknown setting key: {key}"),
        }
        Ok(())
    }

    /// Current value of a setting as a string.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "PRINTER_WIDTH" => self.printer_width.to_string(),
            "PIXELATE_WIDTH" => self.pixelate_width.to_string(),
            "OUT_PREFIX" => self.out_prefix.clone(),
            "DEBUG_OUTPUT" => self.debug_output.to_string(),
            "PRINTER_DEVICE" => self.printer_device.clone(),
            "PRINTER_NAME" => self.printer_name.clone(),
            "FEED_LINES" => self.feed_lines.to_string(),
            "CUT_PAPER" => self.cut_paper.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// All settings with their effective values, in declaration order.
    pub fn settings(&self) -> Vec<SettingInfo> {
        setting_keys()
            .map(|key| {
                let def = &DEFAULT_SETTINGS[key];
                let value = self.get(key).unwrap_or_default();
                SettingInfo {
                    key: key.to_string(),
                    is_default: value == def.default,
                    value,
                    description: def.description.to_string(),
                }
            })
            .collect()
    }

    /// Stage parameters for the rasterization pipeline.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new()
            .with_printer_width(self.printer_width)
            .with_pixelate_width(self.pixelate_width)
    }

    /// Commands wrapped around the raster image when printing.
    pub fn print_job(&self) -> PrintJob {
        PrintJob::new()
            .with_feed_lines(self.feed_lines)
            .with_cut(self.cut_paper)
    }

    /// Configured device node, if any.
    pub fn printer_device(&self) -> Option<PathBuf> {
        let trimmed = self.printer_device.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_load_defaults() {
        let config = AppConfig::load_from(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.printer_width, 384);
        assert_eq!(config.pixelate_width, 96);
        assert_eq!(config.out_prefix, "run");
        assert!(config.printer_device().is_none());
    }

    #[test]
    fn test_load_overrides() {
        let config = AppConfig::load_from(lookup(&[
            ("PRINTER_WIDTH", "576"),
            ("PIXELATE_WIDTH", "0"),
            ("DEBUG_OUTPUT", "true"),
            ("PRINTER_DEVICE", "/dev/usb/lp0"),
            ("CUT_PAPER", "true"),
        ]))
        .unwrap();

        assert_eq!(config.printer_width, 576);
        assert_eq!(config.pixelate_width, 0);
        assert!(config.debug_output);
        assert!(config.cut_paper);
        assert_eq!(config.printer_device(), Some(PathBuf::from("/dev/usb/lp0")));
    }

    #[test]
    fn test_load_ignores_empty_values() {
        let config = AppConfig::load_from(lookup(&[("OUT_PREFIX", "")])).unwrap();
        assert_eq!(config.out_prefix, "run");
    }

    #[test]
    fn test_load_rejects_invalid_value() {
        let err = AppConfig::load_from(lookup(&[("PRINTER_WIDTH", "0")])).unwrap_err();
        assert!(err.to_string().contains("PRINTER_WIDTH"));
    }

    #[test]
    fn test_set_unknown_key() {
        let mut config = AppConfig::default();
        assert!(config.set("IMAGE_MODEL", "gpt-image-1").is_err());
    }

    #[test]
    fn test_render_config_follows_settings() {
        let mut config = AppConfig::default();
        config.set("PRINTER_WIDTH", "200").unwrap();
        config.set("PIXELATE_WIDTH", "50").unwrap();

        let render = config.render_config();
        assert_eq!(render.printer_width, 200);
        assert_eq!(render.pixelate_width, 50);
    }

    #[test]
    fn test_print_job_follows_settings() {
        let mut config = AppConfig::default();
        config.set("FEED_LINES", "5").unwrap();
        config.set("CUT_PAPER", "true").unwrap();

        let job = config.print_job();
        assert_eq!(job.feed_lines, 5);
        assert!(job.cut);
        assert!(job.reset);
    }

    #[test]
    fn test_settings_report_defaults() {
        let mut config = AppConfig::default();
        config.set("OUT_PREFIX", "demo").unwrap();

        let settings = config.settings();
        assert_eq!(settings.len(), 8);
        let prefix = settings.iter().find(|s| s.key == "OUT_PREFIX").unwrap();
        assert_eq!(prefix.value, "demo");
        assert!(!prefix.is_default);
        let width = settings.iter().find(|s| s.key == "PRINTER_WIDTH").unwrap();
        assert!(width.is_default);
    }
}
