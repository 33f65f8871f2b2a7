//! PegaVox: turn a generated picture into a 58 mm thermal print.
//!
//! The rasterization itself lives in the `image-processor` and `escpos`
//! crates; this crate wires them to configuration, artifact files, the
//! upstream collaborators and the printer transports.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod prompt;
pub mod services;

pub use config::AppConfig;
pub use error::{PipelineError, Result};

/// Load `.env`, then build the runtime configuration from the environment.
pub fn init_config() -> anyhow::Result<AppConfig> {
    config::load_dotenv();
    let config = AppConfig::load()?;
    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}
