//! Configuration loading
//!
//! The demo configuration is compiled in from demo.toml and parsed at
//! boot with the no_std parser from spooky-core. build.rs runs the same
//! parser and validator and fails the build on any error, so the
//! fallback here should never trigger.

use defmt::*;

use spooky_core::config::{parse_config, DemoConfig};

/// Embedded configuration
/// Edit demo.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../demo.toml");

/// Parse and validate the embedded configuration
///
/// Falls back to [`DemoConfig::default`] on any error.
pub fn load_config() -> DemoConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("demo.toml parse error: {:?}, using defaults", e);
            return DemoConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        warn!("demo.toml rejected: {:?}, using defaults", e);
        return DemoConfig::default();
    }

    log_config_summary(&config);
    config
}

fn log_config_summary(config: &DemoConfig) {
    info!("Configuration loaded");
    info!("  Label: {}", config.demo.label.as_str());
    info!(
        "  Asset: {} ({})",
        config.demo.asset.as_str(),
        config.demo.pixel_format.name()
    );
    info!(
        "  Canvas: {}x{}, gap {}",
        config.canvas.width, config.canvas.height, config.canvas.gap
    );
    info!(
        "  Display: {}x{} @ {} Hz",
        config.display.width, config.display.height, config.display.spi_hz
    );
}
