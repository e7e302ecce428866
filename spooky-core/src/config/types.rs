//! Configuration type definitions
//!
//! These types describe the demo scene and the panel it is drawn on.
//! The firmware embeds `demo.toml` and parses it into [`DemoConfig`].

use heapless::String;

use crate::canvas::{CanvasSize, PixelFormat, SPRITE_PIXELS};
use crate::pixel::CanvasColor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Maximum label text length
pub const MAX_LABEL_LEN: usize = 48;

/// Maximum asset name length
pub const MAX_ASSET_NAME_LEN: usize = 16;

/// Canvas pre-fill shown while no asset has been painted (light gray)
pub const DEFAULT_FALLBACK: [u8; 3] = [200, 200, 200];

/// Label shown above the canvas when none is configured
pub const DEFAULT_LABEL: &str = "Spooky says: Hello from Rust!";

/// Asset painted onto the canvas when none is configured
pub const DEFAULT_ASSET: &str = "ghost1";

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Config version is not [`CONFIG_VERSION`]
    VersionMismatch,
    /// Canvas is empty, bigger than a sprite, or does not fit the panel
    InvalidCanvas,
    /// Panel dimensions are zero
    InvalidDisplay,
    /// Asset name is empty
    MissingAsset,
}

/// Canvas configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: u16,
    /// Canvas height in pixels
    pub height: u16,
    /// Vertical gap between label and canvas in pixels
    pub gap: u16,
    /// Color the canvas is pre-filled with before the asset is converted
    pub fallback: [u8; 3],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: CanvasSize::SPRITE.width,
            height: CanvasSize::SPRITE.height,
            gap: 10,
            fallback: DEFAULT_FALLBACK,
        }
    }
}

impl CanvasConfig {
    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }

    pub fn fallback_color(&self) -> CanvasColor {
        CanvasColor::new(self.fallback[0], self.fallback[1], self.fallback[2])
    }
}

/// LCD panel configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DisplayHwConfig {
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
    /// SPI clock frequency in Hz
    pub spi_hz: u32,
}

impl Default for DisplayHwConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 240,
            spi_hz: 32_000_000,
        }
    }
}

/// Complete demo configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DemoConfig {
    /// Config format version
    pub version: u8,
    /// Scene settings
    pub demo: SceneConfig,
    /// Canvas settings
    pub canvas: CanvasConfig,
    /// Panel settings
    pub display: DisplayHwConfig,
}

/// Scene content
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SceneConfig {
    /// Label text
    pub label: String<MAX_LABEL_LEN>,
    /// Name of the asset painted onto the canvas
    pub asset: String<MAX_ASSET_NAME_LEN>,
    /// Channel layout the asset source exports
    pub pixel_format: PixelFormat,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mut label = String::new();
        let _ = label.push_str(DEFAULT_LABEL);
        let mut asset = String::new();
        let _ = asset.push_str(DEFAULT_ASSET);
        Self {
            label,
            asset,
            pixel_format: PixelFormat::Rgb888,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            demo: SceneConfig::default(),
            canvas: CanvasConfig::default(),
            display: DisplayHwConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the configuration for values the demo cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::InvalidDisplay);
        }

        let canvas = self.canvas.size();
        if canvas.is_empty()
            || canvas.pixel_count() > SPRITE_PIXELS
            || canvas.width > self.display.width
            || canvas.height > self.display.height
        {
            return Err(ConfigError::InvalidCanvas);
        }

        if self.demo.asset.is_empty() {
            return Err(ConfigError::MissingAsset);
        }

        Ok(())
    }
}
