//! Canvas geometry and pixel format declarations

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Side length of the bundled sprites, in pixels
pub const SPRITE_SIZE: u16 = 16;

/// Pixel count of one bundled sprite (16x16)
pub const SPRITE_PIXELS: usize = (SPRITE_SIZE as usize) * (SPRITE_SIZE as usize);

/// Errors reported by a canvas sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanvasError {
    /// Buffer length does not equal width * height
    SizeMismatch {
        /// Pixels declared by the dimensions
        expected: usize,
        /// Pixels in the provided buffer
        actual: usize,
    },
    /// Width or height is zero
    EmptyCanvas,
}

/// Declared channel layout of a color buffer
///
/// - `Rgb888`: each channel carries a full 8-bit intensity
/// - `Rgb565`: channels already hold native 5/6/5-bit intensities
///   (red and blue 0-31, green 0-63)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PixelFormat {
    #[default]
    Rgb888,
    Rgb565,
}

impl PixelFormat {
    /// Parse a config name (`"rgb888"` or `"rgb565"`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rgb888" => Some(PixelFormat::Rgb888),
            "rgb565" => Some(PixelFormat::Rgb565),
            _ => None,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            PixelFormat::Rgb888 => "rgb888",
            PixelFormat::Rgb565 => "rgb565",
        }
    }
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CanvasSize {
    pub width: u16,
    pub height: u16,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::SPRITE
    }
}

impl CanvasSize {
    /// Size of one bundled sprite
    pub const SPRITE: Self = Self::new(SPRITE_SIZE, SPRITE_SIZE);

    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// width * height
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row-major index of (x, y), or `None` outside the canvas
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(x as usize + y as usize * self.width as usize)
        } else {
            None
        }
    }

    /// Check that a buffer of `len` pixels fits these dimensions exactly
    pub fn check_buffer(&self, len: usize) -> Result<(), CanvasError> {
        if self.is_empty() {
            return Err(CanvasError::EmptyCanvas);
        }
        if len != self.pixel_count() {
            return Err(CanvasError::SizeMismatch {
                expected: self.pixel_count(),
                actual: len,
            });
        }
        Ok(())
    }
}
