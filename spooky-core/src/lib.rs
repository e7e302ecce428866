//! Board-agnostic core logic for the Spooky canvas demo
//!
//! This crate contains everything that does not depend on a specific
//! board, display controller or image decoder:
//!
//! - Packed RGB to canvas color conversion
//! - Canvas geometry and pixel format declarations
//! - Collaborator traits (asset source, canvas sink)
//! - Configuration types and parsing

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod canvas;
pub mod config;
pub mod pixel;
pub mod traits;

pub use canvas::{CanvasError, CanvasSize, PixelFormat, SPRITE_PIXELS, SPRITE_SIZE};
pub use pixel::{convert_into, fill_from_asset, CanvasColor, ColorBuffer, ConvertError, BYTES_PER_PIXEL};
pub use traits::{AssetSource, CanvasSink};
