//! Canvas, label and scene rendering for the Spooky canvas demo
//!
//! This crate provides:
//! - `Canvas`, a widget that shows a borrowed color buffer
//! - `Label`, a single-line text widget
//! - `Scene`, the label-over-canvas layout
//! - `FrameBuffer`, an RGB565 draw target streamed to the panel
//!
//! Everything draws through `embedded-graphics`, so the same scene
//! renders into the firmware frame buffer or a `MockDisplay` in tests.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod canvas;
pub mod framebuffer;
pub mod label;
pub mod scene;

// Re-export key types
pub use canvas::{to_rgb565, Canvas};
pub use framebuffer::{DisplayError, FrameBuffer, WIRE_BYTES_PER_PIXEL};
pub use label::{Label, LABEL_FONT};
pub use scene::Scene;
