//! Collaborator traits
//!
//! These traits define the interface between the conversion logic and
//! the asset decoder on one side and the display on the other.

pub mod asset;
pub mod canvas;

pub use asset::AssetSource;
pub use canvas::CanvasSink;
