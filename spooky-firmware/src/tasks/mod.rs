//! Embassy async tasks

pub mod demo;

pub use demo::{demo_task, Panel, PanelMutex};
