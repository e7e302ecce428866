//! Configuration types and parsing
//!
//! The demo is configured by a small TOML file parsed by a custom no_std
//! parser. With the `serde` feature the same types can be deserialized by
//! the `toml` crate on the host (the firmware build script does this).

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
