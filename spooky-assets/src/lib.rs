//! Bundled sprite assets for the Spooky canvas demo
//!
//! Sprites are 16x16 BMPs compiled into the binary and decoded with
//! `tinybmp` into packed RGB triples. The [`AssetStore`] is the demo's
//! asset source: load it once at startup, then look sprites up by name.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sprite;
pub mod store;

pub use sprite::{decode_sprite, AssetError, SpriteData, SPRITE_BYTES, TRANSPARENT_KEY};
pub use store::{asset_names, AssetStore, ASSET_COUNT};
