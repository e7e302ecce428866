//! Asset store
//!
//! Holds the decoded pixel data of every bundled sprite and lends it out
//! through the [`AssetSource`] trait.

use spooky_core::{AssetSource, PixelFormat};

use crate::sprite::{decode_sprite, SpriteData};

/// Number of bundled sprites
pub const ASSET_COUNT: usize = 3;

/// A BMP compiled into the binary
struct Bundled {
    name: &'static str,
    bmp: &'static [u8],
}

const BUNDLED: [Bundled; ASSET_COUNT] = [
    Bundled {
        name: "ghost1",
        bmp: include_bytes!("../assets/img/ghost1.bmp"),
    },
    Bundled {
        name: "ghost2",
        bmp: include_bytes!("../assets/img/ghost2.bmp"),
    },
    Bundled {
        name: "coin",
        bmp: include_bytes!("../assets/img/coin.bmp"),
    },
];

/// Names of the bundled sprites
pub fn asset_names() -> impl Iterator<Item = &'static str> {
    BUNDLED.iter().map(|b| b.name)
}

/// Decoded sprite storage
///
/// Empty until [`AssetSource::load`] is called. Sprites that fail to
/// decode stay empty and are reported as unavailable.
pub struct AssetStore {
    format: PixelFormat,
    sprites: [Option<SpriteData>; ASSET_COUNT],
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStore {
    /// Create an empty store exporting full 8-bit channels
    pub const fn new() -> Self {
        Self::with_format(PixelFormat::Rgb888)
    }

    /// Create an empty store exporting triples in `format`
    pub const fn with_format(format: PixelFormat) -> Self {
        Self {
            format,
            sprites: [None; ASSET_COUNT],
        }
    }

    /// Number of sprites decoded by the last load
    pub fn loaded_count(&self) -> usize {
        self.sprites.iter().filter(|s| s.is_some()).count()
    }

    fn index_of(name: &str) -> Option<usize> {
        BUNDLED.iter().position(|b| b.name == name)
    }
}

impl AssetSource for AssetStore {
    fn load(&mut self) {
        for (slot, bundled) in self.sprites.iter_mut().zip(BUNDLED.iter()) {
            *slot = decode_sprite(bundled.bmp, self.format).ok();
        }
    }

    fn raw(&self, name: &str) -> Option<&[u8]> {
        let index = Self::index_of(name)?;
        self.sprites[index].as_ref().map(|sprite| &sprite[..])
    }

    fn format(&self) -> PixelFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::SPRITE_BYTES;
    use spooky_core::{CanvasColor, ColorBuffer, ConvertError, SPRITE_PIXELS};

    fn pixel(raw: &[u8], x: usize, y: usize) -> [u8; 3] {
        let offset = (x + y * 16) * 3;
        [raw[offset], raw[offset + 1], raw[offset + 2]]
    }

    #[test]
    fn test_nothing_available_before_load() {
        let store = AssetStore::new();
        assert_eq!(store.raw("ghost1"), None);
        assert!(!store.contains("coin"));
        assert_eq!(store.loaded_count(), 0);
    }

    #[test]
    fn test_load_decodes_all_bundled_sprites() {
        let mut store = AssetStore::new();
        store.load();

        assert_eq!(store.loaded_count(), ASSET_COUNT);
        for name in asset_names() {
            assert_eq!(store.raw(name).map(<[u8]>::len), Some(SPRITE_BYTES));
        }
        assert_eq!(store.raw("pumpkin"), None);
    }

    #[test]
    fn test_ghost1_is_row_major_from_top_left() {
        let mut store = AssetStore::new();
        store.load();
        let raw = store.raw("ghost1").unwrap();

        // Transparent corner, body, and the left pupil on row 5
        assert_eq!(pixel(raw, 0, 0), [0, 0, 0]);
        assert_eq!(pixel(raw, 5, 1), [230, 230, 240]);
        assert_eq!(pixel(raw, 6, 5), [20, 20, 120]);
        assert_eq!(pixel(raw, 4, 5), [255, 255, 255]);
        // Wavy hem on the bottom row
        assert_eq!(pixel(raw, 0, 15), [230, 230, 240]);
        assert_eq!(pixel(raw, 1, 15), [0, 0, 0]);
    }

    #[test]
    fn test_rgb565_store_exports_native_channels() {
        let mut store = AssetStore::with_format(PixelFormat::Rgb565);
        store.load();
        assert_eq!(store.format(), PixelFormat::Rgb565);

        let raw = store.raw("coin").unwrap();
        for triple in raw.chunks_exact(3) {
            assert!(triple[0] <= 31);
            assert!(triple[1] <= 63);
            assert!(triple[2] <= 31);
        }
        // Saturated red and empty blue survive any 8 to 5 bit mapping
        let rim = pixel(raw, 5, 1);
        assert_eq!((rim[0], rim[2]), (31, 0));
    }

    #[test]
    fn test_reload_is_idempotent() {
        let mut store = AssetStore::new();
        store.load();
        let first: [u8; SPRITE_BYTES] = store.raw("ghost2").unwrap().try_into().unwrap();
        store.load();
        assert_eq!(store.raw("ghost2"), Some(&first[..]));
    }

    #[test]
    fn test_sprite_converts_into_canvas_buffer() {
        let mut store = AssetStore::new();
        store.load();

        let buffer = ColorBuffer::<SPRITE_PIXELS>::convert(store.raw("ghost1")).unwrap();
        assert_eq!(buffer.get(6 + 5 * 16), Some(CanvasColor::new(20, 20, 120)));

        let unloaded = AssetStore::new();
        assert_eq!(
            ColorBuffer::<SPRITE_PIXELS>::convert(unloaded.raw("ghost1")),
            Err(ConvertError::AssetUnavailable)
        );
    }
}
