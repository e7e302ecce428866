//! Packed RGB to canvas color conversion
//!
//! Asset sources hand out sprites as a flat byte sequence of RGB triples:
//! ```text
//! ┌───┬───┬───┬───┬───┬───┬─────┐
//! │ R │ G │ B │ R │ G │ B │ ... │
//! └───┴───┴───┴───┴───┴───┴─────┘
//!   pixel 0     pixel 1
//! ```
//! The converter unpacks those triples, in row-major order, into a
//! fixed-size buffer of [`CanvasColor`] values that a canvas sink can
//! display. The destination length defines the pixel count.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of source bytes per pixel (one byte each for R, G, B)
pub const BYTES_PER_PIXEL: usize = 3;

/// Conversion errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConvertError {
    /// The asset source had nothing for us. The destination is untouched.
    AssetUnavailable,
    /// Source holds fewer than `3 * pixel_count` bytes
    MalformedAsset {
        /// Bytes required for the destination
        expected: usize,
        /// Bytes actually provided
        actual: usize,
    },
}

impl ConvertError {
    /// Whether the caller can carry on with the previous buffer contents
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ConvertError::AssetUnavailable)
    }
}

/// A structured display-native color
///
/// Channel widths are interpreted by the canvas sink according to the
/// [`PixelFormat`](crate::canvas::PixelFormat) the buffer is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CanvasColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl CanvasColor {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Number of source bytes needed to fill `pixel_count` pixels
pub const fn raw_len(pixel_count: usize) -> usize {
    pixel_count * BYTES_PER_PIXEL
}

/// Unpack RGB triples from `raw` into `dest`
///
/// Returns the number of pixels written, always `dest.len()` on success.
/// Bytes past `3 * dest.len()` are ignored. Nothing is written when `raw`
/// is absent or too short.
pub fn convert_into(raw: Option<&[u8]>, dest: &mut [CanvasColor]) -> Result<usize, ConvertError> {
    let raw = raw.ok_or(ConvertError::AssetUnavailable)?;

    let expected = raw_len(dest.len());
    if raw.len() < expected {
        return Err(ConvertError::MalformedAsset {
            expected,
            actual: raw.len(),
        });
    }

    for (pixel, triple) in dest.iter_mut().zip(raw[..expected].chunks_exact(BYTES_PER_PIXEL)) {
        *pixel = CanvasColor::new(triple[0], triple[1], triple[2]);
    }

    Ok(dest.len())
}

/// Fill `dest` from an optional raw asset, keeping prior contents when the
/// asset is missing
///
/// Returns `Ok(true)` when the buffer was rewritten and `Ok(false)` when
/// the asset was unavailable. Malformed assets are still reported.
pub fn fill_from_asset(raw: Option<&[u8]>, dest: &mut [CanvasColor]) -> Result<bool, ConvertError> {
    match convert_into(raw, dest) {
        Ok(_) => Ok(true),
        Err(e) if e.is_recoverable() => Ok(false),
        Err(e) => Err(e),
    }
}

/// Owned color buffer of exactly `N` pixels
///
/// Created once at setup time and handed to the canvas sink by reference,
/// so it has to outlive the sink's use of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBuffer<const N: usize> {
    pixels: [CanvasColor; N],
}

impl<const N: usize> Default for ColorBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ColorBuffer<N> {
    /// Create a zeroed (black) buffer
    pub const fn new() -> Self {
        Self::filled(CanvasColor::BLACK)
    }

    /// Create a buffer with every pixel set to `color`
    pub const fn filled(color: CanvasColor) -> Self {
        Self { pixels: [color; N] }
    }

    /// Convert `raw` into a newly constructed buffer
    pub fn convert(raw: Option<&[u8]>) -> Result<Self, ConvertError> {
        let mut buffer = Self::new();
        buffer.load(raw)?;
        Ok(buffer)
    }

    /// Overwrite this buffer from `raw`
    ///
    /// On error the previous contents are kept.
    pub fn load(&mut self, raw: Option<&[u8]>) -> Result<usize, ConvertError> {
        convert_into(raw, &mut self.pixels)
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: CanvasColor) {
        self.pixels.fill(color);
    }

    pub fn as_slice(&self) -> &[CanvasColor] {
        &self.pixels
    }

    pub fn as_mut_slice(&mut self) -> &mut [CanvasColor] {
        &mut self.pixels
    }

    /// Pixel count
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn get(&self, index: usize) -> Option<CanvasColor> {
        self.pixels.get(index).copied()
    }
}

impl<const N: usize> AsRef<[CanvasColor]> for ColorBuffer<N> {
    fn as_ref(&self) -> &[CanvasColor] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SENTINEL: CanvasColor = CanvasColor::new(0xDE, 0xAD, 0xBE);

    #[test]
    fn test_two_pixel_example() {
        let raw: [u8; 6] = [10, 20, 30, 40, 50, 60];
        let buffer = ColorBuffer::<2>::convert(Some(&raw[..])).unwrap();

        assert_eq!(
            buffer.as_slice(),
            &[CanvasColor::new(10, 20, 30), CanvasColor::new(40, 50, 60)]
        );
    }

    #[test]
    fn test_absent_source_leaves_buffer_untouched() {
        let mut buffer = ColorBuffer::<256>::filled(SENTINEL);

        let result = buffer.load(None);

        assert_eq!(result, Err(ConvertError::AssetUnavailable));
        assert!(buffer.as_slice().iter().all(|&c| c == SENTINEL));
    }

    #[test]
    fn test_truncated_source_is_malformed() {
        let raw = [7u8; 3 * 256 - 1];
        let mut buffer = ColorBuffer::<256>::filled(SENTINEL);

        let result = buffer.load(Some(&raw[..]));

        assert_eq!(
            result,
            Err(ConvertError::MalformedAsset {
                expected: 768,
                actual: 767,
            })
        );
        // No partial writes
        assert!(buffer.as_slice().iter().all(|&c| c == SENTINEL));
    }

    #[test]
    fn test_zero_pixels_is_noop() {
        let mut dest: [CanvasColor; 0] = [];
        assert_eq!(convert_into(Some(&[0u8; 0][..]), &mut dest), Ok(0));
        assert_eq!(convert_into(Some(&[1u8, 2, 3][..]), &mut dest), Ok(0));

        let buffer = ColorBuffer::<0>::convert(Some(&[0u8; 0][..])).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_excess_bytes_ignored() {
        let raw: [u8; 8] = [1, 2, 3, 4, 5, 6, 99, 99];
        let mut dest = [SENTINEL; 2];

        assert_eq!(convert_into(Some(&raw[..]), &mut dest), Ok(2));
        assert_eq!(dest, [CanvasColor::new(1, 2, 3), CanvasColor::new(4, 5, 6)]);
    }

    #[test]
    fn test_fill_from_missing_asset_keeps_buffer() {
        let mut dest = [SENTINEL; 4];
        assert_eq!(fill_from_asset(None, &mut dest), Ok(false));
        assert_eq!(dest, [SENTINEL; 4]);
    }

    #[test]
    fn test_fill_from_short_asset_fails() {
        let raw = [9u8; 11];
        let mut dest = [SENTINEL; 4];
        assert_eq!(
            fill_from_asset(Some(&raw[..]), &mut dest),
            Err(ConvertError::MalformedAsset {
                expected: 12,
                actual: 11
            })
        );
        assert_eq!(fill_from_asset(Some(&[9u8; 12][..]), &mut dest), Ok(true));
        assert_eq!(dest, [CanvasColor::new(9, 9, 9); 4]);
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(ConvertError::AssetUnavailable.is_recoverable());
        assert!(!ConvertError::MalformedAsset {
            expected: 3,
            actual: 0
        }
        .is_recoverable());
    }

    proptest! {
        #[test]
        fn prop_channels_match_source(raw in prop::collection::vec(any::<u8>(), 0..=3 * 64)) {
            let pixel_count = raw.len() / BYTES_PER_PIXEL;
            let mut dest = vec![SENTINEL; pixel_count];

            let written = convert_into(Some(&raw[..]), &mut dest).unwrap();

            prop_assert_eq!(written, pixel_count);
            prop_assert_eq!(dest.len(), pixel_count);
            for (i, color) in dest.iter().enumerate() {
                prop_assert_eq!(color.red, raw[3 * i]);
                prop_assert_eq!(color.green, raw[3 * i + 1]);
                prop_assert_eq!(color.blue, raw[3 * i + 2]);
            }
        }

        #[test]
        fn prop_conversion_is_idempotent(raw in prop::collection::vec(any::<u8>(), 3 * 16)) {
            let first = ColorBuffer::<16>::convert(Some(&raw[..])).unwrap();
            let mut second = ColorBuffer::<16>::filled(SENTINEL);
            second.load(Some(&raw[..])).unwrap();
            second.load(Some(&raw[..])).unwrap();

            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_short_source_never_writes(
            pixel_count in 1usize..64,
            shortfall in 1usize..=3,
        ) {
            let raw: Vec<u8> = (0..raw_len(pixel_count) - shortfall).map(|i| i as u8).collect();
            let mut dest = vec![SENTINEL; pixel_count];

            let result = convert_into(Some(&raw[..]), &mut dest);

            prop_assert_eq!(
                result,
                Err(ConvertError::MalformedAsset { expected: raw_len(pixel_count), actual: raw.len() })
            );
            prop_assert!(dest.iter().all(|&c| c == SENTINEL));
        }
    }
}
