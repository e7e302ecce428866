//! BMP sprite decoding
//!
//! Decodes a 16x16 BMP into packed RGB triples, row-major, with pixel
//! (x, y) at triple index `x + y * 16` regardless of the BMP row order.
//!
//! Magenta ([`TRANSPARENT_KEY`]) marks transparent pixels. They are not
//! exported and stay at the zeroed background.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use tinybmp::Bmp;

use spooky_core::{CanvasSize, PixelFormat, BYTES_PER_PIXEL, SPRITE_PIXELS};

/// Bytes in one decoded sprite
pub const SPRITE_BYTES: usize = SPRITE_PIXELS * BYTES_PER_PIXEL;

/// Decoded sprite: packed RGB triples
pub type SpriteData = [u8; SPRITE_BYTES];

/// Color key for transparent pixels, compared at 16-bit depth
pub const TRANSPARENT_KEY: Rgb565 = Rgb565::new(31, 0, 31);

/// Sprite decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssetError {
    /// Data is not a BMP tinybmp can read
    InvalidBmp,
    /// BMP is not 16x16
    WrongSize {
        width: u32,
        height: u32,
    },
}

/// Decode a 16x16 BMP into packed triples in the requested format
///
/// With [`PixelFormat::Rgb565`] the image is decoded into 16-bit color
/// and the native 5/6/5-bit channel values are exported unscaled.
pub fn decode_sprite(data: &[u8], format: PixelFormat) -> Result<SpriteData, AssetError> {
    let mut out = [0u8; SPRITE_BYTES];

    match format {
        PixelFormat::Rgb888 => {
            let bmp = Bmp::<Rgb888>::from_slice(data).map_err(|_| AssetError::InvalidBmp)?;
            check_size(bmp.size())?;
            for Pixel(point, color) in bmp.pixels() {
                if Rgb565::from(color) == TRANSPARENT_KEY {
                    continue;
                }
                store(&mut out, point, [color.r(), color.g(), color.b()]);
            }
        }
        PixelFormat::Rgb565 => {
            let bmp = Bmp::<Rgb565>::from_slice(data).map_err(|_| AssetError::InvalidBmp)?;
            check_size(bmp.size())?;
            for Pixel(point, color) in bmp.pixels() {
                if color == TRANSPARENT_KEY {
                    continue;
                }
                store(&mut out, point, [color.r(), color.g(), color.b()]);
            }
        }
    }

    Ok(out)
}

fn check_size(size: Size) -> Result<(), AssetError> {
    let sprite = CanvasSize::SPRITE;
    if size.width != sprite.width as u32 || size.height != sprite.height as u32 {
        return Err(AssetError::WrongSize {
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}

fn store(out: &mut SpriteData, point: Point, triple: [u8; BYTES_PER_PIXEL]) {
    let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
        return;
    };
    if let Some(index) = CanvasSize::SPRITE.index_of(x, y) {
        let offset = index * BYTES_PER_PIXEL;
        out[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&triple);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build an uncompressed bottom-up 24-bit BMP filled with one color
    fn solid_bmp(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let row_len = (width * 3 + 3) & !3;
        let image_len = row_len * height;
        let mut bmp = Vec::new();

        bmp.extend_from_slice(b"BM");
        bmp.extend_from_slice(&(54 + image_len).to_le_bytes());
        bmp.extend_from_slice(&[0; 4]);
        bmp.extend_from_slice(&54u32.to_le_bytes());

        bmp.extend_from_slice(&40u32.to_le_bytes());
        bmp.extend_from_slice(&(width as i32).to_le_bytes());
        bmp.extend_from_slice(&(height as i32).to_le_bytes());
        bmp.extend_from_slice(&1u16.to_le_bytes());
        bmp.extend_from_slice(&24u16.to_le_bytes());
        bmp.extend_from_slice(&0u32.to_le_bytes());
        bmp.extend_from_slice(&image_len.to_le_bytes());
        bmp.extend_from_slice(&[0; 16]);

        for _ in 0..height {
            let mut row = Vec::new();
            for _ in 0..width {
                row.extend_from_slice(&[rgb[2], rgb[1], rgb[0]]);
            }
            row.resize(row_len as usize, 0);
            bmp.extend_from_slice(&row);
        }
        bmp
    }

    #[test]
    fn test_decode_solid_sprite() {
        let bmp = solid_bmp(16, 16, [10, 20, 30]);
        let sprite = decode_sprite(&bmp, PixelFormat::Rgb888).unwrap();

        for triple in sprite.chunks_exact(3) {
            assert_eq!(triple, &[10, 20, 30]);
        }
    }

    #[test]
    fn test_decode_rejects_wrong_size() {
        let bmp = solid_bmp(8, 8, [0, 0, 0]);
        assert_eq!(
            decode_sprite(&bmp, PixelFormat::Rgb888),
            Err(AssetError::WrongSize {
                width: 8,
                height: 8
            })
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(
            decode_sprite(&[0x42, 0x4D, 0x00], PixelFormat::Rgb888),
            Err(AssetError::InvalidBmp)
        );
        assert_eq!(
            decode_sprite(&[], PixelFormat::Rgb565),
            Err(AssetError::InvalidBmp)
        );
    }

    #[test]
    fn test_magenta_is_transparent() {
        let bmp = solid_bmp(16, 16, [255, 0, 255]);

        for format in [PixelFormat::Rgb888, PixelFormat::Rgb565] {
            let sprite = decode_sprite(&bmp, format).unwrap();
            assert!(sprite.iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_near_magenta_is_opaque() {
        let bmp = solid_bmp(16, 16, [255, 16, 255]);

        let sprite = decode_sprite(&bmp, PixelFormat::Rgb888).unwrap();
        assert_eq!(&sprite[..3], &[255, 16, 255]);

        let sprite = decode_sprite(&bmp, PixelFormat::Rgb565).unwrap();
        assert_eq!((sprite[0], sprite[2]), (31, 31));
        assert_ne!(sprite[1], 0);
    }

    #[test]
    fn test_decode_rgb565_channels_are_native_width() {
        let bmp = solid_bmp(16, 16, [255, 255, 255]);
        let sprite = decode_sprite(&bmp, PixelFormat::Rgb565).unwrap();

        assert_eq!(&sprite[..3], &[31, 63, 31]);
    }
}
