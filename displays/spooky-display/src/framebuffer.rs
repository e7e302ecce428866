//! In-memory frame buffer
//!
//! Scenes are drawn into RAM first and streamed to the panel in one
//! pass. The panel takes RGB565 big-endian, two bytes per pixel.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Frame buffer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Pixel storage does not match the screen size
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Bytes per pixel on the wire
pub const WIRE_BYTES_PER_PIXEL: usize = 2;

/// Full-screen RGB565 frame buffer over borrowed storage
pub struct FrameBuffer<'a> {
    pixels: &'a mut [Rgb565],
    size: Size,
    dirty: bool,
}

impl<'a> FrameBuffer<'a> {
    /// Wrap `pixels` as a `size` screen, row-major
    pub fn new(pixels: &'a mut [Rgb565], size: Size) -> Result<Self, DisplayError> {
        let expected = (size.width * size.height) as usize;
        if pixels.len() != expected {
            return Err(DisplayError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            size,
            dirty: true,
        })
    }

    /// Whether anything was drawn since the last flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index_of(point).map(|i| self.pixels[i])
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some((x + y * self.size.width) as usize)
    }

    /// Encode pixels from index `start` as big-endian RGB565 into `out`
    ///
    /// Returns the number of pixels written, zero once `start` is past
    /// the end.
    pub fn write_be_bytes(&self, start: usize, out: &mut [u8]) -> usize {
        let Some(remaining) = self.pixels.get(start..) else {
            return 0;
        };

        let mut written = 0;
        for (color, chunk) in remaining
            .iter()
            .zip(out.chunks_exact_mut(WIRE_BYTES_PER_PIXEL))
        {
            let raw = RawU16::from(*color).into_inner();
            chunk.copy_from_slice(&raw.to_be_bytes());
            written += 1;
        }
        written
    }
}

impl OriginDimensions for FrameBuffer<'_> {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FrameBuffer<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Off-screen pixels are clipped
            if let Some(index) = self.index_of(point) {
                self.pixels[index] = color;
                self.dirty = true;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        self.dirty = true;
        Ok(())
    }
}
