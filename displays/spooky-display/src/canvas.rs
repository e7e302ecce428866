//! Canvas widget
//!
//! Displays a caller-owned [`CanvasColor`] buffer at a fixed position.
//! The buffer is borrowed, never copied: whoever sets it must keep it
//! alive for as long as the canvas is drawn.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use spooky_core::{CanvasColor, CanvasError, CanvasSink, CanvasSize, PixelFormat};

/// Convert a canvas color to the panel's native 16-bit color
///
/// `Rgb888` buffers are truncated to 5/6/5 bits. `Rgb565` buffers already
/// carry native channel values; bits above the channel width are dropped.
pub fn to_rgb565(color: CanvasColor, format: PixelFormat) -> Rgb565 {
    match format {
        PixelFormat::Rgb888 => Rgb888::new(color.red, color.green, color.blue).into(),
        PixelFormat::Rgb565 => Rgb565::new(color.red & 0x1F, color.green & 0x3F, color.blue & 0x1F),
    }
}

/// Canvas showing a borrowed color buffer
#[derive(Debug, Clone, Copy)]
pub struct Canvas<'a> {
    buffer: Option<&'a [CanvasColor]>,
    size: CanvasSize,
    format: PixelFormat,
    position: Point,
}

impl Default for Canvas<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Canvas<'a> {
    /// Create a canvas with no buffer at the origin
    pub const fn new() -> Self {
        Self {
            buffer: None,
            size: CanvasSize::SPRITE,
            format: PixelFormat::Rgb888,
            position: Point::zero(),
        }
    }

    /// Move the canvas so its top-left corner is at `position`
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Area the canvas covers on screen
    pub fn area(&self) -> Rectangle {
        Rectangle::new(
            self.position,
            Size::new(self.size.width as u32, self.size.height as u32),
        )
    }

    /// Native color of the pixel at (x, y) relative to the canvas
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb565> {
        let buffer = self.buffer?;
        let index = self.size.index_of(x, y)?;
        buffer.get(index).map(|&c| to_rgb565(c, self.format))
    }
}

impl<'a> CanvasSink<'a> for Canvas<'a> {
    fn set_buffer(
        &mut self,
        buffer: &'a [CanvasColor],
        size: CanvasSize,
        format: PixelFormat,
    ) -> Result<(), CanvasError> {
        size.check_buffer(buffer.len())?;

        self.buffer = Some(buffer);
        self.size = size;
        self.format = format;
        Ok(())
    }

    fn buffer(&self) -> Option<&'a [CanvasColor]> {
        self.buffer
    }
}

impl Drawable for Canvas<'_> {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        // Nothing to show until a buffer is set
        let Some(buffer) = self.buffer else {
            return Ok(());
        };

        let format = self.format;
        target.fill_contiguous(
            &self.area(),
            buffer.iter().map(|&color| to_rgb565(color, format)),
        )
    }
}
