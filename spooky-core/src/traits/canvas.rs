//! Canvas sink trait

use crate::canvas::{CanvasError, CanvasSize, PixelFormat};
use crate::pixel::CanvasColor;

/// Trait for rendering surfaces that display a caller-owned color buffer
///
/// The sink keeps a shared borrow of the buffer for `'a`, so the buffer
/// must outlive every draw that uses it.
pub trait CanvasSink<'a> {
    /// Hand a finished color buffer to the sink
    ///
    /// Fails if `buffer.len()` does not equal `size.pixel_count()` or the
    /// size is empty. On failure the previously set buffer stays active.
    fn set_buffer(
        &mut self,
        buffer: &'a [CanvasColor],
        size: CanvasSize,
        format: PixelFormat,
    ) -> Result<(), CanvasError>;

    /// Currently attached buffer, if any
    fn buffer(&self) -> Option<&'a [CanvasColor]>;
}
