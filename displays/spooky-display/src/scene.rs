//! Demo scene layout
//!
//! The scene is a label centered on the screen with the canvas aligned
//! below it:
//! ```text
//! ┌──────────────────────────────┐
//! │                              │
//! │ Spooky says: Hello from Rust!│  <- label, centered
//! │              ↕ gap           │
//! │             ┌──┐             │
//! │             └──┘             │  <- canvas, centered on the label
//! │                              │
//! └──────────────────────────────┘
//! ```

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use spooky_core::config::DemoConfig;
use spooky_core::{CanvasColor, CanvasError, CanvasSink, CanvasSize, PixelFormat};

use crate::canvas::Canvas;
use crate::label::Label;

/// Label plus canvas, laid out for a screen of known size
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    screen: Size,
    label: Label,
    canvas: Canvas<'a>,
    canvas_size: CanvasSize,
    gap: u16,
}

impl<'a> Scene<'a> {
    /// Lay out a scene on a `screen`-sized display
    pub fn new(screen: Size, label_text: &str, canvas_size: CanvasSize, gap: u16) -> Self {
        let mut scene = Self {
            screen,
            label: Label::new(label_text),
            canvas: Canvas::new(),
            canvas_size,
            gap,
        };
        scene.layout();
        scene
    }

    /// Lay out the scene described by a demo configuration
    pub fn from_config(config: &DemoConfig) -> Self {
        let screen = Size::new(config.display.width as u32, config.display.height as u32);
        Self::new(
            screen,
            config.demo.label.as_str(),
            config.canvas.size(),
            config.canvas.gap,
        )
    }

    fn layout(&mut self) {
        let label_size = self.label.size();
        let label_pos = Point::new(
            centered(self.screen.width, label_size.width),
            centered(self.screen.height, label_size.height),
        );
        self.label.set_position(label_pos);

        // Below the label, sharing its horizontal center
        let canvas_pos = Point::new(
            label_pos.x + label_size.width as i32 / 2 - self.canvas_size.width as i32 / 2,
            label_pos.y + label_size.height as i32 + self.gap as i32,
        );
        self.canvas.set_position(canvas_pos);
    }

    /// Attach the color buffer the canvas displays
    ///
    /// The buffer must hold exactly one pixel per canvas pixel.
    pub fn attach(
        &mut self,
        buffer: &'a [CanvasColor],
        format: PixelFormat,
    ) -> Result<(), CanvasError> {
        self.canvas.set_buffer(buffer, self.canvas_size, format)
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn canvas(&self) -> &Canvas<'a> {
        &self.canvas
    }

    pub fn label_bounds(&self) -> Rectangle {
        self.label.bounding_box()
    }

    pub fn canvas_origin(&self) -> Point {
        self.canvas.position()
    }

    /// Smallest rectangle covering label and canvas
    pub fn bounding_box(&self) -> Rectangle {
        let label = self.label.bounding_box();
        let canvas = self.canvas.area();

        let top_left = Point::new(
            label.top_left.x.min(canvas.top_left.x),
            label.top_left.y.min(canvas.top_left.y),
        );
        let bottom_right = Point::new(
            (label.top_left.x + label.size.width as i32).max(canvas.top_left.x + canvas.size.width as i32),
            (label.top_left.y + label.size.height as i32).max(canvas.top_left.y + canvas.size.height as i32),
        );
        Rectangle::with_corners(top_left, bottom_right - Point::new(1, 1))
    }
}

fn centered(outer: u32, inner: u32) -> i32 {
    (outer as i32 - inner as i32) / 2
}

impl Drawable for Scene<'_> {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.label.draw(target)?;
        self.canvas.draw(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use spooky_assets::AssetStore;
    use spooky_core::{AssetSource, ColorBuffer, SPRITE_PIXELS};

    #[test]
    fn test_default_layout_on_240x240() {
        let scene = Scene::from_config(&DemoConfig::default());

        // 29 glyphs of 6x10
        assert_eq!(
            scene.label_bounds(),
            Rectangle::new(Point::new(33, 115), Size::new(174, 10))
        );
        // Centered under the label, 10 px below it
        assert_eq!(scene.canvas_origin(), Point::new(112, 135));
        assert_eq!(
            scene.bounding_box(),
            Rectangle::new(Point::new(33, 115), Size::new(174, 36))
        );
    }

    #[test]
    fn test_attach_requires_matching_buffer() {
        let buffer = [CanvasColor::BLACK; 8];
        let mut scene = Scene::new(Size::new(64, 64), "Boo", CanvasSize::new(4, 4), 2);

        assert_eq!(
            scene.attach(&buffer, PixelFormat::Rgb888),
            Err(CanvasError::SizeMismatch {
                expected: 16,
                actual: 8
            })
        );
        assert_eq!(scene.canvas().buffer(), None);
    }

    #[test]
    fn test_draw_places_canvas_below_label() {
        let buffer = [
            CanvasColor::new(255, 0, 0),
            CanvasColor::new(0, 255, 0),
            CanvasColor::new(0, 0, 255),
            CanvasColor::new(255, 255, 255),
        ];
        let mut scene = Scene::new(Size::new(64, 64), "Boo", CanvasSize::new(2, 2), 3);
        scene.attach(&buffer, PixelFormat::Rgb888).unwrap();

        // "Boo" is 18x10 at (23, 27); canvas at (23 + 9 - 1, 27 + 10 + 3)
        assert_eq!(scene.canvas_origin(), Point::new(31, 40));

        let mut display = MockDisplay::<Rgb565>::new();
        scene.draw(&mut display).unwrap();

        assert_eq!(display.get_pixel(Point::new(31, 40)), Some(Rgb565::RED));
        assert_eq!(display.get_pixel(Point::new(32, 40)), Some(Rgb565::GREEN));
        assert_eq!(display.get_pixel(Point::new(31, 41)), Some(Rgb565::BLUE));
        assert_eq!(display.get_pixel(Point::new(32, 41)), Some(Rgb565::WHITE));
        // Gap between label and canvas stays untouched
        for y in 37..40 {
            assert_eq!(display.get_pixel(Point::new(31, y)), None);
        }
    }

    #[test]
    fn test_sprite_scene_end_to_end() {
        let mut store = AssetStore::new();
        store.load();
        let buffer = ColorBuffer::<SPRITE_PIXELS>::convert(store.raw("ghost1")).unwrap();

        let mut scene = Scene::new(Size::new(64, 64), "Boo", CanvasSize::SPRITE, 2);
        scene.attach(buffer.as_slice(), store.format()).unwrap();

        let mut display = MockDisplay::<Rgb565>::new();
        scene.draw(&mut display).unwrap();

        let origin = scene.canvas_origin();
        // Left pupil of the ghost at sprite (6, 5)
        let pupil = display.get_pixel(origin + Point::new(6, 5)).unwrap();
        assert_eq!(pupil, scene.canvas().pixel(6, 5).unwrap());
        assert_ne!(pupil, Rgb565::BLACK);
    }
}
