//! Text label widget

use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use spooky_core::config::MAX_LABEL_LEN;

/// Font used for labels
pub const LABEL_FONT: &MonoFont<'static> = &FONT_6X10;

/// Single-line text label
#[derive(Debug, Clone)]
pub struct Label {
    text: String<MAX_LABEL_LEN>,
    position: Point,
    color: Rgb565,
}

impl Label {
    /// Create a white label at the origin
    ///
    /// Text longer than [`MAX_LABEL_LEN`] bytes is truncated.
    pub fn new(text: &str) -> Self {
        let mut label = Self {
            text: String::new(),
            position: Point::zero(),
            color: Rgb565::WHITE,
        };
        label.set_text(text);
        label
    }

    /// Replace the label text, truncating to capacity
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn set_color(&mut self, color: Rgb565) {
        self.color = color;
    }

    /// Move the label so its top-left corner is at `position`
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Size of the rendered text
    pub fn size(&self) -> Size {
        let glyph = LABEL_FONT.character_size;
        let spacing = LABEL_FONT.character_spacing;
        let count = self.text.chars().count() as u32;
        let width = if count == 0 {
            0
        } else {
            count * glyph.width + (count - 1) * spacing
        };
        Size::new(width, glyph.height)
    }

    /// Area the label covers on screen
    pub fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.position, self.size())
    }

    fn styled(&self) -> Text<'_, MonoTextStyle<'static, Rgb565>> {
        let style = MonoTextStyle::new(LABEL_FONT, self.color);
        Text::with_baseline(self.text.as_str(), self.position, style, Baseline::Top)
    }
}

impl Drawable for Label {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.styled().draw(target).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::primitives::ContainsPoint;

    #[test]
    fn test_size_matches_rendered_text() {
        let label = Label::new("Boo!");
        assert_eq!(label.size(), Size::new(24, 10));
        assert_eq!(label.styled().bounding_box(), label.bounding_box());

        assert_eq!(Label::new("").size(), Size::new(0, 10));
    }

    #[test]
    fn test_text_is_truncated_to_capacity() {
        let long = "ghost ".repeat(20);
        let label = Label::new(&long);
        assert_eq!(label.text().len(), MAX_LABEL_LEN);
        assert!(long.starts_with(label.text()));
    }

    #[test]
    fn test_draw_stays_inside_bounding_box() {
        let mut label = Label::new("Hi");
        label.set_position(Point::new(3, 2));

        let mut display = MockDisplay::<Rgb565>::new();
        label.draw(&mut display).unwrap();

        let drawn = display.affected_area();
        let bounds = label.bounding_box();
        assert!(drawn.size.width > 0);
        assert!(bounds.contains(drawn.top_left));
        assert!(bounds.contains(drawn.bottom_right().unwrap()));
    }
}
