//! Drawing and text metrics collaborators
//!
//! The toolkit decides what to draw and where; a [`Canvas`] supplied by the
//! host does the rasterizing.

use theme::Color;

use crate::element::Font;
use crate::layout::Bounds;

/// Image of known size, drawn by name
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub name: String,
    pub width: f32,
    pub height: f32,
}

impl Icon {
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self { name: name.into(), width, height }
    }
}

/// 2-D drawing surface
pub trait Canvas {
    fn fill_rect(&mut self, bounds: Bounds, z: f32, color: Color);

    /// One pixel outline
    fn stroke_rect(&mut self, bounds: Bounds, z: f32, color: Color);

    fn draw_text(&mut self, text: &str, x: f32, y: f32, z: f32, font: &Font, color: Color);

    fn draw_image(&mut self, icon: &Icon, x: f32, y: f32, z: f32);
}

/// Text width provider
pub trait TextMeasure {
    fn text_width(&self, font: &Font, text: &str) -> f32;
}

/// Monospace metrics: every character advances `ratio * font.size`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub ratio: f32,
}

impl FixedAdvance {
    pub fn new(ratio: f32) -> Self {
        Self { ratio }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl TextMeasure for FixedAdvance {
    fn text_width(&self, font: &Font, text: &str) -> f32 {
        text.chars().count() as f32 * font.size * self.ratio
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A recorded draw call
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Fill(Bounds, Color),
        Stroke(Bounds, Color),
        Text(String, f32, f32, Color),
        Image(String, f32, f32),
    }

    /// Canvas test double keeping every call in order
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub calls: Vec<DrawCall>,
    }

    impl Recorder {
        pub fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Text(text, ..) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn fills(&self) -> Vec<(Bounds, Color)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Fill(bounds, color) => Some((*bounds, *color)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Canvas for Recorder {
        fn fill_rect(&mut self, bounds: Bounds, _z: f32, color: Color) {
            self.calls.push(DrawCall::Fill(bounds, color));
        }

        fn stroke_rect(&mut self, bounds: Bounds, _z: f32, color: Color) {
            self.calls.push(DrawCall::Stroke(bounds, color));
        }

        fn draw_text(&mut self, text: &str, x: f32, y: f32, _z: f32, _font: &Font, color: Color) {
            self.calls.push(DrawCall::Text(text.to_string(), x, y, color));
        }

        fn draw_image(&mut self, icon: &Icon, x: f32, y: f32, _z: f32) {
            self.calls.push(DrawCall::Image(icon.name.clone(), x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_advance() {
        let metrics = FixedAdvance::default();
        assert_eq!(metrics.text_width(&Font::new("mono", 10.0), "abcd"), 20.0);
        assert_eq!(metrics.text_width(&Font::new("mono", 10.0), ""), 0.0);
        assert_eq!(FixedAdvance::new(1.0).text_width(&Font::new("mono", 8.0), "é!"), 16.0);
    }
}
