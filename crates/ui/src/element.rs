//! UI elements
//!
//! Geometry and styling state shared by every widget. Sizes are clamped
//! into their `[min, max]` range on every assignment; if the range is
//! inverted the minimum wins.

use std::sync::atomic::{AtomicU64, Ordering};

use theme::{Color, StyleSchema};

use crate::layout::{Align, Bounds, Direction, Edge, Size};
use crate::style::ElementOptions;
use crate::UiError;

/// Element ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl ElementId {
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

/// Font selection; glyph metrics come from a [`crate::TextMeasure`]
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub name: String,
    pub size: f32,
}

impl Font {
    pub fn new(name: impl Into<String>, size: f32) -> Self {
        Self { name: name.into(), size }
    }
}

/// Clamp into `[min, max]`, min winning over an inverted range
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Extent a parent's `fill` alignment imposed, and the size it replaced
#[derive(Debug, Clone, Copy, PartialEq)]
struct Stretch {
    extent: f32,
    natural: f32,
}

/// UI Element
#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    type_name: &'static str,
    x: f32,
    y: f32,
    /// Draw order hint passed through to the canvas
    pub z: f32,
    width: f32,
    height: f32,
    min_width: f32,
    max_width: f32,
    min_height: f32,
    max_height: f32,
    pub align_h: Align,
    pub align_v: Align,
    pub padding: Edge,
    pub enabled: bool,
    pub background_color: Color,
    pub border_color: Color,
    /// Tool-tip text
    pub tip: String,
    pub font: Font,
    stretch_width: Option<Stretch>,
    stretch_height: Option<Stretch>,
}

impl Element {
    /// Build an element of `type_name`, taking every unset option from the
    /// schema defaults for that type.
    pub fn resolve(
        type_name: &'static str,
        options: &ElementOptions,
        schema: &StyleSchema,
    ) -> Result<Self, UiError> {
        let number = |key: &str| schema.default_f32(type_name, &[key]);
        let optional = |key: &str| -> Result<Option<f32>, UiError> {
            Ok(schema.get(type_name, &[key])?.and_then(|v| v.as_f32()))
        };

        let align_h = match options.horizontal_align() {
            Some(value) => Align::parse_horizontal(value)?,
            None => Align::parse_horizontal(&schema.default_text(type_name, &["align_h"])?)?,
        };
        let align_v = match options.vertical_align() {
            Some(value) => Align::parse_vertical(value)?,
            None => Align::parse_vertical(&schema.default_text(type_name, &["align_v"])?)?,
        };

        let width = match options.width {
            Some(width) => Some(width),
            None => optional("width")?,
        };
        let height = match options.height {
            Some(height) => Some(height),
            None => optional("height")?,
        };

        let padding = Edge {
            top: match options.top_padding() {
                Some(p) => p,
                None => number("padding_top")?,
            },
            right: match options.right_padding() {
                Some(p) => p,
                None => number("padding_right")?,
            },
            bottom: match options.bottom_padding() {
                Some(p) => p,
                None => number("padding_bottom")?,
            },
            left: match options.left_padding() {
                Some(p) => p,
                None => number("padding_left")?,
            },
        };

        let font = Font {
            name: match &options.font_name {
                Some(name) => name.clone(),
                None => schema.default_text(type_name, &["font_name"])?,
            },
            size: match options.font_size {
                Some(size) => size,
                None => number("font_size")?,
            },
        };

        let background_color = match options.background_color {
            Some(color) => color,
            None => schema.default_color(type_name, &["background_color"])?,
        };
        let border_color = match options.border_color {
            Some(color) => color,
            None => schema.default_color(type_name, &["border_color"])?,
        };

        let mut element = Self {
            id: ElementId::new(),
            type_name,
            x: options.x,
            y: options.y,
            z: options.z,
            width: 0.0,
            height: 0.0,
            min_width: options.min_width.or(width).unwrap_or(0.0),
            max_width: options.max_width.or(width).unwrap_or(f32::INFINITY),
            min_height: options.min_height.or(height).unwrap_or(0.0),
            max_height: options.max_height.or(height).unwrap_or(f32::INFINITY),
            align_h,
            align_v,
            padding,
            enabled: options.enabled.unwrap_or(true),
            background_color,
            border_color,
            tip: options.tip.clone().unwrap_or_default(),
            font,
            stretch_width: None,
            stretch_height: None,
        };
        element.set_width(width.unwrap_or(0.0));
        element.set_height(height.unwrap_or(0.0));

        Ok(element)
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Schema type this element was resolved as
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn min_width(&self) -> f32 {
        self.min_width
    }

    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Set the width, clamped into `[min_width, max_width]`
    pub fn set_width(&mut self, width: f32) {
        self.width = clamp(width, self.min_width, self.max_width);
    }

    /// Set the height, clamped into `[min_height, max_height]`
    pub fn set_height(&mut self, height: f32) {
        self.height = clamp(height, self.min_height, self.max_height);
    }

    /// Fill the cross axis of a `direction` packer with `extent`
    pub(crate) fn stretch_across(&mut self, direction: Direction, extent: f32) {
        match direction {
            Direction::Vertical => {
                let natural = self.stretch_width.map_or(self.width, |s| s.natural);
                self.stretch_width = Some(Stretch { extent, natural });
                self.set_width(extent);
            }
            Direction::Horizontal => {
                let natural = self.stretch_height.map_or(self.height, |s| s.natural);
                self.stretch_height = Some(Stretch { extent, natural });
                self.set_height(extent);
            }
        }
    }

    /// Drop any stretch, going back to the size held before it
    pub(crate) fn unstretch(&mut self) {
        if let Some(stretch) = self.stretch_width.take() {
            self.set_width(stretch.natural);
        }
        if let Some(stretch) = self.stretch_height.take() {
            self.set_height(stretch.natural);
        }
    }

    /// Put the stretched extent back after a layout pass resized the element
    pub(crate) fn apply_stretch(&mut self) {
        if let Some(stretch) = self.stretch_width {
            self.set_width(stretch.extent);
        }
        if let Some(stretch) = self.stretch_height {
            self.set_height(stretch.extent);
        }
    }

    /// Is a parent currently filling this element across its axis?
    pub fn is_stretched(&self) -> bool {
        self.stretch_width.is_some() || self.stretch_height.is_some()
    }

    /// Move this element only; use [`crate::Tree::set_position`] to carry
    /// children along.
    pub(crate) fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub(crate) fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Is the point inside `[x, x + width) x [y, y + height)`?
    pub fn hit(&self, px: f32, py: f32) -> bool {
        self.bounds().contains(px, py)
    }
}
