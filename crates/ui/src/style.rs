//! Styling system
//!
//! [`ElementOptions`] is the construction contract of every element: any
//! option left unset is resolved through the style schema for the concrete
//! element type. The base schema ships with this crate.

use serde::Deserialize;
use theme::{Color, StyleConfig, StyleSchema};

use crate::{ElementId, UiError};

/// Base style configuration
pub const DEFAULT_SCHEMA: &str = include_str!("../config/default_schema.json");

/// Element type hierarchy, as (type, supertype), supertypes first
pub const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("Container", "Element"),
    ("Packer", "Container"),
    ("VerticalPacker", "Packer"),
    ("HorizontalPacker", "Packer"),
    ("GridPacker", "Packer"),
    ("Composite", "Packer"),
    ("Slider", "Composite"),
    ("MenuPane", "Composite"),
    ("ColorPicker", "Composite"),
    ("Label", "Element"),
    ("Button", "Label"),
    ("ComboBox", "Button"),
    ("MenuItem", "Button"),
    ("Separator", "MenuItem"),
    ("ToolTip", "Label"),
    ("SliderHandle", "Element"),
];

/// Register every built-in element type
pub fn register_builtin_types(schema: &mut StyleSchema) -> Result<(), UiError> {
    for (name, supertype) in BUILTIN_TYPES {
        schema.register_type(name, supertype)?;
    }
    Ok(())
}

/// Schema with the built-in types and the base configuration
pub fn default_schema() -> Result<StyleSchema, UiError> {
    let config = serde_json::from_str::<StyleConfig>(DEFAULT_SCHEMA)
        .map_err(|e| theme::StyleError::Parse(e.to_string()))?;

    let mut schema = StyleSchema::new();
    register_builtin_types(&mut schema)?;
    schema.merge(&config)?;
    Ok(schema)
}

/// Alignment option: one token for both axes, or `[vertical, horizontal]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AlignSpec {
    Both(String),
    Pair([String; 2]),
}

impl AlignSpec {
    pub fn vertical(&self) -> &str {
        match self {
            Self::Both(value) => value,
            Self::Pair([vertical, _]) => vertical,
        }
    }

    pub fn horizontal(&self) -> &str {
        match self {
            Self::Both(value) => value,
            Self::Pair([_, horizontal]) => horizontal,
        }
    }
}

impl From<&str> for AlignSpec {
    fn from(value: &str) -> Self {
        Self::Both(value.to_string())
    }
}

impl From<[&str; 2]> for AlignSpec {
    fn from([vertical, horizontal]: [&str; 2]) -> Self {
        Self::Pair([vertical.to_string(), horizontal.to_string()])
    }
}

/// Element construction options
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ElementOptions {
    /// Container to attach the new element to
    #[serde(skip)]
    pub parent: Option<ElementId>,

    pub x: f32,
    pub y: f32,
    pub z: f32,

    pub width: Option<f32>,
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    pub height: Option<f32>,
    pub min_height: Option<f32>,
    pub max_height: Option<f32>,

    pub align: Option<AlignSpec>,
    pub align_h: Option<String>,
    pub align_v: Option<String>,

    pub tip: Option<String>,
    pub font_name: Option<String>,
    pub font_size: Option<f32>,

    pub background_color: Option<Color>,
    pub border_color: Option<Color>,
    /// Text color, for labels
    pub color: Option<Color>,

    pub padding: Option<f32>,
    pub padding_h: Option<f32>,
    pub padding_v: Option<f32>,
    pub padding_top: Option<f32>,
    pub padding_right: Option<f32>,
    pub padding_bottom: Option<f32>,
    pub padding_left: Option<f32>,

    pub enabled: Option<bool>,
}

impl ElementOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn parent(mut self, parent: ElementId) -> Self { self.parent = Some(parent); self }

    // Position
    pub fn position(mut self, x: f32, y: f32) -> Self { self.x = x; self.y = y; self }
    pub fn z(mut self, z: f32) -> Self { self.z = z; self }

    // Size
    pub fn width(mut self, w: f32) -> Self { self.width = Some(w); self }
    pub fn height(mut self, h: f32) -> Self { self.height = Some(h); self }
    pub fn size(self, w: f32, h: f32) -> Self { self.width(w).height(h) }
    pub fn min_width(mut self, w: f32) -> Self { self.min_width = Some(w); self }
    pub fn max_width(mut self, w: f32) -> Self { self.max_width = Some(w); self }
    pub fn min_height(mut self, h: f32) -> Self { self.min_height = Some(h); self }
    pub fn max_height(mut self, h: f32) -> Self { self.max_height = Some(h); self }

    // Alignment
    pub fn align(mut self, a: impl Into<AlignSpec>) -> Self { self.align = Some(a.into()); self }
    pub fn align_h(mut self, a: &str) -> Self { self.align_h = Some(a.to_string()); self }
    pub fn align_v(mut self, a: &str) -> Self { self.align_v = Some(a.to_string()); self }

    // Text
    pub fn tip(mut self, tip: impl Into<String>) -> Self { self.tip = Some(tip.into()); self }
    pub fn font_name(mut self, name: impl Into<String>) -> Self { self.font_name = Some(name.into()); self }
    pub fn font_size(mut self, size: f32) -> Self { self.font_size = Some(size); self }

    // Visual
    pub fn background_color(mut self, c: Color) -> Self { self.background_color = Some(c); self }
    pub fn border_color(mut self, c: Color) -> Self { self.border_color = Some(c); self }
    pub fn color(mut self, c: Color) -> Self { self.color = Some(c); self }

    // Spacing
    pub fn padding(mut self, p: f32) -> Self { self.padding = Some(p); self }
    pub fn padding_h(mut self, p: f32) -> Self { self.padding_h = Some(p); self }
    pub fn padding_v(mut self, p: f32) -> Self { self.padding_v = Some(p); self }
    pub fn padding_top(mut self, p: f32) -> Self { self.padding_top = Some(p); self }
    pub fn padding_right(mut self, p: f32) -> Self { self.padding_right = Some(p); self }
    pub fn padding_bottom(mut self, p: f32) -> Self { self.padding_bottom = Some(p); self }
    pub fn padding_left(mut self, p: f32) -> Self { self.padding_left = Some(p); self }

    pub fn enabled(mut self, enabled: bool) -> Self { self.enabled = Some(enabled); self }

    pub(crate) fn horizontal_align(&self) -> Option<&str> {
        self.align_h.as_deref().or_else(|| self.align.as_ref().map(|a| a.horizontal()))
    }

    pub(crate) fn vertical_align(&self) -> Option<&str> {
        self.align_v.as_deref().or_else(|| self.align.as_ref().map(|a| a.vertical()))
    }

    // Most specific padding option wins
    pub(crate) fn top_padding(&self) -> Option<f32> {
        self.padding_top.or(self.padding_v).or(self.padding)
    }

    pub(crate) fn right_padding(&self) -> Option<f32> {
        self.padding_right.or(self.padding_h).or(self.padding)
    }

    pub(crate) fn bottom_padding(&self) -> Option<f32> {
        self.padding_bottom.or(self.padding_v).or(self.padding)
    }

    pub(crate) fn left_padding(&self) -> Option<f32> {
        self.padding_left.or(self.padding_h).or(self.padding)
    }
}
