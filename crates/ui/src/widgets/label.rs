//! Labels and buttons

use theme::{Color, StyleSchema};

use crate::canvas::{Icon, TextMeasure};
use crate::component::{DrawCx, EventCx, LayoutCx, Widget};
use crate::element::Element;
use crate::event::{names, Event};
use crate::layout::Size;
use crate::style::ElementOptions;
use crate::{ElementId, Tree, UiError};

/// Text with an optional icon
#[derive(Debug, Clone)]
pub struct Label {
    kind: &'static str,
    pub text: String,
    pub icon: Option<Icon>,
    /// Text color
    pub color: Color,
    pub disabled_color: Color,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_kind("Label", text)
    }

    /// Label styled as a tool-tip
    pub fn tool_tip(text: impl Into<String>) -> Self {
        Self::with_kind("ToolTip", text)
    }

    pub(crate) fn with_kind(kind: &'static str, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            icon: None,
            color: Color::WHITE,
            disabled_color: Color::WHITE,
        }
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn create(mut self, tree: &mut Tree, options: &ElementOptions) -> Result<ElementId, UiError> {
        self.resolve(tree.schema(), options)?;
        tree.create(options, self)
    }

    /// Take text colors from `options`, falling back to the schema
    pub(crate) fn resolve(&mut self, schema: &StyleSchema, options: &ElementOptions) -> Result<(), UiError> {
        self.color = match options.color {
            Some(color) => color,
            None => schema.default_color(self.kind, &["color"])?,
        };
        self.disabled_color = schema.default_color(self.kind, &["disabled", "color"])?;
        Ok(())
    }

    /// Content size: icon, gap, text, and padding
    pub fn measure(&self, element: &Element, metrics: &dyn TextMeasure) -> Size {
        let padding = element.padding;
        let text_width = (!self.text.is_empty()).then(|| metrics.text_width(&element.font, &self.text));

        let (width, height) = match (&self.icon, text_width) {
            (Some(icon), Some(text_width)) => (
                icon.width + padding.left + text_width,
                icon.height.max(element.font.size),
            ),
            (Some(icon), None) => (icon.width, icon.height),
            (None, Some(text_width)) => (text_width, element.font.size),
            (None, None) => (0.0, 0.0),
        };

        Size::new(width + padding.horizontal(), height + padding.vertical())
    }

    pub(crate) fn apply_size(&self, cx: &mut LayoutCx<'_>) -> Result<(), UiError> {
        let size = self.measure(cx.element()?, cx.tree().metrics());
        let element = cx.element_mut()?;
        element.set_width(size.width);
        element.set_height(size.height);
        Ok(())
    }

    pub(crate) fn draw_content(&self, element: &Element, cx: &mut DrawCx<'_>) {
        let mut x = element.x() + element.padding.left;
        let y = element.y() + element.padding.top;

        if let Some(icon) = &self.icon {
            cx.canvas.draw_image(icon, x, y, element.z);
            x += icon.width + element.padding.left;
        }

        if !self.text.is_empty() {
            let color = if element.enabled { self.color } else { self.disabled_color };
            cx.canvas.draw_text(&self.text, x, y, element.z, &element.font, color);
        }
    }
}

impl Widget for Label {
    fn type_name(&self) -> &'static str {
        self.kind
    }

    fn layout(&mut self, cx: &mut LayoutCx<'_>) -> Result<(), UiError> {
        self.apply_size(cx)
    }

    fn label(&self) -> Option<&Label> {
        Some(self)
    }

    fn label_mut(&mut self) -> Option<&mut Label> {
        Some(self)
    }

    fn draw_foreground(&self, element: &Element, cx: &mut DrawCx<'_>) {
        self.draw_content(element, cx);
    }
}

/// Label with hover highlighting
#[derive(Debug, Clone)]
pub struct Button {
    pub label: Label,
    hovered: bool,
    background_color: Color,
    hover_color: Color,
    disabled_color: Color,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_kind("Button", text)
    }

    pub(crate) fn with_kind(kind: &'static str, text: impl Into<String>) -> Self {
        Self {
            label: Label::with_kind(kind, text),
            hovered: false,
            background_color: Color::TRANSPARENT,
            hover_color: Color::TRANSPARENT,
            disabled_color: Color::TRANSPARENT,
        }
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.label.icon = Some(icon);
        self
    }

    pub fn create(mut self, tree: &mut Tree, options: &ElementOptions) -> Result<ElementId, UiError> {
        self.resolve(tree.schema(), options)?;
        tree.create(options, self)
    }

    pub(crate) fn resolve(&mut self, schema: &StyleSchema, options: &ElementOptions) -> Result<(), UiError> {
        let kind = self.label.kind;
        self.label.resolve(schema, options)?;
        self.background_color = match options.background_color {
            Some(color) => color,
            None => schema.default_color(kind, &["background_color"])?,
        };
        self.hover_color = schema.default_color(kind, &["hover", "background_color"])?;
        self.disabled_color = schema.default_color(kind, &["disabled", "background_color"])?;
        Ok(())
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    fn current_background(&self, enabled: bool) -> Color {
        match (enabled, self.hovered) {
            (false, _) => self.disabled_color,
            (true, true) => self.hover_color,
            (true, false) => self.background_color,
        }
    }
}

impl Widget for Button {
    fn type_name(&self) -> &'static str {
        self.label.kind
    }

    fn main_event(&self) -> Option<&'static str> {
        Some(names::CLICKED_LEFT_MOUSE_BUTTON)
    }

    fn layout(&mut self, cx: &mut LayoutCx<'_>) -> Result<(), UiError> {
        self.label.apply_size(cx)
    }

    fn handle_event(&mut self, cx: &mut EventCx<'_>, event: &Event) -> Result<(), UiError> {
        let hovered = match event.name {
            names::ENTER => true,
            names::LEAVE => false,
            _ => return Ok(()),
        };

        self.hovered = hovered;
        let element = cx.element_mut()?;
        element.background_color = self.current_background(element.enabled);
        Ok(())
    }

    fn enabled_changed(&mut self, element: &mut Element) {
        if !element.enabled {
            self.hovered = false;
        }
        element.background_color = self.current_background(element.enabled);
    }

    fn label(&self) -> Option<&Label> {
        Some(&self.label)
    }

    fn label_mut(&mut self) -> Option<&mut Label> {
        Some(&mut self.label)
    }

    fn draw_foreground(&self, element: &Element, cx: &mut DrawCx<'_>) {
        self.label.draw_content(element, cx);
    }
}
