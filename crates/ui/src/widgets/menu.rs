//! Pop-up menus

use crate::component::{DrawCx, EventCx, LayoutCx, Widget};
use crate::element::Element;
use crate::event::{names, Event, EventArgs, Vocabulary, BASE};
use crate::layout::Direction;
use crate::style::ElementOptions;
use crate::surface::SurfaceRequest;
use crate::widgets::label::{Button, Label};
use crate::widgets::packer::pack_linear;
use crate::{ElementId, Tree, UiError};

const TYPE_NAME: &str = "MenuPane";

static MENU_EVENTS: Vocabulary = Vocabulary::new(TYPE_NAME, &[names::SELECTED], Some(&BASE));

/// Parentless vertical list of items drawn above everything else.
///
/// Pressing an enabled item with either button publishes `selected` on the
/// pane with the item's value and asks the surface to hide the menu.
#[derive(Debug, Clone, Default)]
pub struct MenuPane {
    spacing: f32,
}

impl MenuPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the pane; `options.parent` is ignored and `z` is always +∞
    pub fn create(mut self, tree: &mut Tree, options: &ElementOptions) -> Result<ElementId, UiError> {
        self.spacing = tree.schema().default_f32(TYPE_NAME, &["spacing_v"])?;

        let mut options = options.clone();
        options.parent = None;
        options.z = f32::INFINITY;
        tree.create(&options, self)
    }

    pub fn add_item(
        tree: &mut Tree,
        pane: ElementId,
        text: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<ElementId, UiError> {
        Self::add(tree, pane, MenuItem::new(text, value), ElementOptions::new())
    }

    /// Add `item`, created with `options` under the pane
    pub fn add(
        tree: &mut Tree,
        pane: ElementId,
        item: MenuItem,
        options: ElementOptions,
    ) -> Result<ElementId, UiError> {
        let z = tree.element(pane)?.z;
        item.create(tree, &options.parent(pane).z(z))
    }

    pub fn add_separator(tree: &mut Tree, pane: ElementId) -> Result<ElementId, UiError> {
        Self::add(tree, pane, MenuItem::separator(), ElementOptions::new().enabled(false))
    }

    /// Items and separators in order
    pub fn items(tree: &Tree, pane: ElementId) -> &[ElementId] {
        tree.children(pane)
    }

    /// First item with `value`
    pub fn find(tree: &Tree, pane: ElementId, value: &str) -> Option<ElementId> {
        Self::index(tree, pane, value).map(|index| tree.children(pane)[index])
    }

    pub fn index(tree: &Tree, pane: ElementId, value: &str) -> Option<usize> {
        tree.children(pane).iter().position(|item| {
            tree.widget::<MenuItem>(*item)
                .is_ok_and(|item| !item.is_separator() && item.value() == value)
        })
    }
}

impl Widget for MenuPane {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn vocabulary(&self) -> &'static Vocabulary {
        &MENU_EVENTS
    }

    fn main_event(&self) -> Option<&'static str> {
        Some(names::SELECTED)
    }

    fn layout(&mut self, cx: &mut LayoutCx<'_>) -> Result<(), UiError> {
        pack_linear(cx, Direction::Vertical, self.spacing, true)
    }
}

/// Entry of a [`MenuPane`]: a button with a value and optional shortcut
/// text. A separator is a disabled item of fixed line height.
#[derive(Debug, Clone)]
pub struct MenuItem {
    button: Button,
    value: String,
    shortcut: String,
    line_height: Option<f32>,
}

impl MenuItem {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            button: Button::with_kind("MenuItem", text),
            value: value.into(),
            shortcut: String::new(),
            line_height: None,
        }
    }

    pub fn separator() -> Self {
        Self {
            button: Button::with_kind("Separator", ""),
            value: String::new(),
            shortcut: String::new(),
            line_height: None,
        }
    }

    /// Shortcut hint drawn right-aligned
    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = shortcut.into();
        self
    }

    pub fn create(mut self, tree: &mut Tree, options: &ElementOptions) -> Result<ElementId, UiError> {
        let schema = tree.schema();
        self.button.resolve(schema, options)?;
        if self.is_separator() {
            self.line_height = Some(schema.default_f32("Separator", &["line_height"])?);
        }
        tree.create(options, self)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_separator(&self) -> bool {
        self.button.type_name() == "Separator"
    }

    pub fn text(&self) -> &str {
        &self.button.label.text
    }

    fn shortcut_text(&self) -> String {
        format!("  {}", self.shortcut)
    }
}

impl Widget for MenuItem {
    fn type_name(&self) -> &'static str {
        self.button.type_name()
    }

    fn main_event(&self) -> Option<&'static str> {
        self.button.main_event()
    }

    fn layout(&mut self, cx: &mut LayoutCx<'_>) -> Result<(), UiError> {
        self.button.layout(cx)?;

        if let Some(line_height) = self.line_height {
            cx.element_mut()?.set_height(line_height);
        } else if !self.shortcut.is_empty() {
            let element = cx.element()?;
            let width = element.width() + cx.text_width(&element.font, &self.shortcut_text());
            cx.element_mut()?.set_width(width);
        }
        Ok(())
    }

    fn handle_event(&mut self, cx: &mut EventCx<'_>, event: &Event) -> Result<(), UiError> {
        self.button.handle_event(cx, event)?;

        if !matches!(event.name, names::LEFT_MOUSE_BUTTON | names::RIGHT_MOUSE_BUTTON) {
            return Ok(());
        }
        if !cx.element()?.enabled {
            return Ok(());
        }
        if let Some(pane) = cx.tree().parent(cx.id()) {
            cx.publish_to(pane, names::SELECTED, EventArgs::Text(self.value.clone()));
        }
        cx.request(SurfaceRequest::HideMenu);
        Ok(())
    }

    fn enabled_changed(&mut self, element: &mut Element) {
        self.button.enabled_changed(element);
    }

    fn label(&self) -> Option<&Label> {
        Some(&self.button.label)
    }

    fn label_mut(&mut self) -> Option<&mut Label> {
        Some(&mut self.button.label)
    }

    fn draw_foreground(&self, element: &Element, cx: &mut DrawCx<'_>) {
        self.button.draw_foreground(element, cx);

        if !self.shortcut.is_empty() {
            let width = cx.text_width(&element.font, &self.shortcut);
            let x = element.bounds().right() - element.padding.right - width;
            let y = element.y() + ((element.height() - element.font.size) / 2.0).floor();
            let color = if element.enabled { self.button.label.color } else { self.button.label.disabled_color };
            cx.canvas.draw_text(&self.shortcut, x, y, element.z, &element.font, color);
        }
    }
}
