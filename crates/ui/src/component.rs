//! Component system
//!
//! A [`Widget`] is the behaviour attached to an element in the [`Tree`].
//! While one of its hooks runs, the widget is taken out of the tree, so the
//! hook receives a context giving mutable access to everything else.

use std::any::Any;

use theme::StyleSchema;

use crate::canvas::{Canvas, TextMeasure};
use crate::element::{Element, Font};
use crate::event::{Event, EventArgs, MouseButton, Vocabulary, BASE};
use crate::surface::SurfaceRequest;
use crate::widgets::Label;
use crate::{ElementId, Tree, UiError};

/// Downcasting support for widgets
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Widget behaviour
pub trait Widget: AsAny + 'static {
    /// Registered schema type
    fn type_name(&self) -> &'static str;

    /// Events the element handles
    fn vocabulary(&self) -> &'static Vocabulary {
        &BASE
    }

    /// Event subscribed to by [`Tree::on_main_event`]
    fn main_event(&self) -> Option<&'static str> {
        None
    }

    /// Recompute own size and, for containers, child positions
    fn layout(&mut self, _cx: &mut LayoutCx<'_>) -> Result<(), UiError> {
        Ok(())
    }

    /// Per frame hook
    fn update(&mut self, _cx: &mut EventCx<'_>) -> Result<(), UiError> {
        Ok(())
    }

    /// Built-in reaction, run before the element's listeners
    fn handle_event(&mut self, _cx: &mut EventCx<'_>, _event: &Event) -> Result<(), UiError> {
        Ok(())
    }

    fn draggable(&self, _button: MouseButton) -> bool {
        false
    }

    /// Tool-tip text, given the element's own tip
    fn tip(&self, base: &str) -> String {
        base.to_string()
    }

    fn label(&self) -> Option<&Label> {
        None
    }

    fn label_mut(&mut self) -> Option<&mut Label> {
        None
    }

    /// Called when the element is enabled or disabled, and at creation for
    /// elements created disabled
    fn enabled_changed(&mut self, _element: &mut Element) {}

    /// Parentless elements destroyed along with this one
    fn owned_nodes(&self) -> Vec<ElementId> {
        Vec::new()
    }

    fn draw_background(&self, _element: &Element, _cx: &mut DrawCx<'_>) {}

    fn draw_border(&self, _element: &Element, _cx: &mut DrawCx<'_>) {}

    fn draw_foreground(&self, _element: &Element, _cx: &mut DrawCx<'_>) {}
}

/// Context for [`Widget::layout`]
pub struct LayoutCx<'a> {
    tree: &'a mut Tree,
    id: ElementId,
}

impl<'a> LayoutCx<'a> {
    pub(crate) fn new(tree: &'a mut Tree, id: ElementId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn tree(&self) -> &Tree {
        &*self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut *self.tree
    }

    pub fn element(&self) -> Result<&Element, UiError> {
        self.tree.element(self.id)
    }

    pub fn element_mut(&mut self) -> Result<&mut Element, UiError> {
        self.tree.element_mut(self.id)
    }

    pub fn children(&self) -> Vec<ElementId> {
        self.tree.children(self.id).to_vec()
    }

    pub fn text_width(&self, font: &Font, text: &str) -> f32 {
        self.tree.metrics().text_width(font, text)
    }
}

/// Context for [`Widget::handle_event`] and [`Widget::update`].
///
/// Events published through it are queued and dispatched once the hook
/// returns and the widget is back in the tree.
pub struct EventCx<'a> {
    tree: &'a mut Tree,
    id: ElementId,
    queue: Vec<Event>,
}

impl<'a> EventCx<'a> {
    pub(crate) fn new(tree: &'a mut Tree, id: ElementId) -> Self {
        Self { tree, id, queue: Vec::new() }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn tree(&self) -> &Tree {
        &*self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut *self.tree
    }

    pub fn schema(&self) -> &StyleSchema {
        self.tree.schema()
    }

    pub fn element(&self) -> Result<&Element, UiError> {
        self.tree.element(self.id)
    }

    pub fn element_mut(&mut self) -> Result<&mut Element, UiError> {
        self.tree.element_mut(self.id)
    }

    /// Publish on this element
    pub fn publish(&mut self, name: &'static str, args: EventArgs) {
        self.queue.push(Event::new(self.id, name, args));
    }

    /// Publish on another element
    pub fn publish_to(&mut self, target: ElementId, name: &'static str, args: EventArgs) {
        self.queue.push(Event::new(target, name, args));
    }

    /// Ask the surface to show or hide a menu
    pub fn request(&mut self, request: SurfaceRequest) {
        self.tree.request(request);
    }

    pub(crate) fn into_queue(self) -> Vec<Event> {
        self.queue
    }
}

/// Context for the draw hooks
pub struct DrawCx<'a> {
    pub canvas: &'a mut dyn Canvas,
    tree: &'a Tree,
}

impl<'a> DrawCx<'a> {
    pub(crate) fn new(canvas: &'a mut dyn Canvas, tree: &'a Tree) -> Self {
        Self { canvas, tree }
    }

    pub fn tree(&self) -> &Tree {
        &*self.tree
    }

    pub fn text_width(&self, font: &Font, text: &str) -> f32 {
        self.tree.metrics().text_width(font, text)
    }
}
