//! Element tree
//!
//! Arena of elements keyed by [`ElementId`]. A parent lists its children in
//! insertion order and each child stores its parent's id. Parentless nodes
//! (the root, menus, tool-tips) belong to whoever holds their id.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use anyhow::Context as _;
use smallvec::SmallVec;
use theme::{StyleConfig, StyleSchema};

use crate::canvas::{Canvas, Icon, TextMeasure};
use crate::component::{DrawCx, EventCx, LayoutCx, Widget};
use crate::element::Element;
use crate::event::{Event, EventArgs, EventBus, MouseButton};
use crate::style::ElementOptions;
use crate::surface::SurfaceRequest;
use crate::{ElementId, UiError};

/// Listener on tree events
pub type TreeListener = crate::event::Listener<Tree>;

struct Node {
    element: Element,
    /// `None` while one of the widget's hooks runs
    widget: Option<Box<dyn Widget>>,
    bus: EventBus<Tree>,
    parent: Option<ElementId>,
    children: SmallVec<[ElementId; 4]>,
}

/// Element arena
pub struct Tree {
    nodes: HashMap<ElementId, Node>,
    schema: Rc<StyleSchema>,
    metrics: Rc<dyn TextMeasure>,
    requests: Vec<SurfaceRequest>,
}

impl Tree {
    pub fn new(schema: Rc<StyleSchema>, metrics: Rc<dyn TextMeasure>) -> Self {
        Self {
            nodes: HashMap::new(),
            schema,
            metrics,
            requests: Vec::new(),
        }
    }

    pub fn schema(&self) -> &StyleSchema {
        &self.schema
    }

    /// Merge style overrides; applies to elements created afterwards
    pub fn merge_style(&mut self, config: &StyleConfig) -> Result<(), UiError> {
        Rc::make_mut(&mut self.schema).merge(config)?;
        Ok(())
    }

    /// Merge a `.json` or `.toml` style file
    pub fn merge_style_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let config = StyleConfig::from_file(path)?;
        self.merge_style(&config)
            .with_context(|| format!("applying style config {}", path.display()))
    }

    pub fn metrics(&self) -> &dyn TextMeasure {
        &*self.metrics
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn node(&self, id: ElementId) -> Result<&Node, UiError> {
        self.nodes.get(&id).ok_or(UiError::ElementNotFound(id))
    }

    fn node_mut(&mut self, id: ElementId) -> Result<&mut Node, UiError> {
        self.nodes.get_mut(&id).ok_or(UiError::ElementNotFound(id))
    }

    pub fn element(&self, id: ElementId) -> Result<&Element, UiError> {
        Ok(&self.node(id)?.element)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, UiError> {
        Ok(&mut self.node_mut(id)?.element)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    /// Children in layout order, empty for unknown ids
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes.get(&id).map_or(&[], |node| node.children.as_slice())
    }

    /// Is `id` the `ancestor` itself or one of its descendants?
    pub fn is_inside(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    fn dyn_widget(&self, id: ElementId) -> Result<&dyn Widget, UiError> {
        self.node(id)?.widget.as_deref().ok_or(UiError::WidgetBusy(id))
    }

    pub fn widget<W: Widget>(&self, id: ElementId) -> Result<&W, UiError> {
        let widget: &dyn Widget = self.dyn_widget(id)?;
        widget.as_any().downcast_ref::<W>().ok_or(UiError::WidgetMismatch {
            id,
            expected: std::any::type_name::<W>(),
        })
    }

    pub fn widget_mut<W: Widget>(&mut self, id: ElementId) -> Result<&mut W, UiError> {
        let widget: &mut dyn Widget = self
            .node_mut(id)?
            .widget
            .as_deref_mut()
            .ok_or(UiError::WidgetBusy(id))?;
        widget.as_any_mut().downcast_mut::<W>().ok_or(UiError::WidgetMismatch {
            id,
            expected: std::any::type_name::<W>(),
        })
    }

    fn restore_widget(&mut self, id: ElementId, widget: Box<dyn Widget>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.widget = Some(widget);
        }
    }

    /// Run `hook` with the widget taken out, then dispatch what it queued.
    /// `Ok(None)` if the element is gone, `WidgetBusy` if its hook is
    /// already running.
    fn run_hook<R>(
        &mut self,
        id: ElementId,
        hook: impl FnOnce(&mut dyn Widget, &mut EventCx<'_>) -> Result<R, UiError>,
    ) -> Result<Option<R>, UiError> {
        let Some(node) = self.nodes.get_mut(&id) else {
            return Ok(None);
        };
        let mut widget = node.widget.take().ok_or(UiError::WidgetBusy(id))?;

        let mut cx = EventCx::new(self, id);
        let result = hook(&mut *widget, &mut cx);
        let queued = cx.into_queue();
        self.restore_widget(id, widget);

        let value = result?;
        self.dispatch(queued)?;
        Ok(Some(value))
    }

    /// Run `f` against the widget of type `W` at `id`, with an [`EventCx`]
    pub fn with_widget<W: Widget, R>(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut W, &mut EventCx<'_>) -> Result<R, UiError>,
    ) -> Result<R, UiError> {
        self.node(id)?;
        self.run_hook(id, |widget, cx| match widget.as_any_mut().downcast_mut::<W>() {
            Some(widget) => f(widget, cx),
            None => Err(UiError::WidgetMismatch {
                id,
                expected: std::any::type_name::<W>(),
            }),
        })?
        .ok_or(UiError::ElementNotFound(id))
    }

    fn dispatch(&mut self, events: Vec<Event>) -> Result<(), UiError> {
        for event in events {
            if self.contains(event.sender) {
                self.publish(event.sender, event.name, event.args)?;
            }
        }
        Ok(())
    }

    /// Resolve `options` for the widget's type, insert, lay out, and attach
    /// to `options.parent` if set.
    pub fn create(&mut self, options: &ElementOptions, widget: impl Widget) -> Result<ElementId, UiError> {
        self.create_boxed(options, Box::new(widget))
    }

    pub fn create_boxed(
        &mut self,
        options: &ElementOptions,
        mut widget: Box<dyn Widget>,
    ) -> Result<ElementId, UiError> {
        if let Some(parent) = options.parent {
            self.node(parent)?;
        }

        let mut element = Element::resolve(widget.type_name(), options, &self.schema)?;
        if !element.enabled {
            widget.enabled_changed(&mut element);
        }
        let id = element.id();
        let bus = EventBus::new(widget.vocabulary());

        tracing::trace!("Created {} {:?}", element.type_name(), id);
        self.nodes.insert(
            id,
            Node {
                element,
                widget: Some(widget),
                bus,
                parent: None,
                children: SmallVec::new(),
            },
        );

        self.recalc(id)?;
        if let Some(parent) = options.parent {
            self.attach(id, parent)?;
        }

        Ok(id)
    }

    /// Append a parentless element to `parent`'s children
    pub fn attach(&mut self, id: ElementId, parent: ElementId) -> Result<(), UiError> {
        self.node(parent)?;
        if self.node(id)?.parent.is_some() {
            self.detach(id)?;
        }

        self.node_mut(id)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(id);
        self.recalc(parent)
    }

    /// Remove `id` from its parent, keeping the sub-tree alive
    pub fn detach(&mut self, id: ElementId) -> Result<(), UiError> {
        let Some(parent) = self.node_mut(id)?.parent.take() else {
            return Ok(());
        };

        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|child| *child != id);
            self.recalc(parent)?;
        }
        Ok(())
    }

    /// Detach and drop `id`, its descendants and the nodes they own
    pub fn destroy(&mut self, id: ElementId) -> Result<(), UiError> {
        self.detach(id)?;

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                pending.extend(node.children.iter().copied());
                if let Some(widget) = &node.widget {
                    pending.extend(widget.owned_nodes());
                }
            }
        }

        tracing::debug!("Destroyed element {:?}", id);
        Ok(())
    }

    /// Remove every child of `id`
    pub fn clear(&mut self, id: ElementId) -> Result<(), UiError> {
        for child in self.children(id).to_vec() {
            self.destroy(child)?;
        }
        Ok(())
    }

    /// Run the layout hook, then put back any fill stretch from the parent
    pub(crate) fn layout_node(&mut self, id: ElementId) -> Result<(), UiError> {
        let mut widget = self.node_mut(id)?.widget.take().ok_or(UiError::WidgetBusy(id))?;
        let result = widget.layout(&mut LayoutCx::new(self, id));
        self.restore_widget(id, widget);
        result?;

        self.element_mut(id)?.apply_stretch();
        Ok(())
    }

    /// Run the layout hook; if the size changed, recalc the parent too.
    /// A stretched element always goes back to its parent, which measures
    /// it unstretched.
    pub fn recalc(&mut self, id: ElementId) -> Result<(), UiError> {
        let before = self.element(id)?.size();
        self.layout_node(id)?;

        let element = self.element(id)?;
        if element.size() != before || element.is_stretched() {
            if let Some(parent) = self.parent(id) {
                self.recalc(parent)?;
            }
        }
        Ok(())
    }

    /// Move `id` to (x, y), carrying its descendants along
    pub fn set_position(&mut self, id: ElementId, x: f32, y: f32) -> Result<(), UiError> {
        let element = self.element_mut(id)?;
        let (dx, dy) = (x - element.x(), y - element.y());
        element.set_position(x, y);

        if dx != 0.0 || dy != 0.0 {
            let mut pending: Vec<ElementId> = self.children(id).to_vec();
            while let Some(current) = pending.pop() {
                if let Some(node) = self.nodes.get_mut(&current) {
                    node.element.translate(dx, dy);
                    pending.extend(node.children.iter().copied());
                }
            }
        }
        Ok(())
    }

    /// Replace the text of a label-based widget
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> Result<(), UiError> {
        let widget = self
            .node_mut(id)?
            .widget
            .as_deref_mut()
            .ok_or(UiError::WidgetBusy(id))?;
        let type_name = widget.type_name();
        let label = widget.label_mut().ok_or(UiError::WidgetMismatch { id, expected: type_name })?;
        label.text = text.into();
        self.recalc(id)
    }

    /// Replace the icon of a label-based widget
    pub fn set_icon(&mut self, id: ElementId, icon: Option<Icon>) -> Result<(), UiError> {
        let widget = self
            .node_mut(id)?
            .widget
            .as_deref_mut()
            .ok_or(UiError::WidgetBusy(id))?;
        let type_name = widget.type_name();
        let label = widget.label_mut().ok_or(UiError::WidgetMismatch { id, expected: type_name })?;
        label.icon = icon;
        self.recalc(id)
    }

    pub fn set_enabled(&mut self, id: ElementId, enabled: bool) -> Result<(), UiError> {
        let Node { element, widget, .. } = self.node_mut(id)?;
        if element.enabled != enabled {
            element.enabled = enabled;
            if let Some(widget) = widget {
                widget.enabled_changed(element);
            }
        }
        Ok(())
    }

    /// Text of a label-based widget
    pub fn text(&self, id: ElementId) -> Result<&str, UiError> {
        let widget = self.dyn_widget(id)?;
        widget
            .label()
            .map(|label| label.text.as_str())
            .ok_or(UiError::WidgetMismatch { id, expected: "Label" })
    }

    pub fn subscribe<F>(&mut self, id: ElementId, name: &str, listener: F) -> Result<(), UiError>
    where
        F: Fn(&mut Tree, &Event) -> Result<(), UiError> + 'static,
    {
        self.node_mut(id)?.bus.subscribe(name, listener)
    }

    /// Subscribe to the widget's main event
    pub fn on_main_event<F>(&mut self, id: ElementId, listener: F) -> Result<(), UiError>
    where
        F: Fn(&mut Tree, &Event) -> Result<(), UiError> + 'static,
    {
        let widget = self.dyn_widget(id)?;
        let name = widget.main_event().ok_or(UiError::NoMainEvent(widget.type_name()))?;
        self.subscribe(id, name, listener)
    }

    /// Publish on `id`: the widget's own reaction first, then the events it
    /// queued, then every listener in subscription order.
    pub fn publish(&mut self, id: ElementId, name: &str, args: EventArgs) -> Result<(), UiError> {
        let name = self.node(id)?.bus.check(name)?;
        let event = Event::new(id, name, args);

        self.run_hook(id, |widget, cx| widget.handle_event(cx, &event))?;

        let listeners = match self.nodes.get(&id) {
            Some(node) => node.bus.listeners(name),
            None => return Ok(()),
        };
        for listener in listeners {
            listener(self, &event)?;
        }
        Ok(())
    }

    pub(crate) fn request(&mut self, request: SurfaceRequest) {
        self.requests.push(request);
    }

    pub(crate) fn take_requests(&mut self) -> Vec<SurfaceRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Deepest element under (x, y) within `id`'s sub-tree, last child first
    pub fn hit_element(&self, id: ElementId, x: f32, y: f32) -> Option<ElementId> {
        let node = self.nodes.get(&id)?;
        for child in node.children.iter().rev() {
            if let Some(hit) = self.hit_element(*child, x, y) {
                return Some(hit);
            }
        }
        node.element.hit(x, y).then_some(id)
    }

    /// Per frame hook of `id` and its descendants
    pub fn update(&mut self, id: ElementId) -> Result<(), UiError> {
        self.run_hook(id, |widget, cx| widget.update(cx))?;
        for child in self.children(id).to_vec() {
            self.update(child)?;
        }
        Ok(())
    }

    /// Tool-tip text for `id`, empty for unknown ids
    pub fn tip(&self, id: ElementId) -> String {
        match self.nodes.get(&id) {
            Some(Node { element, widget: Some(widget), .. }) => widget.tip(&element.tip),
            Some(node) => node.element.tip.clone(),
            None => String::new(),
        }
    }

    pub fn draggable(&self, id: ElementId, button: MouseButton) -> bool {
        self.dyn_widget(id).is_ok_and(|widget| widget.draggable(button))
    }

    /// Draw `id` and its descendants
    pub fn draw(&self, id: ElementId, canvas: &mut dyn Canvas) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let element = &node.element;
        let bounds = element.bounds();
        let mut cx = DrawCx::new(canvas, self);

        if !element.background_color.is_transparent() {
            cx.canvas.fill_rect(bounds, element.z, element.background_color);
        }
        if let Some(widget) = &node.widget {
            widget.draw_background(element, &mut cx);
        }

        if !element.border_color.is_transparent() {
            cx.canvas.stroke_rect(bounds, element.z, element.border_color);
        }
        if let Some(widget) = &node.widget {
            widget.draw_border(element, &mut cx);
            widget.draw_foreground(element, &mut cx);
        }

        for child in &node.children {
            self.draw(*child, cx.canvas);
        }
    }
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("nodes", &self.nodes.len())
            .field("requests", &self.requests)
            .finish()
    }
}
