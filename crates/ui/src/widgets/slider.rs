//! Slider and its draggable handle

use theme::Color;

use crate::component::{DrawCx, EventCx, LayoutCx, Widget};
use crate::element::Element;
use crate::event::{names, Event, EventArgs, MouseButton, Vocabulary, BASE};
use crate::layout::Bounds;
use crate::style::ElementOptions;
use crate::{ElementId, Tree, UiError};

const TYPE_NAME: &str = "Slider";

static SLIDER_EVENTS: Vocabulary = Vocabulary::new(TYPE_NAME, &[names::CHANGED], Some(&BASE));

static HANDLE_EVENTS: Vocabulary = Vocabulary::new(
    "SliderHandle",
    &[names::BEGIN_DRAG, names::UPDATE_DRAG, names::END_DRAG],
    Some(&BASE),
);

/// How slider values are rounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stepping {
    #[default]
    Continuous,
    Integer,
}

/// Value picker over a range; the handle is the slider's only child
#[derive(Debug, Clone)]
pub struct Slider {
    min: f64,
    max: f64,
    value: f64,
    stepping: Stepping,
    groove_color: Color,
    groove_thickness: f32,
    handle_width: f32,
}

impl Slider {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            value: min,
            stepping: Stepping::Continuous,
            groove_color: Color::TRANSPARENT,
            groove_thickness: 0.0,
            handle_width: 0.0,
        }
    }

    pub fn stepping(mut self, stepping: Stepping) -> Self {
        self.stepping = stepping;
        self
    }

    /// Initial value
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn create(mut self, tree: &mut Tree, options: &ElementOptions) -> Result<ElementId, UiError> {
        let schema = tree.schema();
        self.groove_color = schema.default_color(TYPE_NAME, &["groove_color"])?;
        self.groove_thickness = schema.default_f32(TYPE_NAME, &["groove_thickness"])?;
        let handle_color = schema.default_color(TYPE_NAME, &["handle_color"])?;

        let initial = self.value;
        let id = tree.create(options, self)?;

        let element = tree.element(id)?;
        let handle_width = element.height() / 2.0 - element.padding.left;
        let handle_options = ElementOptions::new()
            .parent(id)
            .z(element.z)
            .size(handle_width, element.height() - element.padding.vertical())
            .background_color(handle_color);
        tree.create(&handle_options, SliderHandle::default())?;

        tree.with_widget::<Slider, _>(id, |slider, cx| {
            slider.handle_width = handle_width;
            slider.set_value(cx, initial)
        })?;
        Ok(id)
    }

    /// Set the value of the slider at `id`
    pub fn set(tree: &mut Tree, id: ElementId, value: f64) -> Result<(), UiError> {
        tree.with_widget::<Slider, _>(id, |slider, cx| slider.set_value(cx, value))
    }

    pub fn get_value(&self) -> f64 {
        self.value
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Round and clamp `value`, move the handle, and publish `changed`
    pub fn set_value(&mut self, cx: &mut EventCx<'_>, value: f64) -> Result<(), UiError> {
        let value = match self.stepping {
            Stepping::Continuous => value,
            Stepping::Integer => value.round(),
        };
        self.value = value.min(self.max).max(self.min);

        self.place_handle(cx)?;
        cx.publish(names::CHANGED, EventArgs::Value(self.value));
        Ok(())
    }

    fn handle(&self, cx: &EventCx<'_>) -> Option<ElementId> {
        cx.tree().children(cx.id()).first().copied()
    }

    fn fraction(&self) -> f64 {
        if self.max > self.min {
            (self.value - self.min) / (self.max - self.min)
        } else {
            0.0
        }
    }

    /// Value for a handle whose left edge is at `left`
    fn value_at(&self, element: &Element, left: f32) -> f64 {
        let travel = element.width() - self.handle_width;
        if travel <= 0.0 {
            return self.min;
        }
        // measured from x, not x + padding.left as in place_handle
        f64::from((left - element.x()) / travel) * (self.max - self.min) + self.min
    }

    fn place_handle(&self, cx: &mut EventCx<'_>) -> Result<(), UiError> {
        let Some(handle) = self.handle(cx) else {
            return Ok(());
        };

        let element = cx.element()?;
        let travel = element.width() - self.handle_width;
        let x = element.x() + element.padding.left + travel * self.fraction() as f32;
        let y = element.y() + element.padding.top;
        cx.tree_mut().set_position(handle, x, y)
    }

    /// Move the handle's left edge to `left`
    fn dragged_to(&mut self, cx: &mut EventCx<'_>, left: f32) -> Result<(), UiError> {
        let value = self.value_at(cx.element()?, left);
        self.set_value(cx, value)
    }
}

impl Widget for Slider {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn vocabulary(&self) -> &'static Vocabulary {
        &SLIDER_EVENTS
    }

    fn main_event(&self) -> Option<&'static str> {
        Some(names::CHANGED)
    }

    // Keeps its own size; the handle is placed by value
    fn layout(&mut self, _cx: &mut LayoutCx<'_>) -> Result<(), UiError> {
        Ok(())
    }

    fn update(&mut self, cx: &mut EventCx<'_>) -> Result<(), UiError> {
        self.place_handle(cx)
    }

    fn handle_event(&mut self, cx: &mut EventCx<'_>, event: &Event) -> Result<(), UiError> {
        if event.name != names::LEFT_MOUSE_BUTTON {
            return Ok(());
        }
        match event.args.pointer() {
            // centre the handle on the pointer
            Some((x, _)) => self.dragged_to(cx, x - self.handle_width / 2.0),
            None => Ok(()),
        }
    }

    fn tip(&self, base: &str) -> String {
        let value = match self.stepping {
            Stepping::Continuous => self.value.to_string(),
            Stepping::Integer => format!("{}", self.value as i64),
        };
        if base.is_empty() {
            value
        } else {
            format!("{base}: {value}")
        }
    }

    fn draw_background(&self, element: &Element, cx: &mut DrawCx<'_>) {
        let groove = Bounds::new(
            element.x() + self.handle_width / 2.0,
            element.y() + (element.height() - self.groove_thickness) / 2.0,
            element.width() - self.handle_width,
            self.groove_thickness,
        );
        cx.canvas.fill_rect(groove, element.z, self.groove_color);
    }
}

/// Draggable part of a [`Slider`]
#[derive(Debug, Clone, Default)]
pub struct SliderHandle {
    /// Pointer offset from the handle's corner while dragging
    drag_offset: Option<(f32, f32)>,
}

impl SliderHandle {
    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }
}

impl Widget for SliderHandle {
    fn type_name(&self) -> &'static str {
        "SliderHandle"
    }

    fn vocabulary(&self) -> &'static Vocabulary {
        &HANDLE_EVENTS
    }

    fn draggable(&self, button: MouseButton) -> bool {
        button == MouseButton::Left
    }

    fn handle_event(&mut self, cx: &mut EventCx<'_>, event: &Event) -> Result<(), UiError> {
        match (event.name, event.args.pointer()) {
            (names::BEGIN_DRAG, Some((x, y))) => {
                let element = cx.element()?;
                self.drag_offset = Some((x - element.x(), y - element.y()));
            }
            (names::UPDATE_DRAG, Some((x, _))) => {
                let (Some((dx, _)), Some(slider)) = (self.drag_offset, cx.tree().parent(cx.id())) else {
                    return Ok(());
                };
                cx.tree_mut()
                    .with_widget::<Slider, _>(slider, |widget, cx| widget.dragged_to(cx, x - dx))?;
            }
            (names::END_DRAG, _) => self.drag_offset = None,
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::tree::tests::tree;

    fn slider(tree: &mut Tree, slider: Slider) -> (ElementId, ElementId) {
        // height 25 from the schema, padding 4: handle is 8.5 x 17
        let id = slider.create(tree, &ElementOptions::new().position(10.0, 0.0).width(108.5)).unwrap();
        let handle = tree.children(id)[0];
        (id, handle)
    }

    #[test]
    fn test_handle_geometry() {
        let mut tree = tree();
        let (id, handle) = slider(&mut tree, Slider::new(0.0, 1.0));
        let el = tree.element(handle).unwrap();
        assert_eq!((el.width(), el.height()), (8.5, 17.0));
        assert_eq!((el.x(), el.y()), (14.0, 4.0));

        Slider::set(&mut tree, id, 0.5).unwrap();
        assert_eq!(tree.element(handle).unwrap().x(), 14.0 + 50.0);
    }

    #[test]
    fn test_value_is_clamped_and_rounded() {
        let mut tree = tree();
        let (id, _) = slider(&mut tree, Slider::new(0.0, 10.0).stepping(Stepping::Integer).value(3.0));
        assert_eq!(tree.widget::<Slider>(id).unwrap().get_value(), 3.0);

        Slider::set(&mut tree, id, 4.6).unwrap();
        assert_eq!(tree.widget::<Slider>(id).unwrap().get_value(), 5.0);
        Slider::set(&mut tree, id, 42.0).unwrap();
        assert_eq!(tree.widget::<Slider>(id).unwrap().get_value(), 10.0);
        Slider::set(&mut tree, id, -1.0).unwrap();
        assert_eq!(tree.widget::<Slider>(id).unwrap().get_value(), 0.0);
    }

    #[test]
    fn test_every_set_publishes_changed() {
        let mut tree = tree();
        let (id, _) = slider(&mut tree, Slider::new(0.0, 1.0));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        tree.on_main_event(id, move |_, e| {
            log.borrow_mut().push(e.args.value().unwrap_or(f64::NAN));
            Ok(())
        })
        .unwrap();

        Slider::set(&mut tree, id, 0.25).unwrap();
        Slider::set(&mut tree, id, 0.25).unwrap();
        assert_eq!(*seen.borrow(), vec![0.25, 0.25]);
    }

    #[test]
    fn test_press_on_groove_centres_handle() {
        let mut tree = tree();
        let (id, handle) = slider(&mut tree, Slider::new(0.0, 100.0));

        // travel is 100 from x = 10
        let x = 10.0 + 75.0 + 8.5 / 2.0;
        tree.publish(id, names::LEFT_MOUSE_BUTTON, EventArgs::Pointer { x, y: 10.0 }).unwrap();
        assert_eq!(tree.widget::<Slider>(id).unwrap().get_value(), 75.0);
        assert_eq!(tree.element(handle).unwrap().x(), 14.0 + 75.0);
    }

    #[test]
    fn test_drag_handle() {
        let mut tree = tree();
        let (id, handle) = slider(&mut tree, Slider::new(0.0, 100.0));
        assert!(tree.draggable(handle, MouseButton::Left));
        assert!(!tree.draggable(handle, MouseButton::Right));

        tree.publish(handle, names::BEGIN_DRAG, EventArgs::Pointer { x: 16.0, y: 5.0 }).unwrap();
        assert!(tree.widget::<SliderHandle>(handle).unwrap().is_dragging());

        // offset 2 from the handle's left edge
        tree.publish(handle, names::UPDATE_DRAG, EventArgs::Pointer { x: 37.0, y: 5.0 }).unwrap();
        assert_eq!(tree.widget::<Slider>(id).unwrap().get_value(), 25.0);
        assert_eq!(tree.element(handle).unwrap().x(), 39.0);

        tree.publish(handle, names::END_DRAG, EventArgs::Pointer { x: 37.0, y: 5.0 }).unwrap();
        assert!(!tree.widget::<SliderHandle>(handle).unwrap().is_dragging());
    }

    #[test]
    fn test_tip() {
        let mut tree = tree();
        let (id, _) = slider(&mut tree, Slider::new(0.0, 10.0).stepping(Stepping::Integer).value(7.0));
        assert_eq!(tree.tip(id), "7");

        let other = Slider::new(0.0, 1.0)
            .value(0.5)
            .create(&mut tree, &ElementOptions::new().width(50.0).tip("Volume"))
            .unwrap();
        assert_eq!(tree.tip(other), "Volume: 0.5");
    }

    #[test]
    fn test_handle_follows_slider() {
        let mut tree = tree();
        let (id, handle) = slider(&mut tree, Slider::new(0.0, 1.0));
        tree.set_position(id, 110.0, 100.0).unwrap();
        let el = tree.element(handle).unwrap();
        assert_eq!((el.x(), el.y()), (114.0, 104.0));
    }
}
