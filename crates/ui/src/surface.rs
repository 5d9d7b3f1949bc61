//! Surface controller
//!
//! Owns the element tree of one screen and turns pointer state and raw
//! input into element events: hover tracking, press/release/click pairing,
//! focus loss, drags, the active pop-up menu and delayed tool-tips.

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::canvas::Canvas;
use crate::event::{names, EventArgs, Input, MouseButton};
use crate::style::ElementOptions;
use crate::widgets::{Label, Packer};
use crate::{ElementId, Tree, UiError};

/// Surface settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f32,
    pub height: f32,
    /// Delay before a tool-tip appears under a stationary pointer
    pub tool_tip_delay_ms: u64,
    /// Tool-tips are placed this far below the pointer
    pub cursor_height: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            tool_tip_delay_ms: 500,
            cursor_height: 16.0,
        }
    }
}

impl SurfaceConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn tool_tip_delay(&self) -> Duration {
        Duration::from_millis(self.tool_tip_delay_ms)
    }
}

/// Action a widget asks of the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRequest {
    ShowMenu(ElementId),
    HideMenu,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    target: ElementId,
    button: MouseButton,
    /// Pointer position last reported to the target
    last: (f32, f32),
}

/// One screen of widgets
#[derive(Debug)]
pub struct Surface {
    tree: Tree,
    config: SurfaceConfig,
    root: ElementId,
    cursor: (f32, f32),
    last_cursor: Option<(f32, f32)>,
    hover: Option<ElementId>,
    focus: Option<ElementId>,
    menu: Option<ElementId>,
    tool_tip: Option<ElementId>,
    mouse_moved_at: Instant,
    /// Element pressed with each button, for click pairing
    down_owner: [Option<ElementId>; 2],
    drag: Option<Drag>,
}

impl Surface {
    /// Wrap `tree`, adding an unpadded vertical root packer filling the
    /// surface
    pub fn new(mut tree: Tree, config: SurfaceConfig) -> Result<Self, UiError> {
        let root_options = ElementOptions::new()
            .padding(0.0)
            .size(config.width, config.height);
        let root = Packer::vertical().create(&mut tree, &root_options)?;

        Ok(Self {
            tree,
            config,
            root,
            cursor: (0.0, 0.0),
            last_cursor: None,
            hover: None,
            focus: None,
            menu: None,
            tool_tip: None,
            mouse_moved_at: Instant::now(),
            down_owner: [None; 2],
            drag: None,
        })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Container for user content
    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    pub fn hover(&self) -> Option<ElementId> {
        self.hover
    }

    pub fn focus(&self) -> Option<ElementId> {
        self.focus
    }

    pub fn menu(&self) -> Option<ElementId> {
        self.menu
    }

    pub fn tool_tip(&self) -> Option<ElementId> {
        self.tool_tip
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn move_pointer(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
    }

    /// Give focus to `element`; the previous focus is blurred when a new one
    /// is given
    pub fn set_focus(&mut self, element: Option<ElementId>) -> Result<(), UiError> {
        let previous = self.focus;
        self.focus = element;

        if let (Some(previous), Some(_)) = (previous, element) {
            self.publish(previous, names::BLUR, EventArgs::None)?;
        }
        Ok(())
    }

    /// Show `menu`, hiding any current one first
    pub fn show_menu(&mut self, menu: ElementId) {
        self.hide_menu();
        tracing::debug!("Showing menu {:?}", menu);
        self.menu = Some(menu);
    }

    pub fn hide_menu(&mut self) {
        if let Some(menu) = self.menu.take() {
            tracing::debug!("Hiding menu {:?}", menu);
        }
    }

    /// Advance one frame
    pub fn update(&mut self, now: Instant) -> Result<(), UiError> {
        let pointer = self.pointer();

        let dragged = match &mut self.drag {
            Some(drag) if drag.last != self.cursor => {
                drag.last = self.cursor;
                Some(drag.target)
            }
            _ => None,
        };
        if let Some(target) = dragged {
            self.publish(target, names::UPDATE_DRAG, pointer.clone())?;
        }

        if let Some(menu) = self.menu.filter(|menu| !self.tree.contains(*menu)) {
            tracing::warn!("Active menu {:?} was destroyed", menu);
            self.menu = None;
        }
        if let Some(menu) = self.menu {
            self.tree.update(menu)?;
        }
        self.tree.update(self.root)?;
        self.apply_requests();

        let (x, y) = self.cursor;
        let hit = self
            .menu
            .and_then(|menu| self.tree.hit_element(menu, x, y))
            .or_else(|| self.tree.hit_element(self.root, x, y));

        if hit != self.hover {
            let previous = std::mem::replace(&mut self.hover, hit);
            if let Some(previous) = previous {
                self.publish(previous, names::LEAVE, EventArgs::None)?;
            }
            if let Some(hover) = hit {
                self.publish(hover, names::ENTER, EventArgs::None)?;
            }
        }
        if let Some(hover) = hit {
            self.publish(hover, names::HOVER, pointer)?;
        }
        self.apply_requests();

        self.update_tool_tip(now)?;
        self.last_cursor = Some(self.cursor);
        Ok(())
    }

    fn update_tool_tip(&mut self, now: Instant) -> Result<(), UiError> {
        let stationary = self.last_cursor == Some(self.cursor);
        if !stationary || self.menu.is_some() {
            return self.clear_tip(now);
        }

        let Some(hover) = self.hover else {
            return Ok(());
        };
        if now.saturating_duration_since(self.mouse_moved_at) <= self.config.tool_tip_delay() {
            return Ok(());
        }

        let text = self.tree.tip(hover);
        if text.is_empty() {
            return self.clear_tip(now);
        }

        let (x, y) = (self.cursor.0, self.cursor.1 + self.config.cursor_height);
        match self.tool_tip.filter(|tip| self.tree.contains(*tip)) {
            Some(tip) => {
                if self.tree.text(tip)? != text {
                    self.tree.set_text(tip, text)?;
                }
                self.tree.set_position(tip, x, y)?;
            }
            None => {
                tracing::debug!("Showing tool-tip for {:?}", hover);
                let options = ElementOptions::new().position(x, y).z(f32::INFINITY);
                self.tool_tip = Some(Label::tool_tip(text).create(&mut self.tree, &options)?);
            }
        }
        Ok(())
    }

    fn clear_tip(&mut self, now: Instant) -> Result<(), UiError> {
        self.mouse_moved_at = now;
        if let Some(tip) = self.tool_tip.take() {
            tracing::trace!("Clearing tool-tip");
            if self.tree.contains(tip) {
                self.tree.destroy(tip)?;
            }
        }
        Ok(())
    }

    /// Forward raw input to the hovered element
    pub fn redirect(&mut self, input: Input) -> Result<(), UiError> {
        match input {
            Input::Press(button) => self.press(button)?,
            Input::Release(button) => self.release(button)?,
            Input::Holding(button) => self.forward(button.holding())?,
            Input::WheelUp => self.forward(names::MOUSE_WHEEL_UP)?,
            Input::WheelDown => self.forward(names::MOUSE_WHEEL_DOWN)?,
        }
        self.apply_requests();
        Ok(())
    }

    fn press(&mut self, button: MouseButton) -> Result<(), UiError> {
        self.hide_menu_unless_hovered();

        if let Some(focus) = self.focus {
            if self.hover != Some(focus) {
                self.focus = None;
                self.publish(focus, names::BLUR, EventArgs::None)?;
            }
        }

        let Some(target) = self.input_target() else {
            self.down_owner[button.index()] = None;
            return Ok(());
        };

        let pointer = self.pointer();
        self.publish(target, button.pressed(), pointer.clone())?;
        self.down_owner[button.index()] = Some(target);

        if self.drag.is_none() && self.tree.draggable(target, button) {
            tracing::debug!("Begin drag of {:?} with {:?}", target, button);
            self.drag = Some(Drag { target, button, last: self.cursor });
            self.publish(target, names::BEGIN_DRAG, pointer)?;
        }
        Ok(())
    }

    fn release(&mut self, button: MouseButton) -> Result<(), UiError> {
        self.hide_menu_unless_hovered();

        let owner = self.down_owner[button.index()].take();
        if let Some(target) = self.input_target() {
            let pointer = self.pointer();
            self.publish(target, button.released(), pointer.clone())?;
            if owner == Some(target) {
                self.publish(target, button.clicked(), pointer)?;
            }
        }

        if let Some(drag) = self.drag.filter(|drag| drag.button == button) {
            tracing::debug!("End drag of {:?}", drag.target);
            self.drag = None;
            self.publish(drag.target, names::END_DRAG, self.pointer())?;
        }
        Ok(())
    }

    fn forward(&mut self, name: &'static str) -> Result<(), UiError> {
        match self.input_target() {
            Some(target) => self.publish(target, name, self.pointer()),
            None => Ok(()),
        }
    }

    fn hide_menu_unless_hovered(&mut self) {
        let Some(menu) = self.menu else {
            return;
        };
        if !self.hover.is_some_and(|hover| self.tree.is_inside(hover, menu)) {
            self.hide_menu();
        }
    }

    /// Hovered element if it still exists and is enabled
    fn input_target(&self) -> Option<ElementId> {
        self.hover
            .filter(|hover| self.tree.element(*hover).is_ok_and(|element| element.enabled))
    }

    fn pointer(&self) -> EventArgs {
        EventArgs::Pointer { x: self.cursor.0, y: self.cursor.1 }
    }

    /// Publish on `target` unless it has been destroyed
    fn publish(&mut self, target: ElementId, name: &str, args: EventArgs) -> Result<(), UiError> {
        if !self.tree.contains(target) {
            return Ok(());
        }
        self.tree.publish(target, name, args)
    }

    fn apply_requests(&mut self) {
        for request in self.tree.take_requests() {
            match request {
                SurfaceRequest::ShowMenu(menu) => self.show_menu(menu),
                SurfaceRequest::HideMenu => self.hide_menu(),
            }
        }
    }

    /// Root tree, then the menu, then the tool-tip
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.tree.draw(self.root, canvas);
        if let Some(menu) = self.menu {
            self.tree.draw(menu, canvas);
        }
        if let Some(tip) = self.tool_tip {
            self.tree.draw(tip, canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::canvas::testing::Recorder;
    use crate::tree::tests::tree;
    use crate::widgets::{Button, ComboBox, MenuPane, Slider};

    type Log = Rc<RefCell<Vec<String>>>;

    fn surface() -> Surface {
        Surface::new(tree(), SurfaceConfig::default()).unwrap()
    }

    fn record(surface: &mut Surface, id: ElementId, tag: &str, events: &[&str], log: &Log) {
        for name in events {
            let log = Rc::clone(log);
            let tag = tag.to_string();
            surface
                .tree_mut()
                .subscribe(id, name, move |_, e| {
                    log.borrow_mut().push(format!("{}({tag})", e.name));
                    Ok(())
                })
                .unwrap();
        }
    }

    /// Two labels stacked at the top of the root: A at y 0..23, B at 27..50
    fn two_labels(surface: &mut Surface) -> (ElementId, ElementId) {
        let root = surface.root();
        let tree = surface.tree_mut();
        let a = Label::new("aaa").create(tree, &ElementOptions::new().parent(root)).unwrap();
        let b = Button::new("bbb").create(tree, &ElementOptions::new().parent(root)).unwrap();
        (a, b)
    }

    fn step(surface: &mut Surface, x: f32, y: f32) {
        surface.move_pointer(x, y);
        surface.update(Instant::now()).unwrap();
    }

    #[test]
    fn test_config_defaults() {
        let config = SurfaceConfig::from_json(r#"{ "width": 320 }"#).unwrap();
        assert_eq!(config.width, 320.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.tool_tip_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_hover_sequence() {
        let mut surface = surface();
        let (a, b) = two_labels(&mut surface);
        let log = Log::default();
        let events = [names::ENTER, names::HOVER, names::LEAVE];
        record(&mut surface, a, "a", &events, &log);
        record(&mut surface, b, "b", &events, &log);

        step(&mut surface, 900.0, 900.0);
        assert_eq!(surface.hover(), None);
        step(&mut surface, 5.0, 5.0);
        step(&mut surface, 6.0, 5.0);
        step(&mut surface, 5.0, 30.0);

        assert_eq!(
            *log.borrow(),
            vec!["enter(a)", "hover(a)", "hover(a)", "leave(a)", "enter(b)", "hover(b)"]
        );
        assert_eq!(surface.hover(), Some(b));
    }

    #[test]
    fn test_click_needs_press_and_release_on_same_element() {
        let mut surface = surface();
        let (a, b) = two_labels(&mut surface);
        let log = Log::default();
        let events = [
            names::LEFT_MOUSE_BUTTON,
            names::RELEASED_LEFT_MOUSE_BUTTON,
            names::CLICKED_LEFT_MOUSE_BUTTON,
        ];
        record(&mut surface, a, "a", &events, &log);
        record(&mut surface, b, "b", &events, &log);

        step(&mut surface, 5.0, 5.0);
        surface.redirect(Input::Press(MouseButton::Left)).unwrap();
        surface.redirect(Input::Release(MouseButton::Left)).unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["left_mouse_button(a)", "released_left_mouse_button(a)", "clicked_left_mouse_button(a)"]
        );

        log.borrow_mut().clear();
        surface.redirect(Input::Press(MouseButton::Left)).unwrap();
        step(&mut surface, 5.0, 30.0);
        surface.redirect(Input::Release(MouseButton::Left)).unwrap();
        assert_eq!(*log.borrow(), vec!["left_mouse_button(a)", "released_left_mouse_button(b)"]);

        // the owner does not survive a release
        log.borrow_mut().clear();
        surface.redirect(Input::Release(MouseButton::Left)).unwrap();
        assert_eq!(*log.borrow(), vec!["released_left_mouse_button(b)"]);
    }

    #[test]
    fn test_disabled_hover_gets_no_input() {
        let mut surface = surface();
        let (_, b) = two_labels(&mut surface);
        surface.tree_mut().set_enabled(b, false).unwrap();
        let log = Log::default();
        record(&mut surface, b, "b", &[names::ENTER, names::LEFT_MOUSE_BUTTON], &log);

        step(&mut surface, 5.0, 30.0);
        surface.redirect(Input::Press(MouseButton::Left)).unwrap();
        surface.redirect(Input::WheelUp).unwrap();
        assert_eq!(*log.borrow(), vec!["enter(b)"]);
    }

    #[test]
    fn test_tool_tip_after_delay() {
        let mut surface = surface();
        let root = surface.root();
        let tipped = Label::new("tipped")
            .create(surface.tree_mut(), &ElementOptions::new().parent(root).tip("Hello"))
            .unwrap();
        assert_eq!(tipped, surface.tree().children(root)[0]);

        let start = Instant::now();
        surface.move_pointer(10.0, 10.0);
        surface.update(start).unwrap();
        surface.update(start + Duration::from_millis(300)).unwrap();
        assert_eq!(surface.tool_tip(), None);

        surface.update(start + Duration::from_millis(501)).unwrap();
        let tip = surface.tool_tip().unwrap();
        assert_eq!(surface.tree().text(tip).unwrap(), "Hello");
        let el = surface.tree().element(tip).unwrap();
        assert_eq!((el.x(), el.y()), (10.0, 26.0));
        assert_eq!(el.type_name(), "ToolTip");

        let mut canvas = Recorder::default();
        surface.draw(&mut canvas);
        assert_eq!(canvas.texts(), vec!["tipped", "Hello"]);

        surface.move_pointer(11.0, 10.0);
        surface.update(start + Duration::from_millis(600)).unwrap();
        assert_eq!(surface.tool_tip(), None);
        assert!(!surface.tree().contains(tip));

        // timer restarted by the movement
        surface.update(start + Duration::from_millis(900)).unwrap();
        assert_eq!(surface.tool_tip(), None);
        surface.update(start + Duration::from_millis(1101)).unwrap();
        assert!(surface.tool_tip().is_some());
    }

    #[test]
    fn test_no_tool_tip_without_text() {
        let mut surface = surface();
        two_labels(&mut surface);
        let start = Instant::now();
        surface.move_pointer(5.0, 5.0);
        surface.update(start).unwrap();
        surface.update(start + Duration::from_secs(2)).unwrap();
        assert_eq!(surface.tool_tip(), None);
    }

    #[test]
    fn test_combo_menu_lifecycle() {
        let mut surface = surface();
        let root = surface.root();
        let combo = ComboBox::create(surface.tree_mut(), &ElementOptions::new().parent(root), None).unwrap();
        ComboBox::add_item(surface.tree_mut(), combo, "One", "one").unwrap();
        ComboBox::add_item(surface.tree_mut(), combo, "Two", "two").unwrap();
        let menu = surface.tree().widget::<ComboBox>(combo).unwrap().menu();

        step(&mut surface, 5.0, 5.0);
        surface.redirect(Input::Press(MouseButton::Left)).unwrap();
        surface.redirect(Input::Release(MouseButton::Left)).unwrap();
        assert_eq!(surface.menu(), Some(menu));

        // menu sits at y 24; second item at 24 + 23
        step(&mut surface, 5.0, 50.0);
        let two = MenuPane::items(surface.tree(), menu)[1];
        assert_eq!(surface.hover(), Some(two));
        surface.redirect(Input::Press(MouseButton::Left)).unwrap();
        assert_eq!(surface.menu(), None);
        assert_eq!(surface.tree().widget::<ComboBox>(combo).unwrap().value(), Some("two"));

        // pressing away from an open menu closes it
        surface.show_menu(menu);
        step(&mut surface, 500.0, 500.0);
        surface.redirect(Input::Press(MouseButton::Right)).unwrap();
        assert_eq!(surface.menu(), None);
    }

    #[test]
    fn test_no_tool_tip_while_menu_open() {
        let mut surface = surface();
        let root = surface.root();
        Label::new("tipped")
            .create(surface.tree_mut(), &ElementOptions::new().parent(root).tip("Hello"))
            .unwrap();
        let menu = MenuPane::new()
            .create(surface.tree_mut(), &ElementOptions::new().position(300.0, 300.0))
            .unwrap();
        MenuPane::add_item(surface.tree_mut(), menu, "One", "one").unwrap();
        surface.show_menu(menu);

        let start = Instant::now();
        surface.move_pointer(10.0, 10.0);
        surface.update(start).unwrap();
        surface.update(start + Duration::from_millis(600)).unwrap();
        assert_eq!(surface.tool_tip(), None);

        // the delay counts from when the menu went away
        surface.hide_menu();
        surface.update(start + Duration::from_millis(700)).unwrap();
        assert_eq!(surface.tool_tip(), None);
        surface.update(start + Duration::from_millis(1101)).unwrap();
        assert!(surface.tool_tip().is_some());
    }

    #[test]
    fn test_release_outside_menu_hides_it() {
        let mut surface = surface();
        let menu = MenuPane::new()
            .create(surface.tree_mut(), &ElementOptions::new().position(300.0, 300.0))
            .unwrap();
        let item = MenuPane::add_item(surface.tree_mut(), menu, "One", "one").unwrap();
        surface.show_menu(menu);

        step(&mut surface, 310.0, 310.0);
        assert_eq!(surface.hover(), Some(item));
        surface.redirect(Input::Release(MouseButton::Left)).unwrap();
        assert_eq!(surface.menu(), Some(menu));

        step(&mut surface, 500.0, 500.0);
        surface.redirect(Input::Release(MouseButton::Left)).unwrap();
        assert_eq!(surface.menu(), None);
    }

    #[test]
    fn test_holding_and_wheel_reach_hover() {
        let mut surface = surface();
        let (a, b) = two_labels(&mut surface);
        let log = Log::default();
        let events = [
            names::HOLDING_LEFT_MOUSE_BUTTON,
            names::HOLDING_RIGHT_MOUSE_BUTTON,
            names::MOUSE_WHEEL_UP,
            names::MOUSE_WHEEL_DOWN,
            names::CLICKED_LEFT_MOUSE_BUTTON,
        ];
        record(&mut surface, a, "a", &events, &log);
        record(&mut surface, b, "b", &events, &log);

        step(&mut surface, 5.0, 5.0);
        surface.redirect(Input::Holding(MouseButton::Left)).unwrap();
        surface.redirect(Input::WheelUp).unwrap();
        surface.redirect(Input::WheelDown).unwrap();
        step(&mut surface, 5.0, 30.0);
        surface.redirect(Input::Holding(MouseButton::Right)).unwrap();

        // holding is no press, so the release clicks nothing
        surface.redirect(Input::Release(MouseButton::Left)).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                "holding_left_mouse_button(a)",
                "mouse_wheel_up(a)",
                "mouse_wheel_down(a)",
                "holding_right_mouse_button(b)",
            ]
        );
    }

    #[test]
    fn test_destroyed_menu_is_dropped() {
        let mut surface = surface();
        let menu = MenuPane::new().create(surface.tree_mut(), &ElementOptions::new()).unwrap();
        surface.show_menu(menu);
        surface.tree_mut().destroy(menu).unwrap();
        step(&mut surface, 5.0, 5.0);
        assert_eq!(surface.menu(), None);
    }

    #[test]
    fn test_focus_blur() {
        let mut surface = surface();
        let (a, b) = two_labels(&mut surface);
        let log = Log::default();
        record(&mut surface, a, "a", &[names::BLUR], &log);

        surface.set_focus(Some(a)).unwrap();
        step(&mut surface, 5.0, 5.0);
        surface.redirect(Input::Press(MouseButton::Left)).unwrap();
        assert_eq!(surface.focus(), Some(a));
        assert!(log.borrow().is_empty());

        surface.set_focus(Some(b)).unwrap();
        assert_eq!(*log.borrow(), vec!["blur(a)"]);

        surface.set_focus(Some(a)).unwrap();
        step(&mut surface, 500.0, 500.0);
        surface.redirect(Input::Press(MouseButton::Left)).unwrap();
        assert_eq!(surface.focus(), None);
        assert_eq!(log.borrow().len(), 2);

        surface.set_focus(None).unwrap();
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_drag_slider_handle() {
        let mut surface = surface();
        let root = surface.root();
        let slider = Slider::new(0.0, 100.0)
            .create(surface.tree_mut(), &ElementOptions::new().parent(root).width(108.5))
            .unwrap();
        let handle = surface.tree().children(slider)[0];
        assert_eq!(surface.tree().element(handle).unwrap().x(), 4.0);

        step(&mut surface, 6.0, 10.0);
        assert_eq!(surface.hover(), Some(handle));
        surface.redirect(Input::Press(MouseButton::Left)).unwrap();
        assert!(surface.is_dragging());

        // handle grabbed 2 from its left edge, moved to left edge 50
        step(&mut surface, 52.0, 12.0);
        assert_eq!(surface.tree().widget::<Slider>(slider).unwrap().get_value(), 50.0);

        surface.redirect(Input::Release(MouseButton::Left)).unwrap();
        assert!(!surface.is_dragging());
        step(&mut surface, 80.0, 12.0);
        assert_eq!(surface.tree().widget::<Slider>(slider).unwrap().get_value(), 50.0);
    }
}
