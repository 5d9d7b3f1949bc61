//! Event handling
//!
//! Every element owns an [`EventBus`] over a static [`Vocabulary`]. A
//! vocabulary is a closed list of event names extending its parent's list,
//! so subscribing to or publishing an undeclared name is an error rather
//! than a silent no-op.

use std::collections::HashMap;
use std::rc::Rc;

use theme::Color;

use crate::{ElementId, UiError};

/// Event names
pub mod names {
    pub const LEFT_MOUSE_BUTTON: &str = "left_mouse_button";
    pub const HOLDING_LEFT_MOUSE_BUTTON: &str = "holding_left_mouse_button";
    pub const RELEASED_LEFT_MOUSE_BUTTON: &str = "released_left_mouse_button";
    pub const CLICKED_LEFT_MOUSE_BUTTON: &str = "clicked_left_mouse_button";

    pub const RIGHT_MOUSE_BUTTON: &str = "right_mouse_button";
    pub const HOLDING_RIGHT_MOUSE_BUTTON: &str = "holding_right_mouse_button";
    pub const RELEASED_RIGHT_MOUSE_BUTTON: &str = "released_right_mouse_button";
    pub const CLICKED_RIGHT_MOUSE_BUTTON: &str = "clicked_right_mouse_button";

    pub const MOUSE_WHEEL_UP: &str = "mouse_wheel_up";
    pub const MOUSE_WHEEL_DOWN: &str = "mouse_wheel_down";

    pub const ENTER: &str = "enter";
    pub const HOVER: &str = "hover";
    pub const LEAVE: &str = "leave";
    pub const BLUR: &str = "blur";

    pub const CHANGED: &str = "changed";
    pub const SELECTED: &str = "selected";

    pub const BEGIN_DRAG: &str = "begin_drag";
    pub const UPDATE_DRAG: &str = "update_drag";
    pub const END_DRAG: &str = "end_drag";
}

/// Closed set of event names an element type handles
#[derive(Debug)]
pub struct Vocabulary {
    pub type_name: &'static str,
    pub events: &'static [&'static str],
    pub parent: Option<&'static Vocabulary>,
}

impl Vocabulary {
    pub const fn new(
        type_name: &'static str,
        events: &'static [&'static str],
        parent: Option<&'static Vocabulary>,
    ) -> Self {
        Self { type_name, events, parent }
    }

    /// Is `name` declared here or by an ancestor vocabulary?
    pub fn declares(&self, name: &str) -> bool {
        self.events.iter().any(|e| *e == name) || self.parent.is_some_and(|parent| parent.declares(name))
    }

    /// Resolve `name` to its static form, failing for undeclared names
    pub fn lookup(&self, name: &str) -> Result<&'static str, UiError> {
        let mut vocabulary = Some(self);
        while let Some(current) = vocabulary {
            if let Some(declared) = current.events.iter().find(|e| **e == name) {
                return Ok(declared);
            }
            vocabulary = current.parent;
        }

        Err(UiError::UnknownEvent {
            type_name: self.type_name,
            event: name.to_string(),
        })
    }
}

/// Events every element handles
pub static BASE: Vocabulary = Vocabulary::new(
    "Element",
    &[
        names::LEFT_MOUSE_BUTTON,
        names::HOLDING_LEFT_MOUSE_BUTTON,
        names::RELEASED_LEFT_MOUSE_BUTTON,
        names::CLICKED_LEFT_MOUSE_BUTTON,
        names::RIGHT_MOUSE_BUTTON,
        names::HOLDING_RIGHT_MOUSE_BUTTON,
        names::RELEASED_RIGHT_MOUSE_BUTTON,
        names::CLICKED_RIGHT_MOUSE_BUTTON,
        names::MOUSE_WHEEL_UP,
        names::MOUSE_WHEEL_DOWN,
        names::ENTER,
        names::HOVER,
        names::LEAVE,
        names::BLUR,
    ],
    None,
);

/// Payload carried by an event
#[derive(Debug, Clone, PartialEq)]
pub enum EventArgs {
    None,
    Pointer { x: f32, y: f32 },
    Value(f64),
    Color(Color),
    Text(String),
}

impl EventArgs {
    pub fn pointer(&self) -> Option<(f32, f32)> {
        match self {
            Self::Pointer { x, y } => Some((*x, *y)),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A published event
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Publishing element
    pub sender: ElementId,
    pub name: &'static str,
    pub args: EventArgs,
}

impl Event {
    pub fn new(sender: ElementId, name: &'static str, args: EventArgs) -> Self {
        Self { sender, name, args }
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

impl MouseButton {
    pub const ALL: [MouseButton; 2] = [MouseButton::Left, MouseButton::Right];

    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    pub fn pressed(self) -> &'static str {
        match self {
            Self::Left => names::LEFT_MOUSE_BUTTON,
            Self::Right => names::RIGHT_MOUSE_BUTTON,
        }
    }

    pub fn holding(self) -> &'static str {
        match self {
            Self::Left => names::HOLDING_LEFT_MOUSE_BUTTON,
            Self::Right => names::HOLDING_RIGHT_MOUSE_BUTTON,
        }
    }

    pub fn released(self) -> &'static str {
        match self {
            Self::Left => names::RELEASED_LEFT_MOUSE_BUTTON,
            Self::Right => names::RELEASED_RIGHT_MOUSE_BUTTON,
        }
    }

    pub fn clicked(self) -> &'static str {
        match self {
            Self::Left => names::CLICKED_LEFT_MOUSE_BUTTON,
            Self::Right => names::CLICKED_RIGHT_MOUSE_BUTTON,
        }
    }
}

/// Raw input forwarded by the host loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Press(MouseButton),
    Release(MouseButton),
    Holding(MouseButton),
    WheelUp,
    WheelDown,
}

/// Event listener over a context `C`
pub type Listener<C> = Rc<dyn Fn(&mut C, &Event) -> Result<(), UiError>>;

/// Subscriptions of one element
pub struct EventBus<C> {
    vocabulary: &'static Vocabulary,
    listeners: HashMap<&'static str, Vec<Listener<C>>>,
}

impl<C> EventBus<C> {
    pub fn new(vocabulary: &'static Vocabulary) -> Self {
        Self {
            vocabulary,
            listeners: HashMap::new(),
        }
    }

    /// Fail unless `name` is declared
    pub fn check(&self, name: &str) -> Result<&'static str, UiError> {
        self.vocabulary.lookup(name)
    }

    /// Add a listener, run after those already subscribed to `name`
    pub fn subscribe<F>(&mut self, name: &str, listener: F) -> Result<(), UiError>
    where
        F: Fn(&mut C, &Event) -> Result<(), UiError> + 'static,
    {
        let name = self.check(name)?;
        self.listeners.entry(name).or_default().push(Rc::new(listener));
        Ok(())
    }

    /// Snapshot of the listeners for `name`, in subscription order
    pub fn listeners(&self, name: &str) -> Vec<Listener<C>> {
        self.listeners.get(name).cloned().unwrap_or_default()
    }
}

impl<C> std::fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut subscribed: Vec<_> = self.listeners.iter().map(|(k, v)| (*k, v.len())).collect();
        subscribed.sort();
        f.debug_struct("EventBus")
            .field("vocabulary", &self.vocabulary.type_name)
            .field("listeners", &subscribed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static DRAGGABLE: Vocabulary = Vocabulary::new(
        "Draggable",
        &[names::BEGIN_DRAG, names::UPDATE_DRAG, names::END_DRAG],
        Some(&BASE),
    );

    fn event(name: &'static str) -> Event {
        Event::new(ElementId(1), name, EventArgs::Pointer { x: 1.0, y: 2.0 })
    }

    #[test]
    fn test_vocabulary_inherits() {
        assert!(DRAGGABLE.declares(names::BEGIN_DRAG));
        assert!(DRAGGABLE.declares(names::ENTER));
        assert!(!BASE.declares(names::BEGIN_DRAG));
        assert!(!DRAGGABLE.declares("explode"));
    }

    #[test]
    fn test_undeclared_names_fail() {
        let mut bus: EventBus<Vec<&'static str>> = EventBus::new(&BASE);

        assert_eq!(
            bus.subscribe("changed", |_, _| Ok(())),
            Err(UiError::UnknownEvent { type_name: "Element", event: "changed".into() })
        );
        assert!(bus.check(names::CHANGED).is_err());
        assert_eq!(bus.check("enter"), Ok(names::ENTER));
        assert!(bus.subscribe(names::ENTER, |_, _| Ok(())).is_ok());
    }

    #[test]
    fn test_listener_snapshot_in_order() {
        let mut bus: EventBus<Vec<String>> = EventBus::new(&DRAGGABLE);
        bus.subscribe(names::BEGIN_DRAG, |log, e| {
            log.push(format!("first {:?}", e.args.pointer()));
            Ok(())
        })
        .unwrap();
        bus.subscribe(names::BEGIN_DRAG, |log, _| {
            log.push("second".into());
            Ok(())
        })
        .unwrap();

        let snapshot = bus.listeners(names::BEGIN_DRAG);
        bus.subscribe(names::BEGIN_DRAG, |log, _| {
            log.push("late".into());
            Ok(())
        })
        .unwrap();

        let mut log = Vec::new();
        for listener in snapshot {
            listener(&mut log, &event(names::BEGIN_DRAG)).unwrap();
        }
        assert_eq!(log, vec!["first Some((1.0, 2.0))".to_string(), "second".to_string()]);
        assert_eq!(bus.listeners(names::BEGIN_DRAG).len(), 3);
        assert!(bus.listeners(names::END_DRAG).is_empty());
    }

    #[test]
    fn test_mouse_button_names() {
        assert_eq!(MouseButton::Left.clicked(), names::CLICKED_LEFT_MOUSE_BUTTON);
        assert_eq!(MouseButton::Right.released(), names::RELEASED_RIGHT_MOUSE_BUTTON);
        for button in MouseButton::ALL {
            assert!(BASE.declares(button.pressed()));
            assert!(BASE.declares(button.holding()));
        }
    }
}
