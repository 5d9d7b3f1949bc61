//! # Trellis UI
//!
//! Retained-mode widget toolkit.
//! Elements live in a [`Tree`] arena, size themselves from style defaults,
//! get packed by linear and grid packers, and receive events from a
//! [`Surface`] that tracks the pointer.

pub mod canvas;
pub mod component;
pub mod element;
pub mod error;
pub mod event;
pub mod layout;
pub mod style;
pub mod surface;
pub mod tree;
pub mod widgets;

pub use canvas::{Canvas, FixedAdvance, Icon, TextMeasure};
pub use component::{DrawCx, EventCx, LayoutCx, Widget};
pub use element::{Element, ElementId, Font};
pub use error::UiError;
pub use event::{names, Event, EventArgs, EventBus, Input, MouseButton, Vocabulary};
pub use layout::{Align, Bounds, Direction, Edge, GridDimension, GridLayout, Size};
pub use style::{default_schema, AlignSpec, ElementOptions};
pub use surface::{Surface, SurfaceConfig, SurfaceRequest};
pub use tree::{Tree, TreeListener};

/// Reexport common types
pub mod prelude {
    pub use super::{
        Canvas, Element, ElementId, ElementOptions,
        Event, EventArgs, Input, MouseButton,
        Surface, SurfaceConfig, Tree, UiError,
        names,
    };
    pub use super::widgets::*;
}
