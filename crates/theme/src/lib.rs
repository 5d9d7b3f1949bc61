//! # Trellis Theme
//!
//! Style data for the widget toolkit: named colors, named constants and
//! per element type default tables, resolved through the element type
//! hierarchy.

pub mod color;
pub mod config;
pub mod error;
pub mod schema;

pub use color::{Channel, Color, ColorSpec, Rgba};
pub use config::StyleConfig;
pub use error::StyleError;
pub use schema::{Entry, Resolution, StyleSchema, Value, ROOT_TYPE, SIGIL};
