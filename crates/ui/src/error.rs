//! UI errors

use theme::StyleError;

use crate::ElementId;

/// Failure building or driving the element tree
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UiError {
    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("{type_name} does not handle event '{event}'")]
    UnknownEvent { type_name: &'static str, event: String },

    #[error("Invalid {axis} alignment: {value}")]
    InvalidAlign { axis: &'static str, value: String },

    #[error("Grid options columns and rows are not compatible")]
    ConflictingGridDimensions,

    #[error("Grid needs either columns or rows")]
    MissingGridDimension,

    #[error("Grid dimension must be at least 1")]
    ZeroGridDimension,

    #[error("Element {0:?} not found")]
    ElementNotFound(ElementId),

    #[error("Element {0:?} is already being handled")]
    WidgetBusy(ElementId),

    #[error("{0} has no main event")]
    NoMainEvent(&'static str),

    #[error("Element {id:?} is not a {expected}")]
    WidgetMismatch { id: ElementId, expected: &'static str },
}
