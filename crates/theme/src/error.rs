//! Style errors

/// Failure resolving or loading style data
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleError {
    #[error("No default value for {type_name} {path:?}")]
    MissingDefault { type_name: String, path: Vec<String> },

    #[error("Invalid style config: {0}")]
    Parse(String),

    #[error("Unknown element type: {0}")]
    UnknownElementType(String),

    #[error("Color '{name}' must be an RGB or RGBA channel array, got {len} channels")]
    InvalidColor { name: String, len: usize },

    #[error("Color '{name}' is not a #RRGGBB or #RRGGBBAA value: {value}")]
    InvalidHex { name: String, value: String },

    #[error("Constant '{0}' must be a scalar or a list")]
    InvalidConstant(String),

    #[error("Element table for '{0}' must be a mapping")]
    InvalidTable(String),

    #[error("Default {path:?} for {type_name} is not a {expected}")]
    WrongType {
        type_name: String,
        path: Vec<String>,
        expected: &'static str,
    },
}

impl StyleError {
    pub(crate) fn path_of(path: &[&str]) -> Vec<String> {
        path.iter().map(|s| s.to_string()).collect()
    }
}
