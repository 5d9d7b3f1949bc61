//! Style configuration files
//!
//! A configuration has three optional sections:
//!
//! ```json
//! {
//!   "colors":    { "none": [0, 0, 0, 0], "white": [255, 255, 255] },
//!   "constants": { "padding": 4, "font_name": "default" },
//!   "elements":  { "Button": { "hover": { "background_color": "@white" } } }
//! }
//! ```
//!
//! The same structure is accepted as TOML.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

use crate::color::ColorSpec;

/// Parsed, not yet validated, style configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    /// Named colors
    #[serde(default)]
    pub colors: BTreeMap<String, ColorSpec>,
    /// Named constants
    #[serde(default)]
    pub constants: BTreeMap<String, serde_json::Value>,
    /// Per element type tables
    #[serde(default)]
    pub elements: BTreeMap<String, serde_json::Value>,
}

impl StyleConfig {
    /// Load from JSON
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from TOML
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load from a `.json` or `.toml` file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading style config {}", path.display()))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            other => anyhow::bail!("unsupported style config format: {:?}", other),
        };
        config.with_context(|| format!("parsing style config {}", path.display()))
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.constants.is_empty() && self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_sections_are_optional() {
        let config = StyleConfig::from_json(r#"{ "constants": { "padding": 2 } }"#).unwrap();
        assert!(config.colors.is_empty());
        assert!(config.elements.is_empty());
        assert_eq!(config.constants["padding"], 2);
    }

    #[test]
    fn test_toml() {
        let config = StyleConfig::from_toml(
            r#"
            [colors]
            white = [255, 255, 255]

            [elements.Element]
            padding_top = "@padding"

            [elements.Button.hover]
            background_color = "@white"
            "#,
        )
        .unwrap();

        assert_eq!(config.colors.len(), 1);
        assert_eq!(config.elements["Button"]["hover"]["background_color"], "@white");
        assert_eq!(config.elements["Element"]["padding_top"], "@padding");
    }

    #[test]
    fn test_empty() {
        assert!(StyleConfig::from_json("{}").unwrap().is_empty());
    }
}
