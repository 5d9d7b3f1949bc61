//! Style schema
//!
//! Resolves the default value of an attribute for an element type. A lookup
//! walks the type's nested table along the attribute path and, when nothing
//! is found, falls back along two independent axes:
//!
//! 1. the type's ancestors, with the same path;
//! 2. shorter paths (first segment dropped), only from the original type.
//!
//! So `["hover", "background_color"]` on `Button` tries `Button`, `Label`,
//! `Element` with the full path before trying `["background_color"]` from
//! `Button` again. The number of per-type lookups is bounded by
//! `chain length * path length`.

use std::collections::{BTreeMap, HashMap};

use crate::{Color, StyleConfig, StyleError};

/// Prefix marking a reference to a named color or constant
pub const SIGIL: char = '@';

/// Root of every element type chain
pub const ROOT_TYPE: &str = "Element";

/// A resolved style value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
    Color(Color),
    List(Vec<Value>),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.as_number().map(|n| n as f32)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value as Json;

        match value {
            Json::Bool(b) => Some(Self::Bool(*b)),
            Json::Number(n) => n.as_f64().map(Self::Number),
            Json::String(s) => Some(Self::Text(s.clone())),
            Json::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Option<Vec<_>>>()
                .map(Self::List),
            Json::Null | Json::Object(_) => None,
        }
    }
}

/// A stored schema entry, references already classified
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Literal(Value),
    ColorRef(String),
    ConstantRef(String),
    Table(BTreeMap<String, Entry>),
}

impl Entry {
    fn from_json(key: &str, value: &serde_json::Value) -> Result<Option<Self>, StyleError> {
        use serde_json::Value as Json;

        let entry = match value {
            Json::Null => None,
            Json::Object(map) => {
                let mut table = BTreeMap::new();
                for (key, value) in map {
                    if let Some(entry) = Self::from_json(key, value)? {
                        table.insert(key.clone(), entry);
                    }
                }
                Some(Self::Table(table))
            }
            Json::String(s) if s.starts_with(SIGIL) => {
                let name = s[SIGIL.len_utf8()..].to_string();
                if is_color_key(key) {
                    Some(Self::ColorRef(name))
                } else {
                    Some(Self::ConstantRef(name))
                }
            }
            Json::Array(items) if is_color_key(key) => {
                let channels = items
                    .iter()
                    .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
                    .collect::<Option<Vec<u8>>>();
                let color = channels
                    .and_then(|channels| Color::from_channels(&channels))
                    .ok_or_else(|| StyleError::InvalidColor {
                        name: key.to_string(),
                        len: items.len(),
                    })?;
                Some(Self::Literal(Value::Color(color)))
            }
            other => Value::from_json(other).map(Self::Literal),
        };

        Ok(entry)
    }
}

/// Color references are recognised by the attribute name
fn is_color_key(key: &str) -> bool {
    key == "color" || key.ends_with("_color")
}

fn merge_tables(into: &mut BTreeMap<String, Entry>, from: &BTreeMap<String, Entry>) {
    for (key, entry) in from {
        if let (Some(Entry::Table(existing)), Entry::Table(incoming)) = (into.get_mut(key), entry) {
            merge_tables(existing, incoming);
            continue;
        }
        into.insert(key.clone(), entry.clone());
    }
}

/// Outcome of a lookup, with the number of per-type table lookups it took
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: Option<Value>,
    pub lookups: usize,
}

/// Default value store for every registered element type
#[derive(Debug, Clone)]
pub struct StyleSchema {
    colors: HashMap<String, Color>,
    constants: HashMap<String, Value>,
    elements: HashMap<String, BTreeMap<String, Entry>>,
    /// Type name -> `[self, supertype, ..., ROOT_TYPE]`
    chains: HashMap<String, Vec<String>>,
}

impl StyleSchema {
    /// Empty schema knowing only the root element type
    pub fn new() -> Self {
        let mut chains = HashMap::new();
        chains.insert(ROOT_TYPE.to_string(), vec![ROOT_TYPE.to_string()]);

        Self {
            colors: HashMap::new(),
            constants: HashMap::new(),
            elements: HashMap::new(),
            chains,
        }
    }

    /// Register an element type below an already registered supertype
    pub fn register_type(&mut self, name: &str, supertype: &str) -> Result<(), StyleError> {
        let parent_chain = self
            .chains
            .get(supertype)
            .ok_or_else(|| StyleError::UnknownElementType(supertype.to_string()))?;

        let mut chain = Vec::with_capacity(parent_chain.len() + 1);
        chain.push(name.to_string());
        chain.extend(parent_chain.iter().cloned());

        tracing::trace!("Registered element type {}", chain.join(" < "));
        self.chains.insert(name.to_string(), chain);
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.chains.contains_key(name)
    }

    /// Applicable type names for `name`, most specific first
    pub fn chain(&self, name: &str) -> Option<&[String]> {
        self.chains.get(name).map(|c| c.as_slice())
    }

    /// Merge a configuration, last writer wins key by key.
    ///
    /// The whole configuration is validated first; on error the schema is
    /// left untouched.
    pub fn merge(&mut self, config: &StyleConfig) -> Result<&mut Self, StyleError> {
        let mut colors = Vec::with_capacity(config.colors.len());
        for (name, spec) in &config.colors {
            colors.push((name.clone(), spec.to_color(name)?));
        }

        let mut constants = Vec::with_capacity(config.constants.len());
        for (name, value) in &config.constants {
            let value = Value::from_json(value)
                .ok_or_else(|| StyleError::InvalidConstant(name.clone()))?;
            constants.push((name.clone(), value));
        }

        let mut elements = Vec::with_capacity(config.elements.len());
        for (type_name, data) in &config.elements {
            if !self.is_registered(type_name) {
                return Err(StyleError::UnknownElementType(type_name.clone()));
            }
            match Entry::from_json(type_name, data)? {
                Some(Entry::Table(table)) => elements.push((type_name.clone(), table)),
                None => {}
                Some(_) => return Err(StyleError::InvalidTable(type_name.clone())),
            }
        }

        tracing::debug!(
            "Merging style config: {} colors, {} constants, {} element tables",
            colors.len(),
            constants.len(),
            elements.len()
        );

        self.colors.extend(colors);
        self.constants.extend(constants);
        for (type_name, table) in elements {
            merge_tables(self.elements.entry(type_name).or_default(), &table);
        }

        Ok(self)
    }

    /// Named color
    pub fn color(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    /// Named constant
    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    /// Resolve `path` for `type_name`, reporting how many lookups it took
    pub fn resolve(&self, type_name: &str, path: &[&str]) -> Result<Resolution, StyleError> {
        let chain = self
            .chains
            .get(type_name)
            .ok_or_else(|| StyleError::UnknownElementType(type_name.to_string()))?;

        let mut lookups = 0;
        let value = self.resolve_in(chain, path, true, &mut lookups);
        Ok(Resolution { value, lookups })
    }

    /// Resolved value, `None` if no table in either fallback chain has it
    pub fn get(&self, type_name: &str, path: &[&str]) -> Result<Option<Value>, StyleError> {
        Ok(self.resolve(type_name, path)?.value)
    }

    /// Resolved value, failing with `MissingDefault` if there is none
    pub fn default(&self, type_name: &str, path: &[&str]) -> Result<Value, StyleError> {
        self.get(type_name, path)?
            .ok_or_else(|| StyleError::MissingDefault {
                type_name: type_name.to_string(),
                path: StyleError::path_of(path),
            })
    }

    pub fn default_number(&self, type_name: &str, path: &[&str]) -> Result<f64, StyleError> {
        let value = self.default(type_name, path)?;
        value.as_number().ok_or_else(|| Self::wrong_type(type_name, path, "number"))
    }

    pub fn default_f32(&self, type_name: &str, path: &[&str]) -> Result<f32, StyleError> {
        self.default_number(type_name, path).map(|n| n as f32)
    }

    pub fn default_color(&self, type_name: &str, path: &[&str]) -> Result<Color, StyleError> {
        let value = self.default(type_name, path)?;
        value.as_color().ok_or_else(|| Self::wrong_type(type_name, path, "color"))
    }

    pub fn default_text(&self, type_name: &str, path: &[&str]) -> Result<String, StyleError> {
        match self.default(type_name, path)? {
            Value::Text(s) => Ok(s),
            _ => Err(Self::wrong_type(type_name, path, "string")),
        }
    }

    pub fn default_bool(&self, type_name: &str, path: &[&str]) -> Result<bool, StyleError> {
        let value = self.default(type_name, path)?;
        value.as_bool().ok_or_else(|| Self::wrong_type(type_name, path, "boolean"))
    }

    fn wrong_type(type_name: &str, path: &[&str], expected: &'static str) -> StyleError {
        StyleError::WrongType {
            type_name: type_name.to_string(),
            path: StyleError::path_of(path),
            expected,
        }
    }

    fn resolve_in(
        &self,
        chain: &[String],
        path: &[&str],
        outer: bool,
        lookups: &mut usize,
    ) -> Option<Value> {
        let (type_name, ancestors) = chain.split_first()?;

        *lookups += 1;
        let mut value = self.lookup(type_name, path);

        if value.is_none() && !ancestors.is_empty() {
            value = self.resolve_in(ancestors, path, false, lookups);
        }

        if value.is_none() && outer && path.len() > 1 {
            value = self.resolve_in(chain, &path[1..], true, lookups);
        }

        value
    }

    /// Single table walk, no fallback
    fn lookup(&self, type_name: &str, path: &[&str]) -> Option<Value> {
        let mut table = self.elements.get(type_name)?;
        let (leaf, branch) = path.split_last()?;

        for key in branch {
            match table.get(*key)? {
                Entry::Table(inner) => table = inner,
                _ => return None,
            }
        }

        match table.get(*leaf)? {
            Entry::Literal(value) => Some(value.clone()),
            Entry::ColorRef(name) => self.color(name).map(Value::Color),
            Entry::ConstantRef(name) => Some(
                self.constant(name)
                    .cloned()
                    .unwrap_or_else(|| Value::Text(format!("{SIGIL}{name}"))),
            ),
            Entry::Table(_) => None,
        }
    }
}

impl Default for StyleSchema {
    fn default() -> Self {
        Self::new()
    }
}
