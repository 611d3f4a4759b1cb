//! Toolchain options.
//!
//! A fixed schema of recognized option names, each with a description and a
//! default. Setting a name outside the schema is an error.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tcenv_common::constants::OPTION_32BIT;
use tcenv_common::error::{Result, ToolchainError};

/// Value of a toolchain option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// On/off switch.
    Bool(bool),
    /// Free-form value, e.g. an architecture name.
    Text(String),
}

impl OptionValue {
    /// Whether the option counts as enabled.
    ///
    /// Text values are enabled when non-empty.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => !s.is_empty(),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A recognized option with its description and default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Human-readable description.
    pub description: &'static str,
    /// Value used until the option is set.
    pub default: OptionValue,
}

const DEFAULT_SCHEMA: &[(&str, &str, bool)] = &[
    (OPTION_32BIT, "Build 32-bit binaries", false),
    ("debug", "Enable debug symbols", false),
    ("opt", "Use aggressive optimization", false),
    ("optarch", "Optimize for the build host architecture", true),
    ("pic", "Generate position-independent code", false),
    ("shared", "Build shared libraries", false),
    ("usempi", "Use the MPI compiler wrappers", false),
];

/// The options of one toolchain.
#[derive(Debug, Clone)]
pub struct OptionSet {
    schema: BTreeMap<String, OptionSpec>,
    values: BTreeMap<String, OptionValue>,
}

impl OptionSet {
    /// Creates an option set with the default schema and no values set.
    #[must_use]
    pub fn new() -> Self {
        let schema = DEFAULT_SCHEMA
            .iter()
            .map(|&(name, description, default)| {
                (
                    name.to_string(),
                    OptionSpec {
                        description,
                        default: OptionValue::Bool(default),
                    },
                )
            })
            .collect();
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }

    /// Adds a recognized option to the schema.
    ///
    /// Toolchain flavors use this to extend the default schema.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        description: &'static str,
        default: OptionValue,
    ) {
        let _ = self.schema.insert(
            name.into(),
            OptionSpec {
                description,
                default,
            },
        );
    }

    /// Returns the current value of `name`, falling back to its default.
    ///
    /// Returns `None` for names outside the schema.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values
            .get(name)
            .or_else(|| self.schema.get(name).map(|spec| &spec.default))
    }

    /// Whether `name` is set to an enabled value.
    #[must_use]
    pub fn enabled(&self, name: &str) -> bool {
        self.get(name).is_some_and(OptionValue::is_enabled)
    }

    /// Sets a recognized option.
    ///
    /// # Errors
    ///
    /// Returns [`ToolchainError::UnknownOption`] if `name` is not part of the
    /// schema.
    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<()> {
        if !self.schema.contains_key(name) {
            return Err(ToolchainError::UnknownOption {
                name: name.to_string(),
                known: self.names().join(","),
            });
        }
        let value = value.into();
        tracing::debug!(option = name, value = %value, "toolchain option set");
        let _ = self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Recognized option names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.schema.keys().map(String::as_str).collect()
    }

    /// Returns the schema entry for `name`.
    #[must_use]
    pub fn spec(&self, name: &str) -> Option<&OptionSpec> {
        self.schema.get(name)
    }
}

impl Default for OptionSet {
    fn default() -> Self {
        Self::new()
    }
}
