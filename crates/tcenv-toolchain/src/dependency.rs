//! Dependency declarations and their validated forms.
//!
//! Declarations arrive as loosely shaped records ([`DependencyDecl`]). They
//! are validated once into a [`Dependency`], which rejects the retired `tk`
//! field, and become a [`ResolvedDependency`] once their module version tag
//! is known and the module has been found in the registry.

use serde::{Deserialize, Deserializer, Serialize};
use tcenv_common::error::ToolchainError;
use tcenv_common::types::ModuleRef;

/// A dependency as declared by a build recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyDecl {
    /// Software name.
    pub name: String,
    /// Explicit version; when absent the most recent installed build is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Custom suffix appended after the toolchain suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Marks the dependency as built with the dummy toolchain.
    #[serde(default, rename = "dummy")]
    pub toolchain_independent: bool,
    /// Pre-resolved module version tag.
    #[serde(default, rename = "tc", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Toolkit field of the retired declaration format.
    ///
    /// `Some` whenever the key is present, including `"tk": null`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub tk: Option<serde_json::Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl DependencyDecl {
    /// Declares a dependency on `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pins an explicit version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the custom suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Marks the dependency as independent of the toolchain.
    #[must_use]
    pub const fn toolchain_independent(mut self) -> Self {
        self.toolchain_independent = true;
        self
    }

    /// Supplies an already resolved version tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A validated dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Software name.
    pub name: String,
    /// Explicit version.
    pub version: Option<String>,
    /// Custom suffix, empty when not declared.
    pub suffix: String,
    /// Whether the toolchain suffix is omitted.
    pub toolchain_independent: bool,
    /// Pre-resolved module version tag.
    pub tag: Option<String>,
}

impl TryFrom<DependencyDecl> for Dependency {
    type Error = ToolchainError;

    fn try_from(decl: DependencyDecl) -> Result<Self, Self::Error> {
        if decl.tk.is_some() {
            return Err(ToolchainError::LegacySchema {
                name: decl.name,
                field: "tk",
            });
        }
        Ok(Self {
            name: decl.name,
            version: decl.version,
            suffix: decl.suffix.unwrap_or_default(),
            toolchain_independent: decl.toolchain_independent,
            tag: decl.tag,
        })
    }
}

/// A dependency with a module version tag that exists in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    /// Software name.
    pub name: String,
    /// Explicit version, as declared.
    pub version: Option<String>,
    /// Custom suffix, as declared.
    pub suffix: String,
    /// Whether the toolchain suffix was omitted.
    pub toolchain_independent: bool,
    /// Full module version tag.
    pub tag: String,
}

impl ResolvedDependency {
    /// Attaches a resolved tag to a validated dependency.
    #[must_use]
    pub fn new(dependency: Dependency, tag: String) -> Self {
        Self {
            name: dependency.name,
            version: dependency.version,
            suffix: dependency.suffix,
            toolchain_independent: dependency.toolchain_independent,
            tag,
        }
    }

    /// The module this dependency loads.
    #[must_use]
    pub fn module_ref(&self) -> ModuleRef {
        ModuleRef::new(self.name.clone(), self.tag.clone())
    }
}
