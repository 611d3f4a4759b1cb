//! Domain primitive types used across the tcenv workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named, versioned module as known to the module registry.
///
/// The version is a full tag: it already encodes the toolchain suffix and any
/// custom suffix, e.g. `zlib/1.2.8-GCC-4.9.2`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleRef {
    /// Module name.
    pub name: String,
    /// Module version tag.
    pub version: String,
}

impl ModuleRef {
    /// Creates a module reference from a name and version tag.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}
