//! Toolchain identity and the dummy toolchain sentinels.

use std::fmt;

use tcenv_common::constants::{DUMMY_NAME, DUMMY_VERSION};
use tcenv_common::error::Result;
use tcenv_modules::ModuleRegistry;

/// Name and version of a toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolchainId {
    /// Toolchain name, e.g. `GCC` or `dummy`.
    pub name: String,
    /// Toolchain version, e.g. `4.9.2`.
    pub version: String,
}

impl ToolchainId {
    /// Creates a toolchain identity.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Whether this is the dummy toolchain (no compiler stack).
    #[must_use]
    pub fn is_dummy(&self) -> bool {
        self.name == DUMMY_NAME
    }

    /// Whether the version is the dummy version sentinel.
    #[must_use]
    pub fn is_dummy_version(&self) -> bool {
        self.version == DUMMY_VERSION
    }

    /// Suffix appended to the version of every module built with this
    /// toolchain.
    ///
    /// `-GCC-4.9.2` for a real toolchain, nothing for the dummy toolchain,
    /// and the bare version for a dummy toolchain carrying a real version.
    #[must_use]
    pub fn module_suffix(&self) -> String {
        if !self.is_dummy() {
            format!("-{}-{}", self.name, self.version)
        } else if !self.is_dummy_version() {
            self.version.clone()
        } else {
            String::new()
        }
    }
}

impl fmt::Display for ToolchainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

/// Checks whether a toolchain module `name/version` is installed.
///
/// The dummy toolchain has no backing module and always exists; no registry
/// call is made for it.
///
/// # Errors
///
/// Returns an error if the registry cannot be queried.
pub fn toolchain_exists(registry: &dyn ModuleRegistry, name: &str, version: &str) -> Result<bool> {
    if name == DUMMY_NAME {
        tracing::debug!("checking for {DUMMY_NAME} toolchain, always exists");
        return Ok(true);
    }
    tracing::debug!(name, version, "checking for toolchain module");
    registry.exists(name, version)
}
