//! Site configuration for toolchain preparation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolchainError};

/// Site-wide settings consulted while preparing a toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Prefix of the alias exported next to every toolchain variable.
    pub env_alias_prefix: String,
    /// Variables that are never exported, in addition to the caller's
    /// exclusion set.
    pub excluded_variables: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            env_alias_prefix: crate::constants::DEFAULT_ENV_ALIAS_PREFIX.to_string(),
            excluded_variables: Vec::new(),
        }
    }
}

impl ToolchainConfig {
    /// Loads the configuration from a JSON file.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading toolchain configuration");
        let content = std::fs::read_to_string(path).map_err(|e| ToolchainError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Returns the alias name for `variable`, e.g. `EBVARCFLAGS`.
    #[must_use]
    pub fn alias_for(&self, variable: &str) -> String {
        format!("{}{variable}", self.env_alias_prefix)
    }
}
