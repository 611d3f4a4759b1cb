//! Unified error type for the tcenv workspace.
//!
//! Every failure during toolchain preparation is fatal: callers propagate
//! these errors and abort the build step instead of continuing with a
//! partially configured environment.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ToolchainError {
    /// The toolchain was constructed without a name or version.
    #[error("no toolchain {field} provided")]
    Identity {
        /// Missing identity field (`name` or `version`).
        field: &'static str,
    },

    /// No module backs the requested toolchain.
    #[error("no module found for toolchain name '{name}' ({version})")]
    ToolchainNotFound {
        /// Toolchain name.
        name: String,
        /// Toolchain version.
        version: String,
    },

    /// A dependency resolved to a module that is not installed.
    #[error("no module found for dependency {name}/{tag}")]
    DependencyNotFound {
        /// Dependency name.
        name: String,
        /// Resolved module version tag.
        tag: String,
    },

    /// No installed module matches an unversioned dependency.
    #[error("no toolchain version for dependency name {name} (suffix {suffix}) found")]
    Resolution {
        /// Dependency name.
        name: String,
        /// Suffix pattern that was searched.
        suffix: String,
    },

    /// A dependency declaration uses a retired field.
    #[error("legacy field '{field}' found in dependency {name}")]
    LegacySchema {
        /// Dependency name.
        name: String,
        /// The retired field.
        field: &'static str,
    },

    /// A toolchain option outside the option schema was set.
    #[error("undefined toolchain option {name} specified (possible names {known})")]
    UnknownOption {
        /// Rejected option name.
        name: String,
        /// Comma-separated list of recognized names.
        known: String,
    },

    /// No install root is known for a loaded software package.
    #[error("software root for {name} was not found in environment")]
    SoftwareRootNotFound {
        /// Software name.
        name: String,
    },

    /// No version is known for a loaded software package.
    #[error("software version for {name} was not found in environment")]
    SoftwareVersionNotFound {
        /// Software name.
        name: String,
    },

    /// The toolchain was already prepared; its dependencies are fixed.
    #[error("toolchain {toolchain} has already been prepared")]
    AlreadyPrepared {
        /// Toolchain rendered as `name/version`.
        toolchain: String,
    },

    /// The module registry could not load a module.
    #[error("unable to load module {module}")]
    ModuleLoad {
        /// Module reference rendered as `name/version`.
        module: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ToolchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_error_names_dependency_and_suffix() {
        let err = ToolchainError::Resolution {
            name: "zlib".into(),
            suffix: "-gcc-4.9".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("zlib"), "got: {msg}");
        assert!(msg.contains("-gcc-4.9"), "got: {msg}");
    }

    #[test]
    fn unknown_option_lists_known_names() {
        let err = ToolchainError::UnknownOption {
            name: "turbo".into(),
            known: "32bit,pic".into(),
        };
        assert_eq!(
            err.to_string(),
            "undefined toolchain option turbo specified (possible names 32bit,pic)"
        );
    }

    #[test]
    fn json_errors_convert() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ToolchainError = source.into();
        assert!(matches!(err, ToolchainError::Serialization { .. }));
    }
}
