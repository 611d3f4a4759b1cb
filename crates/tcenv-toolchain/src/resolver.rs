//! Module version tags for dependency declarations.

use tcenv_common::error::{Result, ToolchainError};
use tcenv_common::types::ModuleRef;
use tcenv_modules::ModuleRegistry;

use crate::dependency::Dependency;
use crate::identity::ToolchainId;

/// Suffix a dependency's tag must carry under toolchain `id`.
///
/// The toolchain suffix followed by the dependency's own suffix; the
/// toolchain part is dropped for toolchain-independent dependencies.
#[must_use]
pub fn dependency_suffix(id: &ToolchainId, dependency: &Dependency) -> String {
    let toolchain = if dependency.toolchain_independent {
        String::new()
    } else {
        id.module_suffix()
    };
    format!("{toolchain}{}", dependency.suffix)
}

/// Resolves the module version tag of `dependency`.
///
/// An explicit version yields `version + suffix` without consulting the
/// registry. Otherwise the greatest installed tag ending in the suffix is
/// chosen.
///
/// # Errors
///
/// Returns [`ToolchainError::Resolution`] if no installed module matches an
/// unversioned dependency.
pub fn resolve_version(
    id: &ToolchainId,
    registry: &dyn ModuleRegistry,
    dependency: &Dependency,
) -> Result<String> {
    let suffix = dependency_suffix(id, dependency);

    if let Some(version) = &dependency.version {
        let tag = format!("{version}{suffix}");
        tracing::debug!(dependency = %dependency.name, tag = %tag, "explicit version");
        return Ok(tag);
    }

    let matches = registry.available(&dependency.name, &suffix)?;
    match select_latest(matches) {
        Some(tag) => {
            tracing::debug!(
                dependency = %dependency.name,
                tag = %tag,
                "most recent installed version"
            );
            Ok(tag)
        }
        None => Err(ToolchainError::Resolution {
            name: dependency.name.clone(),
            suffix,
        }),
    }
}

/// Picks the greatest version tag from a registry listing.
///
/// Tags compare lexicographically, so the choice does not depend on the
/// order the registry lists them in.
#[must_use]
pub fn select_latest(matches: Vec<ModuleRef>) -> Option<String> {
    matches.into_iter().map(|m| m.version).max()
}
