//! Validation and registration of dependency declarations.

use tcenv_common::error::{Result, ToolchainError};
use tcenv_modules::ModuleRegistry;

use crate::dependency::{Dependency, DependencyDecl, ResolvedDependency};
use crate::identity::ToolchainId;
use crate::resolver;

/// Validates `declarations` in order and appends each to `dependencies`.
///
/// Every declaration is resolved to a tag (unless it already carries one)
/// and checked for existence in the registry before it is appended. The
/// first failure stops registration; dependencies appended before it stay.
///
/// # Errors
///
/// Returns an error if a declaration uses the legacy schema, cannot be
/// resolved, or names a module that is not installed.
pub fn add_dependencies(
    id: &ToolchainId,
    registry: &dyn ModuleRegistry,
    declarations: impl IntoIterator<Item = DependencyDecl>,
    dependencies: &mut Vec<ResolvedDependency>,
) -> Result<()> {
    for decl in declarations {
        let dependency = Dependency::try_from(decl)?;

        let tag = match &dependency.tag {
            Some(tag) => tag.clone(),
            None => resolver::resolve_version(id, registry, &dependency)?,
        };

        if !registry.exists(&dependency.name, &tag)? {
            return Err(ToolchainError::DependencyNotFound {
                name: dependency.name,
                tag,
            });
        }

        let resolved = ResolvedDependency::new(dependency, tag);
        tracing::debug!(dependency = %resolved.module_ref(), "added toolchain dependency");
        dependencies.push(resolved);
    }
    Ok(())
}
