//! Compiler and linker flags from dependency install roots.

use std::path::PathBuf;

use tcenv_common::constants::{
    CPPFLAGS, INCLUDE_SUBDIR, LDFLAGS, LIB_SUBDIR, LIB64_SUBDIR, OPTION_32BIT,
};
use tcenv_common::error::{Result, ToolchainError};
use tcenv_modules::ModuleRegistry;

use crate::dependency::ResolvedDependency;
use crate::options::OptionSet;
use crate::variables::VariableTable;

/// Which dependencies to compose flags for, and extra subdirectories.
#[derive(Debug, Clone, Default)]
pub struct DependencyVariables {
    /// Explicit dependency names; all registered dependencies when `None`
    /// or empty.
    pub names: Option<Vec<String>>,
    /// Subdirectories added to `CPPFLAGS` ahead of `include`.
    pub extra_cpp: Vec<String>,
    /// Subdirectories added to `LDFLAGS` ahead of the library directories.
    pub extra_ld: Vec<String>,
}

/// Returns the install root of a loaded software package.
///
/// # Errors
///
/// Returns [`ToolchainError::SoftwareRootNotFound`] if the registry knows no
/// root for `name`.
pub fn software_root(registry: &dyn ModuleRegistry, name: &str) -> Result<PathBuf> {
    registry.software_root(name).map_or_else(
        || {
            Err(ToolchainError::SoftwareRootNotFound {
                name: name.to_string(),
            })
        },
        |root| {
            tracing::debug!(software = name, root = %root.display(), "software root found");
            Ok(root)
        },
    )
}

/// Appends `CPPFLAGS` and `LDFLAGS` fragments for each target dependency.
///
/// `CPPFLAGS` receives `<root>/include`; `LDFLAGS` receives `<root>/lib64`
/// and `<root>/lib`, or only `<root>/lib` when the `32bit` option is set.
/// Fragments are appended in dependency order, subdirectory order within a
/// dependency. The table decides how repeated fragments are handled.
///
/// # Errors
///
/// Returns an error if a target dependency has no known install root.
pub fn add_dependency_variables(
    registry: &dyn ModuleRegistry,
    options: &OptionSet,
    dependencies: &[ResolvedDependency],
    variables: &mut VariableTable,
    request: &DependencyVariables,
) -> Result<()> {
    let mut cpp_paths = request.extra_cpp.clone();
    cpp_paths.push(INCLUDE_SUBDIR.to_string());

    let mut ld_paths = request.extra_ld.clone();
    if !options.enabled(OPTION_32BIT) {
        ld_paths.push(LIB64_SUBDIR.to_string());
    }
    ld_paths.push(LIB_SUBDIR.to_string());

    let names: Vec<&str> = match &request.names {
        Some(names) if !names.is_empty() => names.iter().map(String::as_str).collect(),
        _ => dependencies.iter().map(|d| d.name.as_str()).collect(),
    };

    for name in names {
        let root = software_root(registry, name)?;
        variables.append_subdirs(CPPFLAGS, &root, &cpp_paths);
        variables.append_subdirs(LDFLAGS, &root, &ld_paths);
    }
    Ok(())
}
