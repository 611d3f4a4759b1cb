//! Module registry abstraction.

use std::path::PathBuf;

use tcenv_common::error::Result;
use tcenv_common::types::ModuleRef;

/// Registry of installed software modules.
///
/// Existence and listing queries are idempotent. Loading has a lasting
/// effect: software roots and versions only become visible for modules that
/// have been loaded.
pub trait ModuleRegistry: Send + Sync {
    /// Returns whether a module `name/version` is installed.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be queried.
    fn exists(&self, name: &str, version: &str) -> Result<bool>;

    /// Lists the installed modules called `name` whose version tag ends with
    /// `suffix`.
    ///
    /// The listing is ordered so that the last entry is the most recent.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be queried.
    fn available(&self, name: &str, suffix: &str) -> Result<Vec<ModuleRef>>;

    /// Loads a batch of modules.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry does not name a loadable module.
    fn load(&self, batch: &[ModuleRef]) -> Result<()>;

    /// Lists the dependencies of `name/version`.
    ///
    /// `depth` 0 yields direct dependencies only; each additional level
    /// descends one step further into the dependency tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the module is unknown to the registry.
    fn dependencies_for(&self, name: &str, version: &str, depth: usize) -> Result<Vec<ModuleRef>>;

    /// Returns the install root of a loaded software package.
    fn software_root(&self, name: &str) -> Option<PathBuf>;

    /// Returns the version of a loaded software package.
    fn software_version(&self, name: &str) -> Option<String>;
}
