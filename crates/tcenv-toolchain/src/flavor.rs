//! Toolchain flavors.
//!
//! A flavor describes a concrete kind of toolchain: the name and version it
//! defaults to and the variables it contributes beyond the dependency flags.

use std::fmt;

use crate::options::OptionSet;
use crate::variables::VariableTable;

/// A concrete kind of toolchain.
pub trait ToolchainFlavor: fmt::Debug + Send + Sync {
    /// Name used when the caller does not supply one.
    fn default_name(&self) -> Option<&str> {
        None
    }

    /// Version used when the caller does not supply one.
    fn default_version(&self) -> Option<&str> {
        None
    }

    /// Whether this flavor provides support for the toolchain `name`.
    fn is_toolchain_for(&self, name: &str) -> bool {
        self.default_name() == Some(name)
    }

    /// Extends the option schema with flavor-specific options.
    fn define_options(&self, options: &mut OptionSet) {
        let _ = options;
    }

    /// Adds the flavor's own variables, e.g. compiler commands.
    ///
    /// Runs during preparation, after the toolchain modules are loaded and
    /// before dependency flags are composed.
    fn set_variables(&self, options: &OptionSet, variables: &mut VariableTable) {
        let _ = (options, variables);
        tracing::debug!("set_variables: no flavor variables");
    }
}

/// Flavor without defaults or extra variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericFlavor;

impl ToolchainFlavor for GenericFlavor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Gcc;

    impl ToolchainFlavor for Gcc {
        fn default_name(&self) -> Option<&str> {
            Some("GCC")
        }
    }

    #[test]
    fn generic_flavor_supports_no_name() {
        assert!(!GenericFlavor.is_toolchain_for("GCC"));
        assert_eq!(GenericFlavor.default_version(), None);
    }

    #[test]
    fn flavor_matches_its_default_name() {
        assert!(Gcc.is_toolchain_for("GCC"));
        assert!(!Gcc.is_toolchain_for("iccifort"));
    }

    #[test]
    fn default_set_variables_leaves_table_untouched() {
        let mut vars = VariableTable::new();
        Gcc.set_variables(&OptionSet::new(), &mut vars);
        assert!(vars.is_empty());
    }
}
