//! Export of toolchain variables into the build environment.

use std::collections::BTreeSet;

use tcenv_common::config::ToolchainConfig;

use crate::environment::Environment;
use crate::variables::VariableTable;

/// Sets every variable of `variables` in `env`, sorted by name.
///
/// Each binding is exported twice: under its own name and under the alias
/// from [`ToolchainConfig::alias_for`], so makefiles can reference the value
/// without a recursive self-reference. Names in `excluded` or in the
/// configuration's exclusion list are skipped.
pub fn apply(
    variables: &VariableTable,
    env: &mut dyn Environment,
    config: &ToolchainConfig,
    excluded: &BTreeSet<String>,
) {
    tracing::debug!(excluded = ?excluded, "setting toolchain variables");
    for (name, value) in variables.entries() {
        if excluded.contains(&name) || config.excluded_variables.contains(&name) {
            tracing::debug!(variable = %name, value = %value, "not setting environment variable");
            continue;
        }
        tracing::debug!(variable = %name, value = %value, "setting environment variable");
        env.set(&name, &value);
        env.set(&config.alias_for(&name), &value);
    }
}
