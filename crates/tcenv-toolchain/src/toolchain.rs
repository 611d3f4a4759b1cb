//! The toolchain and its preparation pipeline.
//!
//! Preparation runs strictly in order:
//! 1. verify that the toolchain module exists;
//! 2. stop here for the dummy toolchain with the dummy version;
//! 3. load the toolchain module and the registered dependencies in one batch;
//! 4. compose flavor and dependency variables;
//! 5. export the variables into the environment.
//!
//! Steps 4 and 5 are skipped in module-only mode. Any failure aborts
//! preparation. A successful preparation freezes the dependency list: later
//! registrations and repeated preparations are rejected.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use tcenv_common::config::ToolchainConfig;
use tcenv_common::error::{Result, ToolchainError};
use tcenv_common::types::ModuleRef;
use tcenv_modules::ModuleRegistry;

use crate::composer::{self, DependencyVariables};
use crate::dependency::{DependencyDecl, ResolvedDependency};
use crate::environment::Environment;
use crate::flavor::{GenericFlavor, ToolchainFlavor};
use crate::identity::{self, ToolchainId};
use crate::options::{OptionSet, OptionValue};
use crate::variables::VariableTable;
use crate::{applier, registrar};

/// Caller flags for [`Toolchain::prepare`].
#[derive(Debug, Clone, Default)]
pub struct PrepareOptions {
    /// Only load modules; leave variables and the environment untouched.
    pub module_only: bool,
    /// Variables that must not be exported.
    pub excluded: BTreeSet<String>,
}

impl PrepareOptions {
    /// Options for a module-only preparation.
    #[must_use]
    pub fn only_modules() -> Self {
        Self {
            module_only: true,
            excluded: BTreeSet::new(),
        }
    }

    /// Excludes `name` from export.
    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        let _ = self.excluded.insert(name.into());
        self
    }
}

/// A compiler/MPI/math-library stack for one build.
#[derive(Debug)]
pub struct Toolchain {
    id: ToolchainId,
    options: OptionSet,
    variables: VariableTable,
    dependencies: Vec<ResolvedDependency>,
    toolchain_dependencies: Vec<ModuleRef>,
    flavor: Box<dyn ToolchainFlavor>,
    config: ToolchainConfig,
    prepared: bool,
}

impl Toolchain {
    /// Creates a generic toolchain `name/version`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolchainError::Identity`] if `name` or `version` is empty.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Result<Self> {
        ToolchainBuilder::new().name(name).version(version).build()
    }

    /// Starts configuring a toolchain.
    #[must_use]
    pub fn builder() -> ToolchainBuilder {
        ToolchainBuilder::new()
    }

    /// Toolchain name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.id.name
    }

    /// Toolchain version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.id.version
    }

    /// Toolchain identity.
    #[must_use]
    pub const fn id(&self) -> &ToolchainId {
        &self.id
    }

    /// Whether this is the dummy toolchain.
    #[must_use]
    pub fn is_dummy(&self) -> bool {
        self.id.is_dummy()
    }

    /// Whether the version is the dummy version sentinel.
    #[must_use]
    pub fn is_dummy_version(&self) -> bool {
        self.id.is_dummy_version()
    }

    /// Toolchain options.
    #[must_use]
    pub const fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Toolchain variables.
    #[must_use]
    pub const fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// Mutable access to the toolchain variables.
    pub const fn variables_mut(&mut self) -> &mut VariableTable {
        &mut self.variables
    }

    /// Registered dependencies, in registration order.
    #[must_use]
    pub fn dependencies(&self) -> &[ResolvedDependency] {
        &self.dependencies
    }

    /// Direct dependencies of the loaded toolchain module.
    ///
    /// Empty until [`prepare`](Self::prepare) has loaded a non-dummy
    /// toolchain.
    #[must_use]
    pub fn toolchain_dependencies(&self) -> &[ModuleRef] {
        &self.toolchain_dependencies
    }

    /// Whether [`prepare`](Self::prepare) has completed successfully.
    #[must_use]
    pub const fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Site configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    /// Checks whether a toolchain module exists.
    ///
    /// `name` and `version` default to this toolchain's identity. The dummy
    /// short-circuit applies to the effective `name`, not to this toolchain's
    /// own name.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be queried.
    pub fn exists(
        &self,
        registry: &dyn ModuleRegistry,
        name: Option<&str>,
        version: Option<&str>,
    ) -> Result<bool> {
        identity::toolchain_exists(
            registry,
            name.unwrap_or(&self.id.name),
            version.unwrap_or(&self.id.version),
        )
    }

    /// Sets toolchain options.
    ///
    /// # Errors
    ///
    /// Returns [`ToolchainError::UnknownOption`] for the first name outside
    /// the option schema.
    pub fn set_options(&mut self, options: BTreeMap<String, OptionValue>) -> Result<()> {
        for (name, value) in options {
            self.options.set(&name, value)?;
        }
        Ok(())
    }

    /// Validates dependency declarations and registers them.
    ///
    /// # Errors
    ///
    /// Returns [`ToolchainError::AlreadyPrepared`] once the toolchain has
    /// been prepared. Otherwise returns an error for the first declaration
    /// that uses the legacy schema, cannot be resolved, or names a missing
    /// module. Dependencies registered before the failure are kept.
    pub fn add_dependencies(
        &mut self,
        registry: &dyn ModuleRegistry,
        declarations: impl IntoIterator<Item = DependencyDecl>,
    ) -> Result<()> {
        self.ensure_unprepared()?;
        tracing::debug!(toolchain = %self.id, "adding toolchain dependencies");
        registrar::add_dependencies(&self.id, registry, declarations, &mut self.dependencies)
    }

    /// Loads the toolchain and its dependencies and sets up the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ToolchainError::AlreadyPrepared`] on a repeated call, or an
    /// error if the toolchain module does not exist, a module cannot be
    /// loaded, or a dependency has no known install root.
    pub fn prepare(
        &mut self,
        registry: &dyn ModuleRegistry,
        env: &mut dyn Environment,
        options: &PrepareOptions,
    ) -> Result<()> {
        self.ensure_unprepared()?;
        self.run_prepare(registry, env, options)?;
        self.prepared = true;
        Ok(())
    }

    fn ensure_unprepared(&self) -> Result<()> {
        if self.prepared {
            return Err(ToolchainError::AlreadyPrepared {
                toolchain: self.id.to_string(),
            });
        }
        Ok(())
    }

    fn run_prepare(
        &mut self,
        registry: &dyn ModuleRegistry,
        env: &mut dyn Environment,
        options: &PrepareOptions,
    ) -> Result<()> {
        if !self.exists(registry, None, None)? {
            return Err(ToolchainError::ToolchainNotFound {
                name: self.id.name.clone(),
                version: self.id.version.clone(),
            });
        }

        if self.is_dummy() && self.is_dummy_version() {
            tracing::info!("dummy toolchain with dummy version, not loading dependencies");
            return Ok(());
        }

        self.load_modules(registry)?;

        if options.module_only {
            tracing::debug!(toolchain = %self.id, "module-only preparation, not setting variables");
            return Ok(());
        }

        self.flavor.set_variables(&self.options, &mut self.variables);
        composer::add_dependency_variables(
            registry,
            &self.options,
            &self.dependencies,
            &mut self.variables,
            &DependencyVariables::default(),
        )?;
        applier::apply(&self.variables, env, &self.config, &options.excluded);

        tracing::info!(
            toolchain = %self.id,
            dependencies = self.dependencies.len(),
            variables = self.variables.len(),
            "toolchain prepared"
        );
        Ok(())
    }

    fn load_modules(&mut self, registry: &dyn ModuleRegistry) -> Result<()> {
        let mut batch = Vec::with_capacity(self.dependencies.len() + 1);
        if self.is_dummy() {
            tracing::info!(
                version = %self.id.version,
                "dummy toolchain, loading dependencies only"
            );
        } else {
            batch.push(ModuleRef::new(self.id.name.clone(), self.id.version.clone()));
        }
        batch.extend(self.dependencies.iter().map(ResolvedDependency::module_ref));

        if !batch.is_empty() {
            registry.load(&batch)?;
        }

        if !self.is_dummy() {
            self.toolchain_dependencies =
                registry.dependencies_for(&self.id.name, &self.id.version, 0)?;
            tracing::debug!(
                toolchain = %self.id,
                direct = ?self.toolchain_dependencies,
                "direct toolchain dependencies"
            );
        }
        Ok(())
    }

    /// Appends dependency flags for selected dependencies.
    ///
    /// [`prepare`](Self::prepare) composes flags for all registered
    /// dependencies; build steps call this for extra names or
    /// subdirectories.
    ///
    /// # Errors
    ///
    /// Returns an error if a target dependency has no known install root.
    pub fn add_dependency_variables(
        &mut self,
        registry: &dyn ModuleRegistry,
        request: &DependencyVariables,
    ) -> Result<()> {
        composer::add_dependency_variables(
            registry,
            &self.options,
            &self.dependencies,
            &mut self.variables,
            request,
        )
    }

    /// Renders every variable to its plain string value.
    #[must_use]
    pub fn generate_vars(&self) -> BTreeMap<String, String> {
        self.variables.entries().into_iter().collect()
    }

    /// Formats the variables as sorted `NAME=value` lines.
    ///
    /// Each line is prefixed with `offset`; lines are joined with `sep`.
    #[must_use]
    pub fn show_variables(&self, offset: &str, sep: &str) -> String {
        let txt = self
            .variables
            .entries()
            .iter()
            .map(|(name, value)| format!("{offset}{name}={value}"))
            .collect::<Vec<_>>()
            .join(sep);
        tracing::debug!("show_variables:\n{txt}");
        txt
    }

    /// Install root of a loaded software package.
    ///
    /// # Errors
    ///
    /// Returns [`ToolchainError::SoftwareRootNotFound`] if no root is known.
    pub fn software_root(&self, registry: &dyn ModuleRegistry, name: &str) -> Result<PathBuf> {
        composer::software_root(registry, name)
    }

    /// Version of a loaded software package.
    ///
    /// # Errors
    ///
    /// Returns [`ToolchainError::SoftwareVersionNotFound`] if no version is
    /// known.
    pub fn software_version(&self, registry: &dyn ModuleRegistry, name: &str) -> Result<String> {
        let version = registry
            .software_version(name)
            .ok_or_else(|| ToolchainError::SoftwareVersionNotFound {
                name: name.to_string(),
            })?;
        tracing::debug!(software = name, version = %version, "software version found");
        Ok(version)
    }
}

/// Builder for a [`Toolchain`].
#[derive(Debug, Default)]
pub struct ToolchainBuilder {
    name: Option<String>,
    version: Option<String>,
    flavor: Option<Box<dyn ToolchainFlavor>>,
    config: Option<ToolchainConfig>,
    options: BTreeMap<String, OptionValue>,
}

impl ToolchainBuilder {
    /// Creates a builder with no identity, the generic flavor, and the
    /// default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the toolchain name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the toolchain version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the toolchain flavor.
    #[must_use]
    pub fn flavor(mut self, flavor: impl ToolchainFlavor + 'static) -> Self {
        self.flavor = Some(Box::new(flavor));
        self
    }

    /// Sets the site configuration.
    #[must_use]
    pub fn config(mut self, config: ToolchainConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets a toolchain option.
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        let _ = self.options.insert(name.into(), value.into());
        self
    }

    /// Builds the toolchain.
    ///
    /// Missing name or version fall back to the flavor's defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ToolchainError::Identity`] if neither the caller nor the
    /// flavor supplies a name or version, and
    /// [`ToolchainError::UnknownOption`] for an unrecognized option.
    pub fn build(self) -> Result<Toolchain> {
        let flavor = self.flavor.unwrap_or_else(|| Box::new(GenericFlavor));

        let name = self
            .name
            .filter(|n| !n.is_empty())
            .or_else(|| flavor.default_name().map(str::to_string))
            .ok_or(ToolchainError::Identity { field: "name" })?;
        let version = self
            .version
            .filter(|v| !v.is_empty())
            .or_else(|| flavor.default_version().map(str::to_string))
            .ok_or(ToolchainError::Identity { field: "version" })?;

        let mut options = OptionSet::new();
        flavor.define_options(&mut options);

        let mut toolchain = Toolchain {
            id: ToolchainId::new(name, version),
            options,
            variables: VariableTable::new(),
            dependencies: Vec::new(),
            toolchain_dependencies: Vec::new(),
            flavor,
            config: self.config.unwrap_or_default(),
            prepared: false,
        };
        toolchain.set_options(self.options)?;
        tracing::debug!(toolchain = %toolchain.id, "toolchain created");
        Ok(toolchain)
    }
}

#[cfg(test)]
mod tests {
    use tcenv_common::constants::{DUMMY_NAME, DUMMY_VERSION, OPTION_32BIT};
    use tcenv_modules::{MemoryRegistry, ModuleRecord, RegistryCall};

    use super::*;
    use crate::environment::MemoryEnvironment;

    #[derive(Debug)]
    struct Gompi;

    impl ToolchainFlavor for Gompi {
        fn default_name(&self) -> Option<&str> {
            Some("gompi")
        }

        fn define_options(&self, options: &mut OptionSet) {
            options.define("openmp", "Enable OpenMP", OptionValue::Bool(false));
        }

        fn set_variables(&self, options: &OptionSet, variables: &mut VariableTable) {
            variables.set("CC", "mpicc");
            if options.enabled("openmp") {
                variables.append("CFLAGS", "-fopenmp");
            }
        }
    }

    #[derive(Debug)]
    struct Release;

    impl ToolchainFlavor for Release {
        fn default_name(&self) -> Option<&str> {
            Some("gompi")
        }

        fn set_variables(&self, _options: &OptionSet, variables: &mut VariableTable) {
            variables.set("CPPFLAGS", "-DNDEBUG");
        }
    }

    fn registry() -> MemoryRegistry {
        MemoryRegistry::from_records(vec![
            ModuleRecord::new("gompi", "1.4.10")
                .with_root("/apps/gompi/1.4.10")
                .with_dependency("GCC", "4.9.2")
                .with_dependency("OpenMPI", "1.8.4-GCC-4.9.2"),
            ModuleRecord::new("GCC", "4.9.2").with_root("/apps/GCC/4.9.2"),
            ModuleRecord::new("OpenMPI", "1.8.4-GCC-4.9.2").with_root("/apps/OpenMPI/1.8.4"),
            ModuleRecord::new("zlib", "1.2.8-gompi-1.4.10").with_root("/apps/zlib/1.2.8"),
        ])
        .expect("catalog")
    }

    #[test]
    fn missing_name_is_an_identity_error() {
        let err = Toolchain::builder().version("1.0").build().unwrap_err();
        assert!(matches!(err, ToolchainError::Identity { field: "name" }));
    }

    #[test]
    fn empty_version_is_an_identity_error() {
        let err = Toolchain::new("GCC", "").unwrap_err();
        assert!(matches!(err, ToolchainError::Identity { field: "version" }));
    }

    #[test]
    fn flavor_supplies_default_name() {
        let toolchain = Toolchain::builder()
            .flavor(Gompi)
            .version("1.4.10")
            .build()
            .expect("identity complete");
        assert_eq!(toolchain.name(), "gompi");
        assert!(!toolchain.is_dummy());
    }

    #[test]
    fn builder_rejects_unknown_option() {
        let err = Toolchain::builder()
            .name("GCC")
            .version("4.9.2")
            .option("turbo", true)
            .build()
            .unwrap_err();
        assert!(matches!(err, ToolchainError::UnknownOption { .. }));
    }

    #[test]
    fn flavor_options_are_recognized() {
        let toolchain = Toolchain::builder()
            .flavor(Gompi)
            .version("1.4.10")
            .option("openmp", true)
            .build()
            .expect("flavor option");
        assert!(toolchain.options().enabled("openmp"));
    }

    #[test]
    fn set_options_stops_at_unknown_name() {
        let mut toolchain = Toolchain::new("GCC", "4.9.2").expect("identity");
        let mut options = BTreeMap::new();
        let _ = options.insert(OPTION_32BIT.to_string(), OptionValue::Bool(true));
        let _ = options.insert("warp".to_string(), OptionValue::Bool(true));
        let err = toolchain.set_options(options).unwrap_err();
        assert!(err.to_string().contains("warp"), "got: {err}");
        assert!(toolchain.options().enabled(OPTION_32BIT));
    }

    #[test]
    fn exists_defaults_to_own_identity() {
        let toolchain = Toolchain::new("gompi", "1.4.10").expect("identity");
        let registry = registry();
        assert!(toolchain.exists(&registry, None, None).expect("query"));
        assert!(
            !toolchain
                .exists(&registry, None, Some("1.5.0"))
                .expect("query")
        );
        assert!(
            toolchain
                .exists(&registry, Some(DUMMY_NAME), Some(DUMMY_VERSION))
                .expect("query")
        );
    }

    #[test]
    fn prepare_runs_flavor_hook_before_dependency_flags() {
        let registry = registry();
        let mut toolchain = Toolchain::builder()
            .flavor(Gompi)
            .version("1.4.10")
            .option("openmp", true)
            .build()
            .expect("identity");
        toolchain
            .add_dependencies(&registry, vec![DependencyDecl::new("zlib")])
            .expect("zlib installed");

        let mut env = MemoryEnvironment::new();
        toolchain
            .prepare(&registry, &mut env, &PrepareOptions::default())
            .expect("prepares");

        assert_eq!(env.get("CC").as_deref(), Some("mpicc"));
        assert_eq!(env.get("EBVARCFLAGS").as_deref(), Some("-fopenmp"));
        assert_eq!(
            env.get("CPPFLAGS").as_deref(),
            Some("-I/apps/zlib/1.2.8/include")
        );
        assert_eq!(
            toolchain.toolchain_dependencies(),
            [
                ModuleRef::new("GCC", "4.9.2"),
                ModuleRef::new("OpenMPI", "1.8.4-GCC-4.9.2"),
            ]
        );
    }

    #[test]
    fn prepare_loads_toolchain_and_dependencies_in_one_batch() {
        let registry = registry();
        let mut toolchain = Toolchain::new("gompi", "1.4.10").expect("identity");
        toolchain
            .add_dependencies(
                &registry,
                vec![DependencyDecl::new("zlib").with_version("1.2.8")],
            )
            .expect("zlib installed");
        toolchain
            .prepare(
                &registry,
                &mut MemoryEnvironment::new(),
                &PrepareOptions::only_modules(),
            )
            .expect("prepares");

        let loads: Vec<Vec<ModuleRef>> = registry
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                RegistryCall::Load(batch) => Some(batch),
                _ => None,
            })
            .collect();
        assert_eq!(
            loads,
            vec![vec![
                ModuleRef::new("gompi", "1.4.10"),
                ModuleRef::new("zlib", "1.2.8-gompi-1.4.10"),
            ]]
        );
    }

    #[test]
    fn module_only_leaves_environment_and_variables_untouched() {
        let registry = registry();
        let mut toolchain = Toolchain::builder()
            .flavor(Gompi)
            .version("1.4.10")
            .build()
            .expect("identity");
        let mut env = MemoryEnvironment::new();
        toolchain
            .prepare(&registry, &mut env, &PrepareOptions::only_modules())
            .expect("prepares");
        assert!(env.writes().is_empty());
        assert!(toolchain.variables().is_empty());
        assert_eq!(toolchain.toolchain_dependencies().len(), 2);
    }

    #[test]
    fn missing_toolchain_module_aborts_before_loading() {
        let registry = registry();
        let mut toolchain = Toolchain::new("iimpi", "7.2.5").expect("identity");
        let err = toolchain
            .prepare(
                &registry,
                &mut MemoryEnvironment::new(),
                &PrepareOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, ToolchainError::ToolchainNotFound { .. }));
        assert!(registry.loaded().is_empty());
    }

    #[test]
    fn show_variables_formats_sorted_lines() {
        let mut toolchain = Toolchain::new("GCC", "4.9.2").expect("identity");
        toolchain.variables_mut().set("F90", "gfortran");
        toolchain.variables_mut().set("CC", "gcc");
        assert_eq!(
            toolchain.show_variables("  ", "\n"),
            "  CC=gcc\n  F90=gfortran"
        );
        let vars = toolchain.generate_vars();
        assert_eq!(vars.get("CC").map(String::as_str), Some("gcc"));
    }

    #[test]
    fn software_lookups_are_fatal_when_absent() {
        let registry = registry();
        let toolchain = Toolchain::new("gompi", "1.4.10").expect("identity");
        assert!(matches!(
            toolchain.software_root(&registry, "GCC"),
            Err(ToolchainError::SoftwareRootNotFound { .. })
        ));
        assert!(matches!(
            toolchain.software_version(&registry, "GCC"),
            Err(ToolchainError::SoftwareVersionNotFound { .. })
        ));

        registry
            .load(&[ModuleRef::new("gompi", "1.4.10")])
            .expect("loads");
        assert_eq!(
            toolchain.software_root(&registry, "GCC").expect("loaded"),
            PathBuf::from("/apps/GCC/4.9.2")
        );
        assert_eq!(
            toolchain.software_version(&registry, "GCC").expect("loaded"),
            "4.9.2"
        );
    }

    #[test]
    fn flavor_base_flags_keep_dependency_prefix() {
        let registry = registry();
        let mut toolchain = Toolchain::builder()
            .flavor(Release)
            .version("1.4.10")
            .build()
            .expect("identity");
        toolchain
            .add_dependencies(&registry, vec![DependencyDecl::new("zlib")])
            .expect("zlib installed");
        let mut env = MemoryEnvironment::new();
        toolchain
            .prepare(&registry, &mut env, &PrepareOptions::default())
            .expect("prepares");
        assert_eq!(
            env.get("CPPFLAGS").as_deref(),
            Some("-DNDEBUG -I/apps/zlib/1.2.8/include")
        );
    }

    #[test]
    fn dependencies_are_frozen_after_prepare() {
        let registry = registry();
        let mut toolchain = Toolchain::new("gompi", "1.4.10").expect("identity");
        toolchain
            .prepare(
                &registry,
                &mut MemoryEnvironment::new(),
                &PrepareOptions::default(),
            )
            .expect("prepares");
        assert!(toolchain.is_prepared());

        let err = toolchain
            .add_dependencies(&registry, vec![DependencyDecl::new("zlib")])
            .unwrap_err();
        assert!(matches!(err, ToolchainError::AlreadyPrepared { .. }));
        assert!(toolchain.dependencies().is_empty());
    }

    #[test]
    fn second_prepare_is_rejected_without_registry_calls() {
        let registry = registry();
        let mut toolchain = Toolchain::new("gompi", "1.4.10").expect("identity");
        let mut env = MemoryEnvironment::new();
        toolchain
            .prepare(&registry, &mut env, &PrepareOptions::default())
            .expect("prepares");
        let calls = registry.calls().len();
        let writes = env.writes().len();

        let err = toolchain
            .prepare(&registry, &mut env, &PrepareOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "toolchain gompi/1.4.10 has already been prepared");
        assert_eq!(registry.calls().len(), calls);
        assert_eq!(env.writes().len(), writes);
        assert_eq!(toolchain.toolchain_dependencies().len(), 2);
    }

    #[test]
    fn failed_prepare_can_be_retried() {
        let registry = registry();
        let mut toolchain = Toolchain::new("iimpi", "7.2.5").expect("identity");
        let mut env = MemoryEnvironment::new();
        for _ in 0..2 {
            let err = toolchain
                .prepare(&registry, &mut env, &PrepareOptions::default())
                .unwrap_err();
            assert!(matches!(err, ToolchainError::ToolchainNotFound { .. }));
        }
        assert!(!toolchain.is_prepared());
    }

    #[test]
    fn dummy_with_real_version_and_no_dependencies_skips_loading() {
        let registry = registry();
        let mut toolchain = Toolchain::new(DUMMY_NAME, "2021a").expect("identity");
        let mut env = MemoryEnvironment::new();
        toolchain
            .prepare(&registry, &mut env, &PrepareOptions::default())
            .expect("prepares");

        assert!(
            !registry
                .calls()
                .iter()
                .any(|c| matches!(c, RegistryCall::Load(_) | RegistryCall::DependenciesFor { .. }))
        );
        assert!(registry.loaded().is_empty());
        assert!(toolchain.toolchain_dependencies().is_empty());
        assert!(env.writes().is_empty());
    }
}
