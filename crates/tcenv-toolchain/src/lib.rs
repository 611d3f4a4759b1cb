//! # tcenv-toolchain
//!
//! Resolves a named, versioned toolchain into a validated set of module
//! dependencies and composes the compiler environment build steps consume.
//!
//! Handles:
//! - **Identity**: toolchain name/version, dummy toolchain detection, existence checks.
//! - **Resolver**: version tags for dependency declarations.
//! - **Registrar**: validation of declarations against the module registry.
//! - **Composer**: `CPPFLAGS`/`LDFLAGS` from dependency install roots.
//! - **Applier**: export of composed variables into an [`Environment`](environment::Environment).
//! - **Toolchain**: the preparation pipeline tying the steps together.
//!
//! # Example
//!
//! ```rust,no_run
//! use tcenv_modules::MemoryRegistry;
//! use tcenv_toolchain::dependency::DependencyDecl;
//! use tcenv_toolchain::environment::ProcessEnvironment;
//! use tcenv_toolchain::toolchain::{PrepareOptions, Toolchain};
//!
//! # fn main() -> tcenv_common::error::Result<()> {
//! let registry = MemoryRegistry::from_catalog_file("modules.json".as_ref())?;
//! let mut toolchain = Toolchain::new("GCC", "4.9.2")?;
//! toolchain.add_dependencies(&registry, vec![DependencyDecl::new("zlib").with_version("1.2.8")])?;
//! toolchain.prepare(&registry, &mut ProcessEnvironment, &PrepareOptions::default())?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod applier;
pub mod composer;
pub mod dependency;
pub mod environment;
pub mod flavor;
pub mod identity;
pub mod options;
pub mod registrar;
pub mod resolver;
pub mod toolchain;
pub mod variables;

pub use tcenv_common::error::{Result, ToolchainError};
pub use toolchain::{PrepareOptions, Toolchain, ToolchainBuilder};
