//! # tcenv-modules
//!
//! Access to the module registry that tracks installed, loadable software.
//!
//! - [`ModuleRegistry`](registry::ModuleRegistry): the narrow interface the
//!   toolchain engine consumes (existence, listing, load, dependency
//!   queries, software roots).
//! - [`MemoryRegistry`](memory::MemoryRegistry): a catalog-backed
//!   implementation that records every call, used by tests and tooling.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod memory;
pub mod registry;

pub use memory::{MemoryRegistry, ModuleRecord, RegistryCall};
pub use registry::ModuleRegistry;
