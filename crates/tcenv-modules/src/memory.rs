//! Catalog-backed in-memory module registry.
//!
//! Modules and their dependencies are held in a `petgraph` directed graph
//! with edges pointing from a module to the modules it depends on. Loading a
//! module also loads everything reachable from it, the way a module tool
//! pulls in a toolchain's compiler and libraries.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;
use serde::{Deserialize, Serialize};
use tcenv_common::error::{Result, ToolchainError};
use tcenv_common::types::ModuleRef;

use crate::registry::ModuleRegistry;

/// An installed module as described in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Module name.
    pub name: String,
    /// Full version tag.
    pub version: String,
    /// Install root exposed once the module is loaded.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Direct dependencies, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<ModuleRef>,
}

impl ModuleRecord {
    /// Creates a record without install root or dependencies.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            root: None,
            dependencies: Vec::new(),
        }
    }

    /// Sets the install root.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Adds a direct dependency.
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies.push(ModuleRef::new(name, version));
        self
    }

    fn module_ref(&self) -> ModuleRef {
        ModuleRef::new(self.name.clone(), self.version.clone())
    }
}

/// A registry query recorded by [`MemoryRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    /// [`ModuleRegistry::exists`].
    Exists(ModuleRef),
    /// [`ModuleRegistry::available`].
    Available {
        /// Queried module name.
        name: String,
        /// Queried version suffix.
        suffix: String,
    },
    /// [`ModuleRegistry::load`].
    Load(Vec<ModuleRef>),
    /// [`ModuleRegistry::dependencies_for`].
    DependenciesFor {
        /// Queried module.
        module: ModuleRef,
        /// Requested depth.
        depth: usize,
    },
    /// [`ModuleRegistry::software_root`].
    SoftwareRoot(String),
    /// [`ModuleRegistry::software_version`].
    SoftwareVersion(String),
}

/// In-memory module registry built from a catalog of [`ModuleRecord`]s.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    graph: petgraph::Graph<ModuleRecord, ()>,
    index: HashMap<ModuleRef, NodeIndex>,
    loaded: Mutex<Vec<NodeIndex>>,
    calls: Mutex<Vec<RegistryCall>>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from catalog records.
    ///
    /// # Errors
    ///
    /// Returns an error if a record depends on a module that is not part of
    /// the catalog.
    pub fn from_records(records: Vec<ModuleRecord>) -> Result<Self> {
        let mut registry = Self::new();
        for record in records {
            let key = record.module_ref();
            let idx = registry.graph.add_node(record);
            let _ = registry.index.insert(key, idx);
        }

        let edges: Vec<(NodeIndex, ModuleRef)> = registry
            .graph
            .node_indices()
            .flat_map(|idx| {
                registry.graph[idx]
                    .dependencies
                    .iter()
                    .map(move |dep| (idx, dep.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();
        for (from, dep) in edges {
            let Some(&to) = registry.index.get(&dep) else {
                return Err(ToolchainError::DependencyNotFound {
                    name: dep.name,
                    tag: dep.version,
                });
            };
            let _ = registry.graph.add_edge(from, to, ());
        }

        tracing::debug!(modules = registry.index.len(), "module catalog indexed");
        Ok(registry)
    }

    /// Loads a JSON catalog (an array of module records) from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// catalog references unknown dependencies.
    pub fn from_catalog_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading module catalog");
        let content = std::fs::read_to_string(path).map_err(|e| ToolchainError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let records: Vec<ModuleRecord> = serde_json::from_str(&content)?;
        Self::from_records(records)
    }

    /// Returns every call made against this registry, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the loaded modules in load order.
    #[must_use]
    pub fn loaded(&self) -> Vec<ModuleRef> {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|&idx| self.graph[idx].module_ref())
            .collect()
    }

    fn record(&self, call: RegistryCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    /// Direct dependencies of `idx` in declaration order.
    fn direct(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut deps: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        // petgraph yields the most recently added edge first
        deps.reverse();
        deps
    }

    /// The most recently loaded module called `name`.
    fn loaded_record(&self, name: &str) -> Option<ModuleRecord> {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .map(|&idx| &self.graph[idx])
            .find(|record| record.name == name)
            .cloned()
    }
}

impl ModuleRegistry for MemoryRegistry {
    fn exists(&self, name: &str, version: &str) -> Result<bool> {
        let module = ModuleRef::new(name, version);
        let found = self.index.contains_key(&module);
        self.record(RegistryCall::Exists(module));
        Ok(found)
    }

    fn available(&self, name: &str, suffix: &str) -> Result<Vec<ModuleRef>> {
        self.record(RegistryCall::Available {
            name: name.to_string(),
            suffix: suffix.to_string(),
        });
        let mut matches: Vec<ModuleRef> = self
            .index
            .keys()
            .filter(|m| m.name == name && m.version.ends_with(suffix))
            .cloned()
            .collect();
        matches.sort();
        Ok(matches)
    }

    fn load(&self, batch: &[ModuleRef]) -> Result<()> {
        self.record(RegistryCall::Load(batch.to_vec()));

        let roots = batch
            .iter()
            .map(|module| {
                self.index
                    .get(module)
                    .copied()
                    .ok_or_else(|| ToolchainError::ModuleLoad {
                        module: module.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        for root in roots {
            let mut dfs = Dfs::new(&self.graph, root);
            while let Some(idx) = dfs.next(&self.graph) {
                if !loaded.contains(&idx) {
                    tracing::debug!(module = %self.graph[idx].module_ref(), "module loaded");
                    loaded.push(idx);
                }
            }
        }
        Ok(())
    }

    fn dependencies_for(&self, name: &str, version: &str, depth: usize) -> Result<Vec<ModuleRef>> {
        let module = ModuleRef::new(name, version);
        self.record(RegistryCall::DependenciesFor {
            module: module.clone(),
            depth,
        });
        let Some(&start) = self.index.get(&module) else {
            return Err(ToolchainError::ModuleLoad {
                module: module.to_string(),
            });
        };

        let mut seen: HashSet<NodeIndex> = HashSet::from([start]);
        let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::from([(start, 0)]);
        let mut found = Vec::new();
        while let Some((idx, level)) = queue.pop_front() {
            if level > depth {
                continue;
            }
            for dep in self.direct(idx) {
                if seen.insert(dep) {
                    found.push(self.graph[dep].module_ref());
                    queue.push_back((dep, level + 1));
                }
            }
        }
        Ok(found)
    }

    fn software_root(&self, name: &str) -> Option<PathBuf> {
        self.record(RegistryCall::SoftwareRoot(name.to_string()));
        self.loaded_record(name).and_then(|record| record.root)
    }

    fn software_version(&self, name: &str) -> Option<String> {
        self.record(RegistryCall::SoftwareVersion(name.to_string()));
        self.loaded_record(name).map(|record| record.version)
    }
}
