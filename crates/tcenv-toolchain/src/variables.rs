//! Toolchain variable table.
//!
//! Maps variable names to composable values. Path-like variables such as
//! `CPPFLAGS` and `LDFLAGS` collect fragments that render with a flag prefix
//! (`-I/apps/zlib/include`). Appending a fragment that is already present is
//! a no-op, so composing the same dependency twice leaves the table
//! unchanged.

use std::collections::BTreeMap;
use std::path::Path;

use tcenv_common::constants::{CPPFLAGS, LDFLAGS};

/// A single toolchain variable.
///
/// Holds plain values, rendered as given, and path fragments, rendered with
/// the variable's flag prefix. Both keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variable {
    prefix: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    value: String,
    flagged: bool,
}

impl Variable {
    /// Creates an empty variable whose path fragments render with `prefix`.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            parts: Vec::new(),
        }
    }

    /// Path fragments in insertion order, without prefix.
    #[must_use]
    pub fn fragments(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter(|p| p.flagged)
            .map(|p| p.value.as_str())
            .collect()
    }

    /// Plain values in insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter(|p| !p.flagged)
            .map(|p| p.value.as_str())
            .collect()
    }

    /// Appends a plain value unless it is already present.
    ///
    /// Returns whether the value was added.
    pub fn append(&mut self, value: impl Into<String>) -> bool {
        self.push(value.into(), false)
    }

    /// Appends a path fragment unless it is already present.
    ///
    /// Returns whether the fragment was added.
    pub fn append_path(&mut self, fragment: impl Into<String>) -> bool {
        self.push(fragment.into(), true)
    }

    /// Renders the value as a space-separated string.
    #[must_use]
    pub fn render(&self) -> String {
        self.parts
            .iter()
            .map(|p| {
                if p.flagged {
                    format!("{}{}", self.prefix, p.value)
                } else {
                    p.value.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn push(&mut self, value: String, flagged: bool) -> bool {
        let part = Part { value, flagged };
        if self.parts.contains(&part) {
            return false;
        }
        self.parts.push(part);
        true
    }
}

/// Ordered table of toolchain variables.
#[derive(Debug, Clone)]
pub struct VariableTable {
    variables: BTreeMap<String, Variable>,
    prefixes: BTreeMap<String, String>,
}

impl VariableTable {
    /// Creates an empty table knowing the flag prefixes of `CPPFLAGS` and
    /// `LDFLAGS`.
    #[must_use]
    pub fn new() -> Self {
        let mut prefixes = BTreeMap::new();
        let _ = prefixes.insert(CPPFLAGS.to_string(), "-I".to_string());
        let _ = prefixes.insert(LDFLAGS.to_string(), "-L".to_string());
        Self {
            variables: BTreeMap::new(),
            prefixes,
        }
    }

    /// Registers the flag prefix used by path fragments of `name`.
    pub fn set_flag_prefix(&mut self, name: impl Into<String>, prefix: impl Into<String>) {
        let _ = self.prefixes.insert(name.into(), prefix.into());
    }

    /// Replaces `name` with a single plain value.
    ///
    /// The variable keeps the flag prefix registered for `name`, so path
    /// fragments appended later still render as flags.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let mut variable = self.empty_variable(&name);
        let _ = variable.append(value);
        let _ = self.variables.insert(name, variable);
    }

    /// Appends a plain fragment to `name`, creating the variable if needed.
    pub fn append(&mut self, name: &str, fragment: impl Into<String>) {
        let _ = self.entry(name).append(fragment);
    }

    /// Appends `root/subdir` for every subdirectory, in order.
    pub fn append_subdirs(&mut self, name: &str, root: &Path, subdirs: &[String]) {
        let variable = self.entry(name);
        for subdir in subdirs {
            let path = root.join(subdir);
            if !variable.append_path(path.to_string_lossy()) {
                tracing::trace!(
                    variable = name,
                    path = %path.display(),
                    "fragment already present"
                );
            }
        }
    }

    /// Returns the variable called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Renders the variable called `name`.
    #[must_use]
    pub fn render(&self, name: &str) -> Option<String> {
        self.variables.get(name).map(Variable::render)
    }

    /// All bindings rendered to strings, sorted by name.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        self.variables
            .iter()
            .map(|(name, variable)| (name.clone(), variable.render()))
            .collect()
    }

    /// Variable names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.variables.keys().map(String::as_str).collect()
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the table holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    fn empty_variable(&self, name: &str) -> Variable {
        Variable::with_prefix(self.prefixes.get(name).cloned().unwrap_or_default())
    }

    fn entry(&mut self, name: &str) -> &mut Variable {
        let variable = self.empty_variable(name);
        self.variables.entry(name.to_string()).or_insert(variable)
    }
}

impl Default for VariableTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subdirs(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn append_subdirs_renders_with_flag_prefix() {
        let mut table = VariableTable::new();
        table.append_subdirs(LDFLAGS, Path::new("/apps/zlib"), &subdirs(&["lib64", "lib"]));
        assert_eq!(
            table.render(LDFLAGS).as_deref(),
            Some("-L/apps/zlib/lib64 -L/apps/zlib/lib")
        );
    }

    #[test]
    fn append_subdirs_deduplicates_fragments() {
        let mut table = VariableTable::new();
        let dirs = subdirs(&["include"]);
        table.append_subdirs(CPPFLAGS, Path::new("/apps/zlib"), &dirs);
        table.append_subdirs(CPPFLAGS, Path::new("/apps/zlib"), &dirs);
        table.append_subdirs(CPPFLAGS, Path::new("/apps/bzip2"), &dirs);
        let fragments = table.get(CPPFLAGS).expect("present").fragments();
        assert_eq!(fragments, ["/apps/zlib/include", "/apps/bzip2/include"]);
    }

    #[test]
    fn unknown_variables_render_without_prefix() {
        let mut table = VariableTable::new();
        table.append("LIBS", "-lz");
        table.append("LIBS", "-lbz2");
        assert_eq!(table.render("LIBS").as_deref(), Some("-lz -lbz2"));
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut table = VariableTable::new();
        table.set("CC", "gcc");
        table.set("CC", "icc");
        assert_eq!(table.render("CC").as_deref(), Some("icc"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn plain_value_keeps_path_prefix_for_later_fragments() {
        let mut table = VariableTable::new();
        table.set(CPPFLAGS, "-DNDEBUG");
        table.append(CPPFLAGS, "-DNDEBUG");
        table.append_subdirs(CPPFLAGS, Path::new("/apps/zlib"), &subdirs(&["include"]));
        assert_eq!(
            table.render(CPPFLAGS).as_deref(),
            Some("-DNDEBUG -I/apps/zlib/include")
        );
        let variable = table.get(CPPFLAGS).expect("present");
        assert_eq!(variable.values(), ["-DNDEBUG"]);
        assert_eq!(variable.fragments(), ["/apps/zlib/include"]);
    }

    #[test]
    fn custom_flag_prefix() {
        let mut table = VariableTable::new();
        table.set_flag_prefix("RPATH", "-Wl,-rpath=");
        table.append_subdirs("RPATH", Path::new("/apps/zlib"), &subdirs(&["lib"]));
        assert_eq!(
            table.render("RPATH").as_deref(),
            Some("-Wl,-rpath=/apps/zlib/lib")
        );
    }

    #[test]
    fn entries_are_sorted_by_name() {
        let mut table = VariableTable::new();
        table.set("LDFLAGS", "-L/x");
        table.set("CC", "gcc");
        table.set("F90", "gfortran");
        let names: Vec<String> = table.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["CC", "F90", "LDFLAGS"]);
        assert!(!table.is_empty());
    }
}
