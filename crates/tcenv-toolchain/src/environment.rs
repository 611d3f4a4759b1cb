//! Access to the environment that build subprocesses inherit.

use std::collections::BTreeMap;

/// Set/get access to named string variables.
pub trait Environment {
    /// Sets `name` to `value`.
    fn set(&mut self, name: &str, value: &str);

    /// Returns the value of `name`, if set.
    fn get(&self, name: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    /// Whether the process environment can hold `name=value`.
    ///
    /// Names must be non-empty and free of `=` and NUL; values free of NUL.
    #[must_use]
    pub fn is_valid_binding(name: &str, value: &str) -> bool {
        !name.is_empty() && !name.contains(['=', '\0']) && !value.contains('\0')
    }
}

impl Environment for ProcessEnvironment {
    #[allow(unsafe_code)]
    fn set(&mut self, name: &str, value: &str) {
        if !Self::is_valid_binding(name, value) {
            tracing::warn!(
                variable = name,
                value = %value.escape_debug(),
                "skipping variable the process environment cannot hold"
            );
            return;
        }
        // SAFETY: toolchain preparation runs once per build process, before
        // any build subprocess or worker thread is started.
        unsafe { std::env::set_var(name, value) };
    }

    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// An in-memory environment that records every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironment {
    vars: BTreeMap<String, String>,
    writes: Vec<(String, String)>,
}

impl MemoryEnvironment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All variables currently set, sorted by name.
    #[must_use]
    pub const fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Every `set` call in call order.
    #[must_use]
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }
}

impl Environment for MemoryEnvironment {
    fn set(&mut self, name: &str, value: &str) {
        self.writes.push((name.to_string(), value.to_string()));
        let _ = self.vars.insert(name.to_string(), value.to_string());
    }

    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
