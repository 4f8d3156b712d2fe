//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Tests and embedders use [`Env::mock()`] backed by a `HashMap`, eliminating
//! the need for `unsafe` calls to [`std::env::set_var`] /
//! [`std::env::remove_var`].

use std::collections::HashMap;

/// Environment variable reader.
///
/// Wraps lookups so that production code hits `std::env` while tests
/// can supply a controlled set of values.
#[derive(Clone, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Whether lookups go to the process environment.
    pub fn is_real(&self) -> bool {
        self.overrides.is_none()
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Result<String, std::env::VarError> {
        match &self.overrides {
            Some(map) => map.get(name).cloned().ok_or(std::env::VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// Look up a variable, treating an empty value as unset.
    pub fn non_empty(&self, name: &str) -> Option<String> {
        self.var(name).ok().filter(|v| !v.is_empty())
    }

    /// Return a snapshot with `entries` layered underneath this one.
    ///
    /// Keys already present win. A real environment is returned unchanged:
    /// the process table is populated by `dotenvy` directly.
    pub(crate) fn layered(
        &self,
        entries: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let Some(map) = &self.overrides else {
            return self.clone();
        };
        let mut merged = map.clone();
        for (key, value) in entries {
            merged.entry(key).or_insert(value);
        }
        Self {
            overrides: Some(merged),
        }
    }
}

impl std::fmt::Debug for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.overrides {
            None => f.write_str("Env(process)"),
            Some(map) => {
                let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
                keys.sort_unstable();
                f.debug_struct("Env").field("keys", &keys).finish()
            }
        }
    }
}
