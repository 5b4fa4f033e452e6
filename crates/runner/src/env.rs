// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! Lookups go through an [`EnvSnapshot`] rather than `std::env` directly so an
//! invocation can be resolved against a fixed environment in tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::Platform;

/// Build tool installation directory.
pub const ANT_HOME: &str = "ANT_HOME";

/// Classpath source used for `-lib` augmentation, preferred over [`CLASSPATH`].
pub const CLASSPATH_OVERRIDE: &str = "ANTRUN_CLASSPATH";

/// Fallback classpath source.
pub const CLASSPATH: &str = "CLASSPATH";

/// Invocation deadline in milliseconds.
pub const TIMEOUT_MS: &str = "ANTRUN_TIMEOUT_MS";

/// Platform identification override, e.g. `Windows 10`.
pub const OS_NAME: &str = "ANTRUN_OS_NAME";

/// Deadline applied when [`TIMEOUT_MS`] is unset or unparsable.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Immutable view of environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment. Non-UTF-8 entries are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { vars }
    }

    /// Look up a variable, treating empty values as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Installation directory from `ANT_HOME`.
    pub fn ant_home(&self) -> Option<PathBuf> {
        self.get(ANT_HOME).map(PathBuf::from)
    }

    /// Classpath source: `ANTRUN_CLASSPATH` > `CLASSPATH`.
    pub fn classpath(&self) -> Option<&str> {
        self.get(CLASSPATH_OVERRIDE).or_else(|| self.get(CLASSPATH))
    }

    /// Invocation deadline (default 300s, configurable via `ANTRUN_TIMEOUT_MS`).
    ///
    /// Zero is rejected like an unparsable value.
    pub fn timeout(&self) -> Duration {
        self.get(TIMEOUT_MS)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Platform from `ANTRUN_OS_NAME`, else the compile target.
    pub fn platform(&self) -> Platform {
        self.get(OS_NAME)
            .map(Platform::from_os_name)
            .unwrap_or_else(Platform::current)
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
