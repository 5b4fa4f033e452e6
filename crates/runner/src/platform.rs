// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform launch conventions.

/// Platform flavor the build tool is launched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

/// How to launch the build tool on a given platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchStrategy {
    /// Arguments placed before the executable (e.g. `cmd.exe /c`).
    pub shell_wrapper: &'static [&'static str],
    /// Suffix appended to derived executable names.
    pub exe_suffix: &'static str,
    /// Separator between classpath entries.
    pub path_separator: char,
    /// Separator between path components.
    pub file_separator: char,
}

const UNIX: LaunchStrategy = LaunchStrategy {
    shell_wrapper: &[],
    exe_suffix: "",
    path_separator: ':',
    file_separator: '/',
};

const WINDOWS: LaunchStrategy = LaunchStrategy {
    shell_wrapper: &["cmd.exe", "/c"],
    exe_suffix: ".bat",
    path_separator: ';',
    file_separator: '\\',
};

impl Platform {
    /// Platform of the running binary.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// Classify an OS identification string such as `"Windows 10"` or `"Linux"`.
    pub fn from_os_name(name: &str) -> Self {
        if name.starts_with("Windows") {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub fn strategy(self) -> &'static LaunchStrategy {
        match self {
            Platform::Unix => &UNIX,
            Platform::Windows => &WINDOWS,
        }
    }

    /// Split a classpath string into its non-empty entries.
    pub fn split_classpath(self, classpath: &str) -> Vec<String> {
        classpath
            .split(self.strategy().path_separator)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
#[path = "platform_tests.rs"]
mod tests;
