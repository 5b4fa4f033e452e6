// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation requests and command-line resolution.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::env::{CLASSPATH, CLASSPATH_OVERRIDE};
use crate::{EnvSnapshot, Platform, RunError};

/// Executable name used when no installation directory is configured.
pub const DEFAULT_COMMAND: &str = "ant";

/// Flag preceding the build file path.
pub const BUILD_FILE_FLAG: &str = "-f";

/// Flag preceding each extra library/classpath entry.
pub const LIB_FLAG: &str = "-lib";

/// One run of the build tool.
///
/// Built with chained setters and immutable once handed to a
/// [`Runner`](crate::Runner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    command: Option<PathBuf>,
    build_file: PathBuf,
    target: Option<String>,
    libs: Vec<String>,
    platform: Platform,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl Invocation {
    /// Run the default target of `build_file` on the current platform.
    pub fn new(build_file: impl Into<PathBuf>) -> Self {
        Self {
            command: None,
            build_file: build_file.into(),
            target: None,
            libs: Vec::new(),
            platform: Platform::current(),
            cwd: None,
            env: Vec::new(),
        }
    }

    /// Use an explicit executable instead of resolving one from the environment.
    pub fn command(mut self, command: impl Into<PathBuf>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Target to run. Blank names select the default target.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        let target = target.into();
        self.target = if target.trim().is_empty() {
            None
        } else {
            Some(target)
        };
        self
    }

    /// Add one `-lib` entry.
    pub fn lib(mut self, entry: impl Into<String>) -> Self {
        self.libs.push(entry.into());
        self
    }

    pub fn libs<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libs.extend(entries.into_iter().map(Into::into));
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Working directory for the child process.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Extra environment variable for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Append one `-lib` entry per element of the environment's classpath.
    ///
    /// Fails with [`RunError::MissingClasspath`] when neither
    /// `ANTRUN_CLASSPATH` nor `CLASSPATH` is set.
    pub fn with_env_classpath(self, env: &EnvSnapshot) -> Result<Self, RunError> {
        let classpath = env.classpath().ok_or(RunError::MissingClasspath {
            override_var: CLASSPATH_OVERRIDE,
            fallback_var: CLASSPATH,
        })?;
        let entries = self.platform.split_classpath(classpath);
        Ok(self.libs(entries))
    }

    pub fn build_file(&self) -> &Path {
        &self.build_file
    }

    pub fn target_name(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn lib_entries(&self) -> &[String] {
        &self.libs
    }

    pub fn target_platform(&self) -> Platform {
        self.platform
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn env_vars(&self) -> &[(String, String)] {
        &self.env
    }

    /// Resolve the executable: explicit command > `ANT_HOME/bin/ant` > `ant`.
    ///
    /// The platform suffix is only applied to the two derived forms.
    pub fn executable(&self, env: &EnvSnapshot) -> String {
        if let Some(ref command) = self.command {
            return command.to_string_lossy().into_owned();
        }
        let strategy = self.platform.strategy();
        let base = match env.ant_home() {
            Some(home) => {
                let sep = strategy.file_separator;
                let home = home.to_string_lossy();
                let home = home.trim_end_matches(sep);
                format!("{home}{sep}bin{sep}{DEFAULT_COMMAND}")
            }
            None => DEFAULT_COMMAND.to_string(),
        };
        format!("{base}{}", strategy.exe_suffix)
    }

    /// Full command line: `[wrapper...] <exe> -f <file> [-lib <entry>]* [target]`.
    pub fn command_line(&self, env: &EnvSnapshot) -> CommandLine {
        let strategy = self.platform.strategy();
        let executable = self.executable(env);

        // With a shell wrapper the executable becomes the wrapper's first argument.
        let (program, mut args) = match strategy.shell_wrapper.split_first() {
            Some((shell, rest)) => {
                let mut args: Vec<String> = rest.iter().map(|s| s.to_string()).collect();
                args.push(executable);
                (shell.to_string(), args)
            }
            None => (executable, Vec::new()),
        };

        args.push(BUILD_FILE_FLAG.to_string());
        args.push(self.build_file.to_string_lossy().into_owned());
        for entry in &self.libs {
            args.push(LIB_FLAG.to_string());
            args.push(entry.clone());
        }
        if let Some(ref target) = self.target {
            args.push(target.clone());
        }

        CommandLine { program, args }
    }
}

/// A resolved program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
