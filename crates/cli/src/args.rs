// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use antrun_runner::{EnvSnapshot, Invocation, RunError};
use clap::Parser;

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "antrun",
    version,
    about = "Run an Ant build out of process and capture stdout and stderr",
    styles = crate::color::styles(),
)]
pub struct Args {
    /// Target to run (default target when omitted)
    pub target: Option<String>,

    /// Build file passed to the tool with -f
    #[arg(short = 'f', long = "file", value_name = "PATH", default_value = "build.xml")]
    pub file: PathBuf,

    /// Extra -lib entry (repeatable)
    #[arg(long = "lib", value_name = "ENTRY")]
    pub libs: Vec<String>,

    /// Add one -lib entry per element of ANTRUN_CLASSPATH (or CLASSPATH)
    #[arg(long)]
    pub with_classpath: bool,

    /// Executable to run instead of $ANT_HOME/bin/ant or ant
    #[arg(long, value_name = "PATH", env = "ANTRUN_ANT")]
    pub ant: Option<PathBuf>,

    /// Working directory for the build
    #[arg(short = 'C', long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Deadline in seconds (default: ANTRUN_TIMEOUT_MS or 300)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Exit 0 when the build exits with this code, 1 otherwise
    #[arg(long, value_name = "CODE", allow_negative_numbers = true)]
    pub expect_exit: Option<i32>,

    /// Remove the "Total time:" line from captured stdout
    #[arg(long)]
    pub strip_time: bool,

    /// Print a one-line outcome summary to stderr after the build output
    #[arg(long)]
    pub summary: bool,

    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl Args {
    /// Build the invocation described by these arguments.
    pub fn invocation(&self, env: &EnvSnapshot) -> Result<Invocation, RunError> {
        let mut invocation = Invocation::new(&self.file)
            .platform(env.platform())
            .libs(self.libs.iter().cloned());
        if let Some(ref target) = self.target {
            invocation = invocation.target(target.clone());
        }
        if let Some(ref ant) = self.ant {
            invocation = invocation.command(ant);
        }
        if let Some(ref cwd) = self.cwd {
            invocation = invocation.cwd(cwd);
        }
        if self.with_classpath {
            invocation = invocation.with_env_classpath(env)?;
        }
        Ok(invocation)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
