// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering an invocation result.

use std::io::Write;

use antrun_runner::transcript::{self, BuildFailure, Outcome};
use antrun_runner::InvocationResult;
use clap::ValueEnum;
use serde::Serialize;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// JSON view of one invocation.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub exit_code: i32,
    pub stdout: &'a str,
    pub stderr: &'a str,
    pub duration_ms: u64,
    pub outcome: Outcome,
    pub buildfile: Option<&'a str>,
    pub targets: Vec<&'a str>,
    pub failure: Option<BuildFailure>,
}

impl<'a> Report<'a> {
    /// `stdout` is passed separately so callers can hand in a normalized copy.
    pub fn new(result: &'a InvocationResult, stdout: &'a str) -> Self {
        Self {
            exit_code: result.exit_code(),
            stdout,
            stderr: result.stderr(),
            duration_ms: result.duration().as_millis() as u64,
            outcome: Outcome::from_streams(stdout, result.stderr()),
            buildfile: transcript::buildfile(stdout),
            targets: transcript::executed_targets(stdout),
            failure: BuildFailure::parse(result.stderr()),
        }
    }
}

/// Write the result in the requested format.
///
/// Text mode replays the captured streams verbatim on the matching
/// descriptors; JSON mode writes one object to `out`.
pub fn write_result(
    out: &mut impl Write,
    err: &mut impl Write,
    result: &InvocationResult,
    stdout: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            out.write_all(stdout.as_bytes())?;
            err.write_all(result.stderr().as_bytes())?;
        }
        OutputFormat::Json => {
            let report = Report::new(result, stdout);
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }
    out.flush()?;
    err.flush()?;
    Ok(())
}

/// One-line outcome summary, e.g. `antrun: successful (exit 0) in 1.20s [default]`.
pub fn summary_line(result: &InvocationResult) -> String {
    let outcome = match Outcome::of(result) {
        Outcome::Successful => "successful",
        Outcome::Failed => "failed",
        Outcome::Unknown => "unknown",
    };
    let targets = transcript::executed_targets(result.stdout()).join(", ");
    let elapsed = format!("{:.2}s", result.duration().as_secs_f64());
    format!(
        "antrun: {} (exit {}) in {} [{}]",
        crate::color::header(outcome),
        result.exit_code(),
        crate::color::muted(&elapsed),
        targets
    )
}
