// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inspecting the build tool's console output.
//!
//! Helpers for comparing captured output against expected text: strip the
//! timing line, split lines, classify the outcome, and pull out the build
//! file, executed targets and failure message.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::InvocationResult;

/// Prefix of stderr for a failed build.
pub const BUILD_FAILED_BANNER: &str = "\nBUILD FAILED\n";

/// Line printed on stdout for a successful build.
pub const BUILD_SUCCESSFUL: &str = "BUILD SUCCESSFUL";

/// Prefix of the line announcing the build file.
pub const BUILDFILE_PREFIX: &str = "Buildfile: ";

/// Prefix Gant prints after finishing a target, e.g. `------ default`.
pub const END_OF_TARGET_MARKER: &str = "------ ";

/// Elapsed-time summary, up to the end of its line.
#[allow(clippy::expect_used)]
static TOTAL_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Total time: [0-9]*.*").expect("constant regex pattern is valid"));

/// `<location>:<line>: <message>` as printed after the failure banner.
#[allow(clippy::expect_used)]
static FAILURE_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<location>.+?):(?P<line>\d+): (?P<message>.*)$")
        .expect("constant regex pattern is valid")
});

/// Remove the first `Total time: ...` line content, the only
/// timing-dependent part of a build transcript.
pub fn strip_total_time(text: &str) -> Cow<'_, str> {
    TOTAL_TIME.replace(text, "")
}

/// Split on `\n`, keeping interior empty lines and dropping the empty
/// element after a final newline, so `"a\n"` yields `["a"]`.
///
/// Ant's `StringUtils.lineSplit` keeps that trailing element; callers
/// comparing against it must account for the difference.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_terminator('\n').collect()
}

/// Overall result as reported by the build tool itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Successful,
    Failed,
    /// Neither banner was printed (e.g. the tool crashed or was not Ant).
    Unknown,
}

impl Outcome {
    pub fn of(result: &InvocationResult) -> Self {
        Self::from_streams(result.stdout(), result.stderr())
    }

    pub fn from_streams(stdout: &str, stderr: &str) -> Self {
        if stderr.starts_with(BUILD_FAILED_BANNER) {
            Outcome::Failed
        } else if stdout.lines().any(|l| l == BUILD_SUCCESSFUL) {
            Outcome::Successful
        } else {
            Outcome::Unknown
        }
    }
}

/// Build file path from the `Buildfile: ` line, if present.
pub fn buildfile(stdout: &str) -> Option<&str> {
    stdout.lines().find_map(|l| l.strip_prefix(BUILDFILE_PREFIX))
}

/// Target headers in execution order, e.g. `-defineGantTask`, `default`.
///
/// A header is a column-0 line of the form `name:` with no whitespace.
/// Task output is indented (`     [echo] ...`) and never matches.
pub fn executed_targets(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .filter_map(|l| l.strip_suffix(':'))
        .filter(|name| !name.is_empty() && !name.contains(char::is_whitespace))
        .collect()
}

/// Names of targets Gant reported as finished via [`END_OF_TARGET_MARKER`].
pub fn finished_targets(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .filter_map(|l| task_message(l).strip_prefix(END_OF_TARGET_MARKER))
        .map(str::trim_end)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Strip the indented `[task] ` label Ant puts in front of task output.
fn task_message(line: &str) -> &str {
    let trimmed = line.trim_start();
    if trimmed.starts_with('[') {
        if let Some((_, message)) = trimmed.split_once("] ") {
            return message;
        }
    }
    trimmed
}

/// Failure details following [`BUILD_FAILED_BANNER`] on stderr.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildFailure {
    /// Build file that raised the failure, when reported.
    pub location: Option<String>,
    /// Line within `location`, when reported.
    pub line: Option<u32>,
    pub message: String,
}

impl BuildFailure {
    /// Parse stderr of a failed build. Returns `None` without the banner.
    pub fn parse(stderr: &str) -> Option<Self> {
        let rest = stderr.strip_prefix(BUILD_FAILED_BANNER)?;
        let first = rest.lines().next().unwrap_or_default();

        if let Some(caps) = FAILURE_LOCATION.captures(first) {
            return Some(Self {
                location: Some(caps["location"].to_string()),
                line: caps["line"].parse().ok(),
                message: caps["message"].to_string(),
            });
        }

        Some(Self {
            location: None,
            line: None,
            message: first.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "transcript_tests.rs"]
mod tests;
