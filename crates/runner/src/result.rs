// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Captured outcome of one invocation.

use std::time::Duration;

use crate::RunError;

/// Both captured streams and the exit code of a finished build.
///
/// Produced once per invocation, after the process has exited and both
/// streams have been fully drained.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    stdout: String,
    stderr: String,
    exit_code: i32,
    duration: Duration,
}

impl InvocationResult {
    /// Assemble a result from already-captured parts.
    pub fn new(stdout: String, stderr: String, exit_code: i32, duration: Duration) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
            duration,
        }
    }

    /// Captured standard output, one `\n` per line. Empty when nothing was written.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Captured standard error, one `\n` per line. Empty when nothing was written.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Process exit code, or `-1` when the process was terminated by a signal.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Wall-clock time from spawn to the last stream being drained.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn stdout_lines(&self) -> Vec<&str> {
        crate::transcript::split_lines(&self.stdout)
    }

    pub fn stderr_lines(&self) -> Vec<&str> {
        crate::transcript::split_lines(&self.stderr)
    }

    /// Assert the exit code, as a caller that knows the expected outcome would.
    ///
    /// On Windows the wrapper script exits 0 even for failed builds, so
    /// callers there should expect 0.
    pub fn expect_exit_code(self, expected: i32) -> Result<Self, RunError> {
        if self.exit_code == expected {
            Ok(self)
        } else {
            Err(RunError::UnexpectedExitCode {
                expected,
                actual: self.exit_code,
                stderr: self.stderr,
            })
        }
    }

    /// Consume into `(stdout, stderr, exit_code)`.
    pub fn into_parts(self) -> (String, String, i32) {
        (self.stdout, self.stderr, self.exit_code)
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
