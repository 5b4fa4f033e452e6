// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Harness-level error types.

use std::time::Duration;

use crate::Stream;

/// Errors raised when the build tool could not be run to completion.
///
/// A build that runs and fails is not an error: its exit code and stderr are
/// reported in the [`InvocationResult`](crate::InvocationResult).
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Executable not found or could not be started.
    #[error("failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        source: std::io::Error,
    },

    /// Reading a captured stream failed.
    #[error("failed reading {stream} of `{command}`: {source}")]
    StreamRead {
        command: String,
        stream: Stream,
        source: std::io::Error,
    },

    /// Waiting for the child process failed.
    #[error("failed waiting for `{command}` to exit: {source}")]
    WaitFailed {
        command: String,
        source: std::io::Error,
    },

    /// A capture task panicked or was cancelled before draining its stream.
    #[error("{stream} capture task for `{command}` did not finish: {source}")]
    CaptureJoin {
        command: String,
        stream: Stream,
        source: tokio::task::JoinError,
    },

    /// The invocation did not complete before its deadline.
    #[error("`{command}` did not complete within {}ms", timeout.as_millis())]
    TimedOut { command: String, timeout: Duration },

    /// Classpath augmentation was requested but no classpath source is set.
    #[error("classpath augmentation requested but neither {override_var} nor {fallback_var} is set")]
    MissingClasspath {
        override_var: &'static str,
        fallback_var: &'static str,
    },

    /// The build exited with a code other than the one the caller asserted.
    #[error("expected exit code {expected}, got {actual}")]
    UnexpectedExitCode {
        expected: i32,
        actual: i32,
        stderr: String,
    },

    /// The private runtime for blocking callers could not be built.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl RunError {
    /// True when the error means the child never started or never finished,
    /// as opposed to a caller assertion about a finished build.
    pub fn is_harness_fatal(&self) -> bool {
        !matches!(self, RunError::UnexpectedExitCode { .. })
    }
}
