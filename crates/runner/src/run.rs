// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawning the build tool and collecting its output.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Child;
use tokio::task::JoinHandle;

use crate::capture::{self, Stream};
use crate::{EnvSnapshot, Invocation, InvocationResult, RunError};

type CaptureHandle = JoinHandle<std::io::Result<String>>;

/// Runs [`Invocation`]s against a fixed environment.
///
/// Each call is independent: one child process and two capture tasks, all
/// finished or aborted before the call returns.
#[derive(Debug, Clone)]
pub struct Runner {
    env: EnvSnapshot,
    timeout: Duration,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    /// Runner over the current process environment.
    pub fn new() -> Self {
        Self::with_env(EnvSnapshot::from_process())
    }

    pub fn with_env(env: EnvSnapshot) -> Self {
        let timeout = env.timeout();
        Self { env, timeout }
    }

    /// Deadline for process exit plus both stream drains.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn env(&self) -> &EnvSnapshot {
        &self.env
    }

    pub fn deadline(&self) -> Duration {
        self.timeout
    }

    /// Run the build tool and capture both streams.
    ///
    /// Returns once the process has exited and both streams are drained. A
    /// non-zero exit is a normal result. Dropping the returned future kills
    /// the child.
    pub async fn run(&self, invocation: &Invocation) -> Result<InvocationResult, RunError> {
        let start = Instant::now();
        let deadline = tokio::time::Instant::now() + self.timeout;
        let line = invocation.command_line(&self.env);
        let command = line.program.clone();

        let invoke_span = tracing::info_span!(
            "antrun.invoke",
            program = %line.program,
            args = ?line.args,
            exit_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        let mut process = tokio::process::Command::new(&line.program);
        process.args(&line.args);
        if let Some(dir) = invocation.working_dir() {
            process.current_dir(dir);
        }
        for (k, v) in invocation.env_vars() {
            process.env(k, v);
        }
        process.stdin(Stdio::null());
        process.stdout(Stdio::piped());
        process.stderr(Stdio::piped());
        process.kill_on_drop(true);

        let mut child = process.spawn().map_err(|source| RunError::SpawnFailed {
            command: command.clone(),
            source,
        })?;

        // Both pipes were requested above, so these are always present.
        let mut stdout_task =
            child.stdout.take().map(|r| capture::spawn_capture(Stream::Stdout, r));
        let mut stderr_task =
            child.stderr.take().map(|r| capture::spawn_capture(Stream::Stderr, r));

        let status = match tokio::time::timeout_at(deadline, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(source)) => {
                abort_captures([&stdout_task, &stderr_task]);
                return Err(RunError::WaitFailed { command, source });
            }
            Err(_) => {
                kill_and_reap(&mut child, &command).await;
                abort_captures([&stdout_task, &stderr_task]);
                return Err(self.timed_out(command));
            }
        };

        // The child has exited, but a descendant may still hold the pipes open.
        let drained = tokio::time::timeout_at(deadline, async {
            let stdout = join_capture(&command, Stream::Stdout, stdout_task.as_mut()).await;
            let stderr = join_capture(&command, Stream::Stderr, stderr_task.as_mut()).await;
            (stdout, stderr)
        })
        .await;
        let (stdout, stderr) = match drained {
            Ok((stdout, stderr)) => (stdout?, stderr?),
            Err(_) => {
                abort_captures([&stdout_task, &stderr_task]);
                return Err(self.timed_out(command));
            }
        };

        let duration = start.elapsed();
        let exit_code = status.code().unwrap_or(-1);
        invoke_span.record("exit_code", exit_code);
        invoke_span.record("duration_ms", duration.as_millis() as u64);
        if exit_code != 0 {
            tracing::debug!(parent: &invoke_span, exit_code, "build exited non-zero");
        }

        Ok(InvocationResult::new(stdout, stderr, exit_code, duration))
    }

    /// Blocking form of [`run`](Self::run) on a private two-worker runtime.
    ///
    /// Must not be called from inside a tokio runtime.
    pub fn run_blocking(&self, invocation: &Invocation) -> Result<InvocationResult, RunError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(RunError::Runtime)?;
        runtime.block_on(self.run(invocation))
    }

    fn timed_out(&self, command: String) -> RunError {
        let timeout_ms = self.timeout.as_millis() as u64;
        tracing::warn!(%command, timeout_ms, "invocation timed out");
        RunError::TimedOut {
            command,
            timeout: self.timeout,
        }
    }
}

/// Await one capture task, mapping task and read failures to harness errors.
async fn join_capture(
    command: &str,
    stream: Stream,
    task: Option<&mut CaptureHandle>,
) -> Result<String, RunError> {
    let Some(task) = task else {
        return Ok(String::new());
    };
    match task.await {
        Ok(Ok(captured)) => Ok(captured),
        Ok(Err(source)) => Err(RunError::StreamRead {
            command: command.to_string(),
            stream,
            source,
        }),
        Err(source) => Err(RunError::CaptureJoin {
            command: command.to_string(),
            stream,
            source,
        }),
    }
}

fn abort_captures(tasks: [&Option<CaptureHandle>; 2]) {
    for task in tasks.into_iter().flatten() {
        task.abort();
    }
}

async fn kill_and_reap(child: &mut Child, command: &str) {
    if let Err(e) = child.kill().await {
        tracing::warn!(%command, error = %e, "failed to kill timed-out child");
    }
}

#[cfg(test)]
#[path = "run_tests/mod.rs"]
mod tests;
