// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `antrun`: run an Ant build out of process and capture both output streams.
//!
//! Exit codes: the build's own exit code, or with `--expect-exit` 0 on match
//! and 1 on mismatch. Errors that kept the build from running exit 2.

mod args;
mod color;
mod exit_error;
mod output;

use std::borrow::Cow;
use std::io;

use antrun_runner::{transcript, EnvSnapshot, Runner};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::exit_error::{ExitError, HARNESS_FAILURE};

#[tokio::main]
async fn main() {
    init_logging();
    let args = Args::parse();

    if let Err(err) = run(args).await {
        let code = match err.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("antrun: {}", exit.message);
                }
                exit.code
            }
            None => {
                eprintln!("antrun: {err:#}");
                HARNESS_FAILURE
            }
        };
        std::process::exit(code);
    }
}

/// Log to stderr, filtered by `ANTRUN_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("ANTRUN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(args: Args) -> anyhow::Result<()> {
    let env = EnvSnapshot::from_process();
    let invocation = args.invocation(&env)?;
    let mut runner = Runner::with_env(env);
    if let Some(deadline) = args.deadline() {
        runner = runner.timeout(deadline);
    }
    tracing::info!(command = %invocation.command_line(runner.env()), "running build");

    let result = runner.run(&invocation).await?;

    let stdout = if args.strip_time {
        transcript::strip_total_time(result.stdout())
    } else {
        Cow::Borrowed(result.stdout())
    };
    output::write_result(
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
        &result,
        &stdout,
        args.output,
    )?;
    if args.summary {
        eprintln!("{}", output::summary_line(&result));
    }

    match args.expect_exit {
        Some(expected) => match result.expect_exit_code(expected) {
            Ok(_) => Ok(()),
            Err(e) => Err(ExitError::new(1, e.to_string()).into()),
        },
        None if result.success() => Ok(()),
        // Signal terminations report -1; keep the process exit code non-zero.
        None => Err(ExitError::silent(result.exit_code().max(1)).into()),
    }
}
