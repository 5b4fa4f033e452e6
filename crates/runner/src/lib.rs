// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Out-of-process build tool invocation with dual-stream capture.
//!
//! An [`Invocation`] describes one run of the build tool (build file, target,
//! extra `-lib` entries, platform). A [`Runner`] spawns it, drains stdout and
//! stderr on two independent tasks, waits for the process to exit, and hands
//! back an [`InvocationResult`] holding both captured texts and the exit code.
//!
//! Build-level failures (non-zero exit, `BUILD FAILED` on stderr) are normal
//! results. Only failures of the invocation machinery itself surface as
//! [`RunError`].

mod capture;
pub mod env;
mod error;
mod invocation;
mod platform;
mod result;
mod run;
pub mod transcript;

pub use capture::Stream;
pub use env::EnvSnapshot;
pub use error::RunError;
pub use invocation::{CommandLine, Invocation, BUILD_FILE_FLAG, DEFAULT_COMMAND, LIB_FLAG};
pub use platform::{LaunchStrategy, Platform};
pub use result::InvocationResult;
pub use run::Runner;
