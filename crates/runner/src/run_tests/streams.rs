// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for stream separation, ordering, and exit codes.

use serial_test::serial;

use super::FakeAnt;
use crate::{Invocation, Platform};

fn invocation() -> Invocation {
    Invocation::new("build.xml").platform(Platform::Unix)
}

// ---------------------------------------------------------------------------
// Empty and partial streams
// ---------------------------------------------------------------------------

#[tokio::test]
#[serial]
async fn silent_process_yields_empty_texts() {
    let ant = FakeAnt::with_script("exit 0");
    let result = ant.runner().run(&invocation()).await.unwrap();
    assert_eq!(result.stdout(), "");
    assert_eq!(result.stderr(), "");
    assert_eq!(result.exit_code(), 0);
}

#[tokio::test]
#[serial]
async fn stderr_only_output_stays_on_stderr() {
    let ant = FakeAnt::with_script("echo 'only error' >&2");
    let result = ant.runner().run(&invocation()).await.unwrap();
    assert_eq!(result.stdout(), "");
    assert_eq!(result.stderr(), "only error\n");
}

#[tokio::test]
#[serial]
async fn unterminated_last_line_gains_newline() {
    let ant = FakeAnt::with_script("printf 'partial'");
    let result = ant.runner().run(&invocation()).await.unwrap();
    assert_eq!(result.stdout(), "partial\n");
}

#[tokio::test]
#[serial]
async fn carriage_returns_split_progress_lines() {
    let ant = FakeAnt::with_script("printf '10%%\\r50%%\\r100%%\\n'\nprintf 'warn\\r\\n' >&2");
    let result = ant.runner().run(&invocation()).await.unwrap();
    assert_eq!(result.stdout_lines(), ["10%", "50%", "100%"]);
    assert_eq!(result.stderr(), "warn\n");
}

// ---------------------------------------------------------------------------
// Separation and ordering
// ---------------------------------------------------------------------------

#[tokio::test]
#[serial]
async fn alternating_writes_are_not_interleaved() {
    let ant = FakeAnt::with_script(
        "echo out1\necho err1 >&2\necho out2\necho err2 >&2\necho out3",
    );
    let result = ant.runner().run(&invocation()).await.unwrap();
    assert_eq!(result.stdout(), "out1\nout2\nout3\n");
    assert_eq!(result.stderr(), "err1\nerr2\n");
}

/// Both streams carry far more than a pipe buffer, so a runner that drained
/// them one after the other would deadlock.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn large_output_on_both_streams_is_fully_captured() {
    const LINES: usize = 20_000;
    let ant = FakeAnt::with_script(&format!(
        "i=0\nwhile [ $i -lt {LINES} ]; do\n  echo \"out $i\"\n  echo \"err $i\" >&2\n  i=$((i+1))\ndone"
    ));

    let result = ant.runner().run(&invocation()).await.unwrap();

    let expected_out: String = (0..LINES).map(|i| format!("out {i}\n")).collect();
    let expected_err: String = (0..LINES).map(|i| format!("err {i}\n")).collect();
    assert_eq!(result.exit_code(), 0);
    assert_eq!(result.stdout().len(), expected_out.len());
    assert!(result.stdout() == expected_out, "stdout lines lost or reordered");
    assert!(result.stderr() == expected_err, "stderr lines lost or reordered");
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

#[tokio::test]
#[serial]
async fn exit_codes_are_reported_verbatim() {
    for code in [0, 1, 2, 42, 255] {
        let ant = FakeAnt::with_script(&format!("echo code >&2\nexit {code}"));
        let result = ant.runner().run(&invocation()).await.unwrap();
        assert_eq!(result.exit_code(), code, "script exited {code}");
        assert_eq!(result.stderr(), "code\n");
    }
}

#[tokio::test]
#[serial]
async fn signal_termination_reports_minus_one() {
    let ant = FakeAnt::with_script("echo before\nkill -9 $$");
    let result = ant.runner().run(&invocation()).await.unwrap();
    assert_eq!(result.exit_code(), -1);
    assert_eq!(result.stdout(), "before\n");
}
