// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the invocation deadline.

use std::time::{Duration, Instant};

use serial_test::serial;

use super::FakeAnt;
use crate::env::{ANT_HOME, TIMEOUT_MS};
use crate::{EnvSnapshot, Invocation, Platform, RunError, Runner};

fn invocation() -> Invocation {
    Invocation::new("build.xml").platform(Platform::Unix)
}

#[tokio::test]
#[serial]
async fn hung_child_is_killed_at_deadline() {
    let ant = FakeAnt::with_script("echo started\nexec sleep 30");
    let start = Instant::now();

    let err = ant
        .runner()
        .timeout(Duration::from_millis(300))
        .run(&invocation())
        .await
        .unwrap_err();

    assert!(start.elapsed() < Duration::from_secs(10), "deadline not enforced");
    match err {
        RunError::TimedOut { timeout, .. } => assert_eq!(timeout, Duration::from_millis(300)),
        other => panic!("expected TimedOut, got: {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn descendant_holding_pipes_hits_deadline() {
    // The script exits at once, but the background sleep keeps both pipes open.
    let ant = FakeAnt::with_script("sleep 3 &\nexit 0");
    let start = Instant::now();

    let err = ant
        .runner()
        .timeout(Duration::from_millis(300))
        .run(&invocation())
        .await
        .unwrap_err();

    assert!(start.elapsed() < Duration::from_secs(3));
    assert!(matches!(err, RunError::TimedOut { .. }), "got: {err:?}");
    assert!(err.is_harness_fatal());
}

#[tokio::test]
#[serial]
async fn quick_child_finishes_within_deadline() {
    let ant = FakeAnt::with_script("echo done");
    let result = ant
        .runner()
        .timeout(Duration::from_secs(5))
        .run(&invocation())
        .await
        .unwrap();
    assert_eq!(result.stdout(), "done\n");
    assert!(result.duration() < Duration::from_secs(5));
}

#[test]
fn deadline_comes_from_environment() {
    let runner = Runner::with_env(EnvSnapshot::from_pairs([(TIMEOUT_MS, "150")]));
    assert_eq!(runner.deadline(), Duration::from_millis(150));

    let runner = runner.timeout(Duration::from_secs(2));
    assert_eq!(runner.deadline(), Duration::from_secs(2));
}

#[tokio::test]
#[serial]
async fn env_deadline_applies_to_run() {
    let ant = FakeAnt::with_script("exec sleep 30");
    let env = EnvSnapshot::from_pairs([
        (ANT_HOME, ant.home().to_string_lossy().into_owned()),
        (TIMEOUT_MS, "200".to_string()),
    ]);

    let err = Runner::with_env(env).run(&invocation()).await.unwrap_err();
    assert!(matches!(err, RunError::TimedOut { .. }), "got: {err:?}");
}
