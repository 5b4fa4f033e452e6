// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for harness-fatal errors.

use serial_test::serial;

use super::FakeAnt;
use crate::env::ANT_HOME;
use crate::{EnvSnapshot, Invocation, Platform, RunError, Runner};

#[tokio::test]
#[serial]
async fn missing_installation_is_spawn_failure() {
    let env = EnvSnapshot::from_pairs([(ANT_HOME, "/nonexistent/ant_home_xyz_12345")]);
    let err = Runner::with_env(env)
        .run(&Invocation::new("build.xml").platform(Platform::Unix))
        .await
        .unwrap_err();

    assert!(err.is_harness_fatal());
    match err {
        RunError::SpawnFailed { command, source } => {
            assert_eq!(command, "/nonexistent/ant_home_xyz_12345/bin/ant");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected SpawnFailed, got: {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn missing_explicit_command_is_spawn_failure() {
    let err = Runner::with_env(EnvSnapshot::default())
        .run(
            &Invocation::new("build.xml")
                .platform(Platform::Unix)
                .command("nonexistent_command_xyz_12345"),
        )
        .await
        .unwrap_err();

    match err {
        RunError::SpawnFailed { command, source } => {
            assert_eq!(command, "nonexistent_command_xyz_12345");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected SpawnFailed, got: {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn non_executable_script_is_spawn_failure() {
    let ant = FakeAnt::with_script("echo never");
    let script = ant.home().join("bin").join("ant");
    std::fs::write(&script, "not a script").unwrap();
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o644);
        std::fs::set_permissions(&script, perms).unwrap();
    }

    let err = ant
        .runner()
        .run(&Invocation::new("build.xml").platform(Platform::Unix))
        .await
        .unwrap_err();

    match err {
        RunError::SpawnFailed { source, .. } => {
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected SpawnFailed, got: {other:?}"),
    }
}

#[test]
fn error_messages_name_the_command() {
    let err = RunError::SpawnFailed {
        command: "/opt/ant/bin/ant".to_string(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    };
    assert!(err.to_string().starts_with("failed to spawn `/opt/ant/bin/ant`"));

    let err = RunError::TimedOut {
        command: "ant".to_string(),
        timeout: std::time::Duration::from_millis(250),
    };
    assert_eq!(err.to_string(), "`ant` did not complete within 250ms");
}
