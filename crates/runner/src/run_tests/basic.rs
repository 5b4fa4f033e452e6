// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for targets, build failures, and invocation options.

use serial_test::serial;

use super::FakeAnt;
use crate::transcript::{self, BuildFailure, Outcome, BUILD_FAILED_BANNER};
use crate::{Invocation, Platform};

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

#[tokio::test]
#[serial]
async fn default_target_runs_without_target_name() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");

    let result = ant
        .runner()
        .run(&Invocation::new(&file).platform(Platform::Unix))
        .await
        .unwrap();

    assert_eq!(result.exit_code(), 0);
    assert_eq!(result.stderr(), "");
    assert!(result.stdout().contains("     [echo] OK.\n"));
    assert_eq!(transcript::executed_targets(result.stdout()), ["default"]);
    assert_eq!(Outcome::of(&result), Outcome::Successful);
}

#[tokio::test]
#[serial]
async fn named_target_runs_only_that_target() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("basedir.xml");

    let result = ant
        .runner()
        .run(&Invocation::new(&file).platform(Platform::Unix).target("gantTask"))
        .await
        .unwrap();

    assert!(result.success());
    assert_eq!(transcript::executed_targets(result.stdout()), ["gantTask"]);
    let announced = file.to_string_lossy().into_owned();
    assert_eq!(transcript::buildfile(result.stdout()), Some(announced.as_str()));
}

#[tokio::test]
#[serial]
async fn blank_target_runs_default() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");

    let result = ant
        .runner()
        .run(&Invocation::new(&file).platform(Platform::Unix).target("  "))
        .await
        .unwrap();

    assert_eq!(transcript::executed_targets(result.stdout()), ["default"]);
}

// ---------------------------------------------------------------------------
// Build-level failures
// ---------------------------------------------------------------------------

#[tokio::test]
#[serial]
async fn missing_build_file_is_a_normal_failed_result() {
    let ant = FakeAnt::standard();

    let result = ant
        .runner()
        .run(&Invocation::new(ant.missing_build_file()).platform(Platform::Unix))
        .await
        .unwrap();

    assert_eq!(result.exit_code(), 1);
    assert!(result.stderr().starts_with(BUILD_FAILED_BANNER));
    assert!(result.stderr().contains("Gantfile does not exist."));
    assert_eq!(result.stdout(), "");
    assert_eq!(Outcome::of(&result), Outcome::Failed);
}

#[tokio::test]
#[serial]
async fn failing_target_reports_location_and_message() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");

    let result = ant
        .runner()
        .run(&Invocation::new(&file).platform(Platform::Unix).target("fail"))
        .await
        .unwrap()
        .expect_exit_code(1)
        .unwrap();

    let failure = BuildFailure::parse(result.stderr()).unwrap();
    let location = file.to_string_lossy().into_owned();
    assert_eq!(failure.location, Some(location));
    assert_eq!(failure.line, Some(7));
    assert_eq!(failure.message, "test fail message");
    assert_eq!(transcript::executed_targets(result.stdout()), ["fail"]);
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[tokio::test]
#[serial]
async fn lib_entries_reach_the_tool_in_order() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");
    let env = crate::EnvSnapshot::from_pairs([
        (crate::env::ANT_HOME, ant.home().to_string_lossy().into_owned()),
        (crate::env::CLASSPATH, "/a.jar:/b.jar".to_string()),
    ]);

    let invocation = Invocation::new(&file)
        .platform(Platform::Unix)
        .lib("/first.jar")
        .with_env_classpath(&env)
        .unwrap();
    let result = crate::Runner::with_env(env).run(&invocation).await.unwrap();

    let libs: Vec<&str> = result
        .stdout_lines()
        .into_iter()
        .filter_map(|l| l.strip_prefix("     [echo] lib="))
        .collect();
    assert_eq!(libs, ["/first.jar", "/a.jar", "/b.jar"]);
}

#[tokio::test]
#[serial]
async fn cwd_and_env_are_applied() {
    let ant = FakeAnt::with_script("pwd\necho \"opts=$GANT_OPTS\"");
    let work = tempfile::tempdir().unwrap();
    let canonical = work.path().canonicalize().unwrap();

    let result = ant
        .runner()
        .run(
            &Invocation::new("build.xml")
                .platform(Platform::Unix)
                .cwd(work.path())
                .env("GANT_OPTS", "-Dflob=adob"),
        )
        .await
        .unwrap();

    assert_eq!(
        result.stdout_lines(),
        [canonical.to_str().unwrap(), "opts=-Dflob=adob"]
    );
}

#[tokio::test]
#[serial]
async fn explicit_command_bypasses_ant_home() {
    let ant = FakeAnt::with_script("echo from-ant-home");
    let other = FakeAnt::with_script("echo explicit \"$@\"");

    let result = ant
        .runner()
        .run(
            &Invocation::new("b.xml")
                .platform(Platform::Unix)
                .command(other.home().join("bin").join("ant"))
                .target("t"),
        )
        .await
        .unwrap();

    assert_eq!(result.stdout(), "explicit -f b.xml t\n");
}

// ---------------------------------------------------------------------------
// Repeatability
// ---------------------------------------------------------------------------

#[tokio::test]
#[serial]
async fn repeated_runs_agree_after_stripping_time() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");
    let invocation = Invocation::new(&file).platform(Platform::Unix);
    let runner = ant.runner();

    let first = runner.run(&invocation).await.unwrap();
    let second = runner.run(&invocation).await.unwrap();

    assert_eq!(first.exit_code(), second.exit_code());
    assert_eq!(
        transcript::strip_total_time(first.stdout()),
        transcript::strip_total_time(second.stdout())
    );
    assert_eq!(first.stderr(), second.stderr());
}

#[test]
#[serial]
fn run_blocking_from_synchronous_code() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");

    let result = ant
        .runner()
        .run_blocking(&Invocation::new(&file).platform(Platform::Unix))
        .unwrap();

    assert_eq!(result.exit_code(), 0);
    assert!(result.stdout().contains("BUILD SUCCESSFUL\n"));
}
