// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `antrun [TARGET]` specs
//!
//! Every spec here spawns a fake `ant` script, so they are serialized.

use crate::prelude::*;

// ---------------------------------------------------------------------------
// Successful builds
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn default_target_replays_stdout_and_exits_zero() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");

    let run = cli().ant(&ant).arg("-f").arg(&file).passes().stderr_is_empty();

    let expected = format!(
        "Buildfile: {}\n\ndefault:\n     [echo] OK.\n\nBUILD SUCCESSFUL\nTotal time: 3 seconds\n",
        file.display()
    );
    similar_asserts::assert_eq!(run.stdout(), expected);
}

#[test]
#[serial]
fn named_target_is_passed_through() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");

    cli()
        .ant(&ant)
        .arg("-f")
        .arg(&file)
        .arg("gantTest")
        .passes()
        .stdout_has("\ngantTest:\n")
        .stdout_lacks("default:");
}

#[test]
#[serial]
fn build_file_defaults_to_build_xml_in_cwd() {
    let ant = FakeAnt::standard();
    ant.build_file("build.xml");

    cli()
        .ant(&ant)
        .current_dir(ant.home())
        .passes()
        .stdout_has("Buildfile: build.xml\n");
}

#[test]
#[serial]
fn strip_time_removes_total_time() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");

    cli()
        .ant(&ant)
        .arg("-f")
        .arg(&file)
        .arg("--strip-time")
        .passes()
        .stdout_has("BUILD SUCCESSFUL\n")
        .stdout_lacks("Total time");
}

#[test]
#[serial]
fn summary_reports_outcome_on_stderr() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");

    cli()
        .ant(&ant)
        .arg("-f")
        .arg(&file)
        .arg("--summary")
        .passes()
        .stderr_has("antrun: successful (exit 0) in ")
        .stderr_has("[default]");
}

// ---------------------------------------------------------------------------
// Library path
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn lib_entries_are_forwarded_in_order() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");

    cli()
        .ant(&ant)
        .arg("-f")
        .arg(&file)
        .args(&["--lib", "first.jar", "--lib", "second.jar"])
        .passes()
        .stdout_has("     [echo] lib=first.jar\n     [echo] lib=second.jar\n");
}

#[test]
#[serial]
fn with_classpath_splits_override_variable() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");

    cli()
        .ant(&ant)
        .env("ANTRUN_CLASSPATH", "/opt/a.jar:/opt/b.jar")
        .env("CLASSPATH", "/ignored.jar")
        .arg("-f")
        .arg(&file)
        .arg("--with-classpath")
        .passes()
        .stdout_has("lib=/opt/a.jar\n")
        .stdout_has("lib=/opt/b.jar\n")
        .stdout_lacks("ignored");
}

#[test]
#[serial]
fn with_classpath_falls_back_to_classpath() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");

    cli()
        .ant(&ant)
        .env("CLASSPATH", "/opt/c.jar")
        .arg("-f")
        .arg(&file)
        .arg("--with-classpath")
        .passes()
        .stdout_has("lib=/opt/c.jar\n");
}

#[test]
fn with_classpath_without_source_is_a_harness_error() {
    cli()
        .args(&["--with-classpath"])
        .exits(2)
        .stderr_has("ANTRUN_CLASSPATH")
        .stderr_has("CLASSPATH");
}

// ---------------------------------------------------------------------------
// Build failures
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn missing_build_file_passes_exit_code_through() {
    let ant = FakeAnt::standard();
    let missing = ant.missing_build_file();

    let run = cli().ant(&ant).arg("-f").arg(&missing).exits(1);

    assert_eq!(run.stdout(), "");
    assert!(run.stderr().starts_with("\nBUILD FAILED\n"));
    assert!(run.stderr().contains(": Gantfile does not exist.\n"));
}

#[test]
#[serial]
fn expect_exit_match_exits_zero() {
    let ant = FakeAnt::standard();
    let missing = ant.missing_build_file();

    cli()
        .ant(&ant)
        .arg("-f")
        .arg(&missing)
        .args(&["--expect-exit", "1"])
        .passes()
        .stderr_has("BUILD FAILED");
}

#[test]
#[serial]
fn expect_exit_mismatch_exits_one() {
    let ant = FakeAnt::standard();
    let missing = ant.missing_build_file();

    cli()
        .ant(&ant)
        .arg("-f")
        .arg(&missing)
        .args(&["--expect-exit", "0"])
        .exits(1)
        .stderr_has("antrun: expected exit code 0, got 1");
}

#[test]
#[serial]
fn json_output_describes_failed_target() {
    let ant = FakeAnt::standard();
    let file = ant.build_file("gantTest.xml");

    let run = cli()
        .ant(&ant)
        .arg("-f")
        .arg(&file)
        .args(&["fail", "-o", "json"])
        .exits(1);

    let value = run.json();
    let location = file.to_string_lossy();
    assert_eq!(value["exit_code"], 1);
    assert_eq!(value["outcome"], "failed");
    assert_eq!(value["buildfile"], location.as_ref());
    assert_eq!(value["targets"], serde_json::json!(["fail"]));
    assert_eq!(value["failure"]["location"], location.as_ref());
    assert_eq!(value["failure"]["line"], 7);
    assert_eq!(value["failure"]["message"], "test fail message");
    assert!(value["stderr"].as_str().unwrap().starts_with("\nBUILD FAILED\n"));
}

// ---------------------------------------------------------------------------
// Harness errors
// ---------------------------------------------------------------------------

#[test]
fn missing_executable_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let ant = dir.path().join("no-such-ant");

    cli()
        .arg("--ant")
        .arg(&ant)
        .exits(2)
        .stderr_has("antrun: failed to spawn");
}

#[test]
#[serial]
fn deadline_kills_hung_build() {
    let ant = FakeAnt::with_script("echo started\nexec sleep 30");
    let file = ant.build_file("gantTest.xml");

    let started = std::time::Instant::now();
    cli()
        .ant(&ant)
        .arg("-f")
        .arg(&file)
        .args(&["--timeout", "1"])
        .exits(2)
        .stderr_has("did not complete within 1000ms");
    assert!(started.elapsed() < std::time::Duration::from_secs(20));
}

#[test]
#[serial]
fn timeout_env_applies_without_flag() {
    let ant = FakeAnt::with_script("exec sleep 30");
    let file = ant.build_file("gantTest.xml");

    cli()
        .ant(&ant)
        .env("ANTRUN_TIMEOUT_MS", "500")
        .arg("-f")
        .arg(&file)
        .exits(2)
        .stderr_has("did not complete within 500ms");
}
