// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! `cli()` starts from a scrubbed environment so the host's Ant setup never
//! leaks into a spec.

#![allow(dead_code)]

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub use serial_test::serial;

/// Variables the binary reads; removed before every run.
const SCRUBBED: &[&str] = &[
    "ANT_HOME",
    "ANTRUN_ANT",
    "ANTRUN_CLASSPATH",
    "CLASSPATH",
    "ANTRUN_TIMEOUT_MS",
    "ANTRUN_OS_NAME",
    "ANTRUN_LOG",
    "COLOR",
];

#[allow(deprecated)]
pub fn cli() -> CliBuilder {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("antrun"));
    for var in SCRUBBED {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args<S: AsRef<OsStr>>(mut self, args: &[S]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.cmd.arg(arg);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run against `ant` by pointing ANT_HOME at it.
    #[cfg(unix)]
    pub fn ant(self, ant: &FakeAnt) -> Self {
        self.env("ANT_HOME", ant.home())
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    pub fn run(mut self) -> RunAssert {
        let output = self.cmd.output().expect("antrun should spawn");
        RunAssert { output }
    }

    /// Run and assert exit code 0.
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Run and assert a specific exit code.
    pub fn exits(self, code: i32) -> RunAssert {
        let run = self.run();
        assert_eq!(
            run.output.status.code(),
            Some(code),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout missing {expected:?}:\n{stdout}");
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(unexpected), "stdout has {unexpected:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr missing {expected:?}:\n{stderr}");
        self
    }

    pub fn stderr_is_empty(self) -> Self {
        assert_eq!(self.stderr(), "", "expected empty stderr");
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).expect("stdout should be JSON")
    }
}

/// Ant-like console output for the cases the specs exercise.
///
/// - missing build file: `BUILD FAILED` banner on stderr, exit 1
/// - target `fail`: located failure message on stderr, exit 1
/// - otherwise: `Buildfile:` header, the target header, one line per
///   `-lib` entry, `OK.`, success banner
pub const ANT_SCRIPT: &str = r#"
file=""
target=""
libs=""
while [ $# -gt 0 ]; do
  case "$1" in
    -f) file="$2"; shift 2 ;;
    -lib) libs="$libs $2"; shift 2 ;;
    *) target="$1"; shift ;;
  esac
done
if [ ! -f "$file" ]; then
  printf '\nBUILD FAILED\n%s: Gantfile does not exist.\n\nTotal time: 0 seconds\n' "$file" >&2
  exit 1
fi
printf 'Buildfile: %s\n\n' "$file"
if [ "$target" = "fail" ]; then
  printf 'fail:\n'
  printf '\nBUILD FAILED\n%s:7: test fail message\n\n\nTotal time: 0 seconds\n' "$file" >&2
  exit 1
fi
printf '%s:\n' "${target:-default}"
for l in $libs; do
  printf '     [echo] lib=%s\n' "$l"
done
printf '     [echo] OK.\n\nBUILD SUCCESSFUL\nTotal time: 3 seconds\n'
"#;

/// Temporary ANT_HOME whose `bin/ant` is a shell script.
#[cfg(unix)]
pub struct FakeAnt {
    dir: tempfile::TempDir,
}

#[cfg(unix)]
impl FakeAnt {
    pub fn standard() -> Self {
        Self::with_script(ANT_SCRIPT)
    }

    pub fn with_script(body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let script = bin.join("ant");
        std::fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    pub fn home(&self) -> &Path {
        self.dir.path()
    }

    /// Write a minimal build file inside the fake installation directory.
    pub fn build_file(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, "<project default=\"default\"/>\n").unwrap();
        path
    }

    pub fn missing_build_file(&self) -> PathBuf {
        self.dir.path().join("nonexistent.xml")
    }
}
