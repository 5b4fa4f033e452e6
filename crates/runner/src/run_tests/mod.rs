// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the runner, driven by fake `ant` scripts.
//!
//! Tests that write and then execute a script are `#[serial]`: a concurrent
//! fork can inherit the script's write descriptor and fail the exec with
//! ETXTBSY.

#![cfg(unix)]

use super::*;
use crate::env::ANT_HOME;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

mod basic;
mod errors;
mod streams;
mod timeout;

/// Mimics Ant's console output for the cases the tests care about.
///
/// - missing build file: `BUILD FAILED` banner on stderr, exit 1
/// - target `fail`: located failure message on stderr, exit 1
/// - otherwise: `Buildfile:` header, the target header, `OK.`, success banner
pub(crate) const ANT_SCRIPT: &str = r#"
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
printf '     [echo] OK.\n\nBUILD SUCCESSFUL\nTotal time: %s seconds\n' "$$"
"#;

/// Temporary `ANT_HOME` whose `bin/ant` runs a shell script.
pub(crate) struct FakeAnt {
    dir: tempfile::TempDir,
}

impl FakeAnt {
    /// The standard Ant-like script.
    pub(crate) fn standard() -> Self {
        Self::with_script(ANT_SCRIPT)
    }

    pub(crate) fn with_script(body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let script = bin.join("ant");
        std::fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).unwrap();
        Self { dir }
    }

    pub(crate) fn home(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn env(&self) -> EnvSnapshot {
        EnvSnapshot::from_pairs([(ANT_HOME, self.home().to_string_lossy().into_owned())])
    }

    pub(crate) fn runner(&self) -> Runner {
        Runner::with_env(self.env()).timeout(Duration::from_secs(30))
    }

    /// Write a build file next to the fake installation.
    pub(crate) fn build_file(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, "<project default=\"default\"/>\n").unwrap();
        path
    }

    /// Path of a build file that does not exist.
    pub(crate) fn missing_build_file(&self) -> PathBuf {
        self.dir.path().join("nonexistent.xml")
    }
}
