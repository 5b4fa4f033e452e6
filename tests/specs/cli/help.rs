// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn antrun_help_shows_usage() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--file")
        .stdout_has("--lib")
        .stdout_has("--with-classpath")
        .stdout_has("--expect-exit");
}

#[test]
fn antrun_version_shows_package_version() {
    cli()
        .args(&["--version"])
        .passes()
        .stdout_has(concat!("antrun ", env!("CARGO_PKG_VERSION")));
}

#[test]
fn antrun_unknown_flag_is_a_usage_error() {
    cli().args(&["--bogus"]).exits(2).stderr_has("--bogus");
}

#[test]
fn antrun_rejects_unknown_output_format() {
    cli().args(&["-o", "yaml"]).exits(2).stderr_has("yaml");
}
