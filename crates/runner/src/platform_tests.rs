// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    windows_10 = { "Windows 10", Platform::Windows },
    windows_server = { "Windows Server 2019", Platform::Windows },
    linux = { "Linux", Platform::Unix },
    mac = { "Mac OS X", Platform::Unix },
    empty = { "", Platform::Unix },
    lowercase_windows = { "windows", Platform::Unix },
)]
fn from_os_name(name: &str, expected: Platform) {
    assert_eq!(Platform::from_os_name(name), expected);
}

#[test]
fn windows_wraps_in_cmd_and_adds_bat_suffix() {
    let strategy = Platform::Windows.strategy();
    assert_eq!(strategy.shell_wrapper, &["cmd.exe", "/c"]);
    assert_eq!(strategy.exe_suffix, ".bat");
    assert_eq!(strategy.path_separator, ';');
}

#[test]
fn unix_has_no_wrapper_or_suffix() {
    let strategy = Platform::Unix.strategy();
    assert!(strategy.shell_wrapper.is_empty());
    assert_eq!(strategy.exe_suffix, "");
    assert_eq!(strategy.file_separator, '/');
}

#[test]
fn current_matches_compile_target() {
    let expected = if cfg!(windows) { Platform::Windows } else { Platform::Unix };
    assert_eq!(Platform::current(), expected);
}

#[yare::parameterized(
    unix_two = { Platform::Unix, "/a.jar:/b.jar", &["/a.jar", "/b.jar"] },
    unix_empty_entries = { Platform::Unix, ":/a.jar::/b.jar:", &["/a.jar", "/b.jar"] },
    unix_blank = { Platform::Unix, "", &[] },
    windows_two = { Platform::Windows, r"C:\a.jar;C:\b.jar", &[r"C:\a.jar", r"C:\b.jar"] },
    windows_keeps_colon = { Platform::Windows, r"C:\a.jar", &[r"C:\a.jar"] },
)]
fn split_classpath(platform: Platform, classpath: &str, expected: &[&str]) {
    assert_eq!(platform.split_classpath(classpath), expected);
}
