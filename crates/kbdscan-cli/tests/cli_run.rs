// Test module - relaxed lint rules
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(missing_docs)]

//! End-to-end tests for the `kbdscan` binary.
//!
//! None of these run on a real virtual console, so every run ends in a
//! startup failure; the point is the exit status, the diagnostics, and
//! that the terminal is left as it was found.

use std::process::{Command, Stdio};

use kbdscan::error::{ErrorCode, USAGE_EXIT_CODE};
use kbdscan_fixtures::open_pty;
use nix::sys::termios::tcgetattr;

fn kbdscan_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_kbdscan"))
}

#[test]
fn help_lists_exit_codes() {
    let output = kbdscan_bin()
        .arg("--help")
        .output()
        .expect("failed to execute");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Exit codes"));
    assert!(stdout.contains("E_UNSUPPORTED_DEVICE"));
    assert!(stdout.contains("virtual console"));
}

#[test]
fn version_flag_succeeds() {
    let output = kbdscan_bin()
        .arg("--version")
        .output()
        .expect("failed to execute");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("kbdscan"));
}

#[test]
fn unknown_arguments_are_rejected() {
    let output = kbdscan_bin()
        .arg("--timeout")
        .arg("10")
        .stdin(Stdio::null())
        .output()
        .expect("failed to execute");

    assert_eq!(output.status.code(), Some(USAGE_EXIT_CODE));
    assert!(output.stdout.is_empty());
    assert!(ErrorCode::ALL
        .iter()
        .all(|code| code.exit_code() != USAGE_EXIT_CODE));
}

#[test]
fn non_terminal_stdin_fails_before_changing_anything() {
    let output = kbdscan_bin()
        .stdin(Stdio::null())
        .output()
        .expect("failed to execute");

    assert_eq!(
        output.status.code(),
        Some(ErrorCode::DeviceQuery.exit_code())
    );
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tcgetattr"), "stderr: {stderr}");
}

#[test]
fn pty_stdin_is_unsupported_and_restored() {
    let Some(pty) = open_pty() else {
        return;
    };
    let before = tcgetattr(&pty.slave).unwrap();
    let child_stdin = pty.slave.try_clone().unwrap();

    let output = kbdscan_bin()
        .stdin(Stdio::from(child_stdin))
        .output()
        .expect("failed to execute");

    assert_eq!(
        output.status.code(),
        Some(ErrorCode::UnsupportedDevice.exit_code())
    );
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("KDSKBMODE"), "stderr: {stderr}");

    let after = tcgetattr(&pty.slave).unwrap();
    assert_eq!(after.local_flags, before.local_flags);
    assert_eq!(after.input_flags, before.input_flags);
    assert_eq!(after.control_chars, before.control_chars);
}
