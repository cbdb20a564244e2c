// Test module - relaxed lint rules
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

//! Real termios tests
//!
//! Exercise `Console` on the slave side of a pseudo-terminal. A PTY
//! accepts termios calls but has no console keyboard, so the keyboard
//! ioctls fail the way they do in a terminal emulator. Tests return early
//! when no PTY can be opened.

use std::fs::File;
use std::io::Write;
use std::os::fd::OwnedFd;
use std::time::{Duration, Instant};

use kbdscan::device::{Console, ConsoleDevice};
use kbdscan::error::ScanError;
use kbdscan::mode::{derive_raw_config, ModeController};
use kbdscan::model::{Readiness, ScanConfig};
use kbdscan::session::run_session;
use kbdscan::signal::TerminationListener;
use kbdscan_fixtures::open_pty;
use nix::sys::termios::{tcgetattr, InputFlags, LocalFlags, Termios};

fn pty() -> Option<(File, OwnedFd)> {
    let pty = open_pty()?;
    Some((File::from(pty.master), pty.slave))
}

fn assert_same_settings(left: &Termios, right: &Termios) {
    assert_eq!(left.input_flags, right.input_flags);
    assert_eq!(left.output_flags, right.output_flags);
    assert_eq!(left.control_flags, right.control_flags);
    assert_eq!(left.local_flags, right.local_flags);
    assert_eq!(left.control_chars, right.control_chars);
}

#[test]
fn derived_termios_keeps_every_other_field() {
    let Some((_master, slave)) = pty() else {
        return;
    };
    let original = tcgetattr(&slave).unwrap();
    let raw = derive_raw_config(&original);

    assert!(!raw.input_flags.contains(InputFlags::BRKINT));
    assert!(!raw.local_flags.intersects(
        LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG
    ));
    assert_eq!(
        raw.input_flags,
        original.input_flags - InputFlags::BRKINT
    );
    assert_eq!(
        raw.local_flags,
        original.local_flags
            - (LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG)
    );
    assert_eq!(raw.output_flags, original.output_flags);
    assert_eq!(raw.control_flags, original.control_flags);
    assert_eq!(raw.control_chars, original.control_chars);
}

#[test]
fn raw_mode_is_applied_and_restored() {
    let Some((_master, slave)) = pty() else {
        return;
    };
    let mut controller = ModeController::new(Console::new(&slave));

    let original = controller.capture_original().unwrap();
    assert!(original.local_flags.contains(LocalFlags::ECHO));

    controller.enter_raw_mode(&original).unwrap();
    let applied = tcgetattr(&slave).unwrap();
    assert!(!applied.local_flags.contains(LocalFlags::ECHO));
    assert!(!applied.local_flags.contains(LocalFlags::ICANON));

    controller.restore_original(&original).unwrap();
    let once = tcgetattr(&slave).unwrap();
    controller.restore_original(&original).unwrap();
    let twice = tcgetattr(&slave).unwrap();

    assert_same_settings(&once, &original);
    assert_same_settings(&twice, &once);
}

#[test]
fn pty_rejects_scancode_mode() {
    let Some((_master, slave)) = pty() else {
        return;
    };
    let mut controller = ModeController::new(Console::new(&slave));

    let err = controller.enter_scancode_mode().unwrap_err();
    assert!(matches!(err, ScanError::UnsupportedDevice { .. }));
    assert!(!controller.scancode_active());
}

#[test]
fn wait_times_out_without_input() {
    let Some((_master, slave)) = pty() else {
        return;
    };
    let mut console = Console::new(&slave);

    let readiness = console.wait_for_input(Duration::from_millis(50)).unwrap();
    assert_eq!(readiness, Readiness::TimedOut);
}

#[test]
fn sub_millisecond_wait_still_blocks() {
    let Some((_master, slave)) = pty() else {
        return;
    };
    let mut console = Console::new(&slave);

    let started = Instant::now();
    let readiness = console.wait_for_input(Duration::from_micros(300)).unwrap();

    assert_eq!(readiness, Readiness::TimedOut);
    assert!(started.elapsed() >= Duration::from_micros(300));
}

#[test]
fn pending_input_is_reported_as_readable() {
    let Some((mut master, slave)) = pty() else {
        return;
    };
    let mut console = Console::new(&slave);

    master.write_all(b"x\n").unwrap();
    master.flush().unwrap();

    let readiness = console.wait_for_input(Duration::from_secs(2)).unwrap();
    assert_eq!(readiness, Readiness::Input);
}

#[test]
fn termination_wins_over_pending_input() {
    let Some((mut master, slave)) = pty() else {
        return;
    };
    let (listener, trigger) = TerminationListener::pair().unwrap();
    let mut console = Console::new(&slave).with_termination(listener);

    master.write_all(b"x\n").unwrap();
    master.flush().unwrap();
    assert_eq!(
        console.wait_for_input(Duration::from_secs(2)).unwrap(),
        Readiness::Input
    );

    trigger.fire();
    assert_eq!(
        console.wait_for_input(Duration::from_secs(2)).unwrap(),
        Readiness::Terminate
    );
}

#[test]
fn bytes_are_read_one_at_a_time_in_raw_mode() {
    let Some((mut master, slave)) = pty() else {
        return;
    };
    let mut controller = ModeController::new(Console::new(&slave));
    let original = controller.capture_original().unwrap();
    controller.enter_raw_mode(&original).unwrap();

    master.write_all(&[0x41, 0x42]).unwrap();
    master.flush().unwrap();

    let console = controller.device_mut();
    for expected in [0x41, 0x42] {
        let readiness = console.wait_for_input(Duration::from_secs(2)).unwrap();
        assert_eq!(readiness, Readiness::Input);
        assert_eq!(console.read_byte().unwrap(), Some(expected));
    }
    assert_eq!(
        console.wait_for_input(Duration::from_millis(50)).unwrap(),
        Readiness::TimedOut
    );

    controller.restore_original(&original).unwrap();
}

#[test]
fn termination_wakes_a_waiting_console() {
    let Some((_master, slave)) = pty() else {
        return;
    };
    let (listener, trigger) = TerminationListener::pair().unwrap();
    let mut console = Console::new(&slave).with_termination(listener);

    trigger.fire();
    let readiness = console.wait_for_input(Duration::from_secs(2)).unwrap();
    assert_eq!(readiness, Readiness::Terminate);
}

#[test]
fn session_on_a_pty_fails_and_leaves_attributes_intact() {
    let Some((_master, slave)) = pty() else {
        return;
    };
    let before = tcgetattr(&slave).unwrap();
    let mut output = Vec::new();

    let report = run_session(Console::new(&slave), &mut output, &ScanConfig::default());

    assert!(matches!(
        report.error(),
        Some(ScanError::UnsupportedDevice { .. })
    ));
    assert_ne!(report.exit_code(), 0);
    let shutdown = report.shutdown.as_ref().expect("shutdown should have run");
    assert!(!shutdown.attributes.is_failed());
    assert!(output.is_empty());
    assert_same_settings(&tcgetattr(&slave).unwrap(), &before);
}
