//! Scan session lifecycle.
//!
//! A [`ScanSession`] owns the device and the captured original
//! configuration. [`run_session`] is the single dispatcher: it captures,
//! activates raw and scancode mode, runs the event loop, and then runs
//! the shutdown sequence exactly once, whatever happened in between.
//!
//! # Example
//!
//! ```no_run
//! use kbdscan::device::Console;
//! use kbdscan::model::ScanConfig;
//! use kbdscan::session::run_session;
//!
//! let report = run_session(Console::stdin(), &mut std::io::stdout(), &ScanConfig::default());
//! std::process::exit(report.exit_code());
//! ```

use std::io::Write;
use tracing::debug;

use crate::device::ConsoleDevice;
use crate::error::{ScanError, ScanResult};
use crate::event_loop::EventLoop;
use crate::mode::ModeController;
use crate::model::{LoopOutcome, ScanConfig};
use crate::shutdown::{ShutdownReport, ShutdownSequencer};

/// A console whose original configuration has been captured.
///
/// Dropping a session that was not shut down explicitly runs the shutdown
/// sequence, so an unwinding panic still restores the console.
pub struct ScanSession<D: ConsoleDevice> {
    controller: ModeController<D>,
    sequencer: ShutdownSequencer<D::Attributes>,
}

impl<D: ConsoleDevice> ScanSession<D> {
    /// Capture the device's current attributes and symbolic keyboard mode.
    ///
    /// Nothing has been changed if this fails, so there is nothing to
    /// restore either. A keyboard mode that cannot be queried is not an
    /// error; `K_XLATE` is restored in that case.
    pub fn capture(device: D) -> ScanResult<Self> {
        let mut controller = ModeController::new(device);
        let original = controller.capture_original()?;
        let keyboard = controller.capture_keyboard_mode();
        debug!(%keyboard, "original console state captured");
        Ok(Self {
            controller,
            sequencer: ShutdownSequencer::new(original),
        })
    }

    /// Switch to raw line discipline and then to scancode mode.
    pub fn activate(&mut self) -> ScanResult<()> {
        self.controller.enter_raw_mode(self.sequencer.original())?;
        self.controller.enter_scancode_mode()
    }

    /// Run the event loop until it terminates or fails.
    pub fn run<W: Write>(&mut self, output: &mut W, config: &ScanConfig) -> ScanResult<LoopOutcome> {
        EventLoop::new(self.controller.device_mut(), output, config).run()
    }

    /// Restore the original state. Returns `None` if already done.
    pub fn shutdown(&mut self) -> Option<ShutdownReport> {
        self.sequencer.shutdown(&mut self.controller)
    }
}

impl<D: ConsoleDevice> Drop for ScanSession<D> {
    fn drop(&mut self) {
        if !self.sequencer.is_completed() {
            debug!("scan session dropped before shutdown");
            let _ = self.shutdown();
        }
    }
}

/// Everything a caller needs to finish the process.
#[derive(Debug)]
pub struct SessionReport {
    /// How the loop ended, or the error that ended the session.
    pub outcome: ScanResult<LoopOutcome>,
    /// `None` when the session failed before anything was changed.
    pub shutdown: Option<ShutdownReport>,
}

impl SessionReport {
    /// Process exit status: zero for a normal outcome.
    pub fn exit_code(&self) -> i32 {
        match &self.outcome {
            Ok(_) => 0,
            Err(err) => err.exit_code(),
        }
    }

    pub fn error(&self) -> Option<&ScanError> {
        self.outcome.as_ref().err()
    }
}

/// Capture, activate, loop and restore.
pub fn run_session<D, W>(device: D, output: &mut W, config: &ScanConfig) -> SessionReport
where
    D: ConsoleDevice,
    W: Write,
{
    if let Err(err) = config.validate() {
        return SessionReport {
            outcome: Err(err),
            shutdown: None,
        };
    }

    let mut session = match ScanSession::capture(device) {
        Ok(session) => session,
        Err(err) => {
            return SessionReport {
                outcome: Err(err),
                shutdown: None,
            }
        }
    };

    let outcome = session
        .activate()
        .and_then(|()| session.run(output, config));
    let shutdown = session.shutdown();

    SessionReport { outcome, shutdown }
}
