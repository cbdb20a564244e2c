//! Restoration of the original console state.
//!
//! [`ShutdownSequencer`] holds the captured attributes and runs the
//! restoration steps at most once: line-discipline attributes first, then
//! the keyboard mode. Failures are logged and collected into the
//! [`ShutdownReport`]; they never stop the sequence or change the exit
//! status chosen by the caller.

use tracing::{debug, warn};

use crate::device::ConsoleDevice;
use crate::error::ScanError;
use crate::mode::ModeController;

/// Outcome of one restoration step.
#[derive(Debug)]
pub enum RestoreStep {
    Restored,
    Failed(ScanError),
}

impl RestoreStep {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn error(&self) -> Option<&ScanError> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Restored => None,
        }
    }
}

/// What the shutdown sequence managed to restore.
#[derive(Debug)]
pub struct ShutdownReport {
    pub attributes: RestoreStep,
    pub keyboard: RestoreStep,
}

impl ShutdownReport {
    pub fn is_clean(&self) -> bool {
        !self.attributes.is_failed() && !self.keyboard.is_failed()
    }
}

/// Single-use restoration of a captured configuration.
pub struct ShutdownSequencer<A> {
    original: A,
    completed: bool,
}

impl<A> ShutdownSequencer<A> {
    pub fn new(original: A) -> Self {
        Self {
            original,
            completed: false,
        }
    }

    pub fn original(&self) -> &A {
        &self.original
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Restore the original attributes and keyboard mode.
    ///
    /// Returns `None` if the sequence already ran. Both steps are always
    /// attempted, whether or not the session got as far as scancode mode.
    pub fn shutdown<D>(&mut self, controller: &mut ModeController<D>) -> Option<ShutdownReport>
    where
        D: ConsoleDevice<Attributes = A>,
    {
        if self.completed {
            debug!("shutdown already completed");
            return None;
        }
        self.completed = true;

        let attributes = match controller.restore_original(&self.original) {
            Ok(()) => RestoreStep::Restored,
            Err(err) => {
                warn!(error = %err, errno = ?err.errno(), "could not restore terminal attributes");
                RestoreStep::Failed(err)
            }
        };

        let scancode_active = controller.scancode_active();
        let keyboard = match controller.enter_symbolic_mode() {
            Ok(()) => RestoreStep::Restored,
            Err(err) => {
                warn!(
                    error = %err,
                    errno = ?err.errno(),
                    scancode_active,
                    "could not restore keyboard mode"
                );
                RestoreStep::Failed(err)
            }
        };

        debug!(
            attributes = ?attributes,
            keyboard = ?keyboard,
            "console state restored"
        );
        Some(ShutdownReport {
            attributes,
            keyboard,
        })
    }
}
