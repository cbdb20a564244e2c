//! Wait/read/print loop.
//!
//! The loop has two states. While [`LoopState::Waiting`] it blocks on the
//! device with a fresh timeout, reads at most one byte when input is
//! ready and prints the decoded [`ScanEvent`]. It moves to
//! [`LoopState::Terminated`] on timeout or a termination request, and
//! bails out with an error when the wait, read or write fails.

use std::io::Write;
use tracing::{debug, info};

use crate::device::ConsoleDevice;
use crate::error::{ScanError, ScanResult};
use crate::model::{LoopOutcome, Readiness, ScanConfig, ScanEvent};

/// State after one loop iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Waiting,
    Terminated(LoopOutcome),
}

/// Event loop over a console device and an output stream.
pub struct EventLoop<'a, D: ConsoleDevice, W: Write> {
    device: &'a mut D,
    output: &'a mut W,
    config: &'a ScanConfig,
    events: u64,
}

impl<'a, D: ConsoleDevice, W: Write> EventLoop<'a, D, W> {
    pub fn new(device: &'a mut D, output: &'a mut W, config: &'a ScanConfig) -> Self {
        Self {
            device,
            output,
            config,
            events: 0,
        }
    }

    /// Number of scan events printed so far.
    pub fn events(&self) -> u64 {
        self.events
    }

    /// Run one wait/read iteration.
    pub fn step(&mut self) -> ScanResult<LoopState> {
        let readiness = self
            .device
            .wait_for_input(self.config.timeout)
            .map_err(ScanError::Wait)?;

        match readiness {
            Readiness::TimedOut => {
                info!("Timeout. Exiting...");
                Ok(LoopState::Terminated(LoopOutcome::TimedOut))
            }
            Readiness::Terminate => {
                info!("Termination requested. Exiting...");
                Ok(LoopState::Terminated(LoopOutcome::TerminationRequested))
            }
            Readiness::Interrupted => Ok(LoopState::Waiting),
            Readiness::Input => {
                if let Some(byte) = self.device.read_byte().map_err(ScanError::Read)? {
                    self.emit(ScanEvent::decode(byte))?;
                }
                Ok(LoopState::Waiting)
            }
        }
    }

    /// Iterate until the loop terminates or fails.
    pub fn run(mut self) -> ScanResult<LoopOutcome> {
        loop {
            if let LoopState::Terminated(outcome) = self.step()? {
                debug!(events = self.events, outcome = outcome.as_str(), "event loop finished");
                return Ok(outcome);
            }
        }
    }

    fn emit(&mut self, event: ScanEvent) -> ScanResult<()> {
        write!(self.output, "{event}{}", self.config.line_ending).map_err(ScanError::Output)?;
        self.output.flush().map_err(ScanError::Output)?;
        self.events += 1;
        Ok(())
    }
}
