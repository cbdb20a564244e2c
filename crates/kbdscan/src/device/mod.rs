//! Console device access.
//!
//! [`ConsoleDevice`] is the capability interface the rest of the crate is
//! written against: query and set line-discipline attributes, query and
//! set the console keyboard mode, wait for input, read one byte. Methods
//! return raw `nix` results; the mode controller and event loop decide
//! which [`crate::error::ScanError`] a failure becomes.
//!
//! [`Console`] implements it for a real terminal descriptor (standard
//! input by default) using `termios`, `poll` and the `KDGKBMODE` /
//! `KDSKBMODE` ioctls.

mod kd;

use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::sys::termios::{tcgetattr, tcsetattr, SetArg, Termios};
use std::io;
use std::os::fd::{AsFd, AsRawFd};
use std::time::Duration;

use crate::mode::RawModeAttributes;
use crate::model::{KeyboardMode, Readiness};
use crate::signal::TerminationListener;

/// Operations a scan session needs from the input device.
pub trait ConsoleDevice {
    /// Snapshot of the line-discipline attributes.
    type Attributes: RawModeAttributes;

    fn attributes(&mut self) -> nix::Result<Self::Attributes>;

    /// Apply attributes after flushing pending input and output.
    fn set_attributes(&mut self, attributes: &Self::Attributes) -> nix::Result<()>;

    fn keyboard_mode(&mut self) -> nix::Result<KeyboardMode>;

    fn set_keyboard_mode(&mut self, mode: KeyboardMode) -> nix::Result<()>;

    /// Block until input is readable, the timeout elapses, or a
    /// termination request arrives.
    fn wait_for_input(&mut self, timeout: Duration) -> nix::Result<Readiness>;

    /// Read at most one byte. `Ok(None)` means the read returned zero bytes.
    fn read_byte(&mut self) -> nix::Result<Option<u8>>;
}

/// A terminal descriptor driven through termios and console ioctls.
pub struct Console<F: AsFd = io::Stdin> {
    input: F,
    termination: Option<TerminationListener>,
}

impl Console<io::Stdin> {
    /// Console on the process's standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<F: AsFd> Console<F> {
    pub fn new(input: F) -> Self {
        Self {
            input,
            termination: None,
        }
    }

    /// Also wake up from waits when `listener` reports a termination signal.
    #[must_use]
    pub fn with_termination(mut self, listener: TerminationListener) -> Self {
        self.termination = Some(listener);
        self
    }
}

impl<F: AsFd> ConsoleDevice for Console<F> {
    type Attributes = Termios;

    fn attributes(&mut self) -> nix::Result<Termios> {
        tcgetattr(self.input.as_fd())
    }

    fn set_attributes(&mut self, attributes: &Termios) -> nix::Result<()> {
        tcsetattr(self.input.as_fd(), SetArg::TCSAFLUSH, attributes)
    }

    fn keyboard_mode(&mut self) -> nix::Result<KeyboardMode> {
        kd::get_keyboard_mode(self.input.as_fd())
    }

    fn set_keyboard_mode(&mut self, mode: KeyboardMode) -> nix::Result<()> {
        kd::set_keyboard_mode(self.input.as_fd(), mode)
    }

    fn wait_for_input(&mut self, timeout: Duration) -> nix::Result<Readiness> {
        // poll(2) takes whole milliseconds: round up so a short wait never
        // becomes a non-blocking poll, and clamp at u16::MAX.
        let millis = u16::try_from(timeout.as_nanos().div_ceil(1_000_000)).unwrap_or(u16::MAX);
        let mut fds = vec![PollFd::new(self.input.as_fd(), PollFlags::POLLIN)];
        if let Some(listener) = self.termination.as_ref() {
            fds.push(PollFd::new(listener.as_fd(), PollFlags::POLLIN));
        }

        match poll(&mut fds, PollTimeout::from(millis)) {
            Ok(0) => Ok(Readiness::TimedOut),
            Ok(_) => {
                let fired = |fd: Option<&PollFd<'_>>| {
                    fd.and_then(|fd| fd.revents())
                        .is_some_and(|events| !events.is_empty())
                };
                if fired(fds.get(1)) {
                    Ok(Readiness::Terminate)
                } else if fired(fds.first()) {
                    Ok(Readiness::Input)
                } else {
                    Ok(Readiness::Interrupted)
                }
            }
            Err(Errno::EINTR) => Ok(Readiness::Interrupted),
            Err(err) => Err(err),
        }
    }

    fn read_byte(&mut self) -> nix::Result<Option<u8>> {
        // std's Stdin is buffered and would swallow bytes poll() never sees.
        let mut buf = [0u8; 1];
        let count = nix::unistd::read(self.input.as_fd().as_raw_fd(), &mut buf)?;
        let [byte] = buf;
        Ok((count == 1).then_some(byte))
    }
}
