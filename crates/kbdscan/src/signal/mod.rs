//! Termination signal delivery.
//!
//! The `ctrlc` crate runs its handler on a dedicated thread. The handler
//! only writes a wakeup byte into a socket pair; the console polls the
//! other end next to its input descriptor, so the event loop itself
//! notices the request and the normal shutdown path restores the console.

use std::io::{self, Write};
use std::os::fd::{AsFd, BorrowedFd};
use std::os::unix::net::UnixStream;
use tracing::debug;

/// Read half: becomes readable once termination was requested.
#[derive(Debug)]
pub struct TerminationListener {
    reader: UnixStream,
}

/// Write half, fired from the signal handler thread.
#[derive(Debug)]
pub struct TerminationTrigger {
    writer: UnixStream,
}

impl TerminationListener {
    /// Connected listener/trigger pair with no signal handler attached.
    pub fn pair() -> io::Result<(Self, TerminationTrigger)> {
        let (reader, writer) = UnixStream::pair()?;
        writer.set_nonblocking(true)?;
        Ok((Self { reader }, TerminationTrigger { writer }))
    }

    /// Route SIGINT, SIGTERM and SIGHUP to a new listener.
    ///
    /// `ctrlc` accepts a single handler per process, so a second call fails
    /// with [`ctrlc::Error::MultipleHandlers`].
    pub fn install() -> Result<Self, ctrlc::Error> {
        let (listener, trigger) = Self::pair().map_err(ctrlc::Error::System)?;
        ctrlc::set_handler(move || trigger.fire())?;
        debug!("termination signal handler installed");
        Ok(listener)
    }
}

impl AsFd for TerminationListener {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.reader.as_fd()
    }
}

impl TerminationTrigger {
    /// Wake the listener.
    pub fn fire(&self) {
        // A full socket buffer already holds a pending wakeup.
        let _ = (&self.writer).write_all(&[1]);
    }
}
