//! Fluent builder for [`ScriptedConsole`].
//!
//! # Example
//!
//! ```ignore
//! use kbdscan_fixtures::ConsoleBuilder;
//!
//! let console = ConsoleBuilder::new()
//!     .press_and_release(0x1e)
//!     .empty_read()
//!     .build();
//! let handle = console.handle();
//! ```

use kbdscan::model::{KeyboardMode, Readiness};
use nix::errno::Errno;

use crate::console::{FakeAttributes, Faults, ScriptStep, ScriptedConsole};

/// Builds a [`ScriptedConsole`]; an exhausted script times out.
#[derive(Debug, Clone)]
pub struct ConsoleBuilder {
    attributes: FakeAttributes,
    keyboard: KeyboardMode,
    script: Vec<ScriptStep>,
    faults: Faults,
}

impl Default for ConsoleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleBuilder {
    /// Cooked attributes, keyboard in `K_XLATE`, empty script.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attributes: FakeAttributes::cooked(),
            keyboard: KeyboardMode::Xlate,
            script: Vec::new(),
            faults: Faults::default(),
        }
    }

    #[must_use]
    pub fn with_keyboard_mode(mut self, mode: KeyboardMode) -> Self {
        self.keyboard = mode;
        self
    }

    /// Input ready, one byte read.
    #[must_use]
    pub fn byte(mut self, byte: u8) -> Self {
        self.script.push(ScriptStep::Read(Ok(Some(byte))));
        self
    }

    #[must_use]
    pub fn bytes(self, bytes: &[u8]) -> Self {
        bytes.iter().fold(self, |builder, byte| builder.byte(*byte))
    }

    /// Press followed by release of the same key.
    #[must_use]
    pub fn press_and_release(self, code: u8) -> Self {
        self.byte(code & 0x7f).byte(code | 0x80)
    }

    /// Input ready, zero bytes read.
    #[must_use]
    pub fn empty_read(mut self) -> Self {
        self.script.push(ScriptStep::Read(Ok(None)));
        self
    }

    #[must_use]
    pub fn read_error(mut self, errno: Errno) -> Self {
        self.script.push(ScriptStep::Read(Err(errno)));
        self
    }

    #[must_use]
    pub fn wait_error(mut self, errno: Errno) -> Self {
        self.script.push(ScriptStep::Wait(Err(errno)));
        self
    }

    #[must_use]
    pub fn interrupted(mut self) -> Self {
        self.script.push(ScriptStep::Wait(Ok(Readiness::Interrupted)));
        self
    }

    #[must_use]
    pub fn terminate(mut self) -> Self {
        self.script.push(ScriptStep::Wait(Ok(Readiness::Terminate)));
        self
    }

    #[must_use]
    pub fn timeout(mut self) -> Self {
        self.script.push(ScriptStep::Wait(Ok(Readiness::TimedOut)));
        self
    }

    #[must_use]
    pub fn fail_query(mut self, errno: Errno) -> Self {
        self.faults.query = Some(errno);
        self
    }

    #[must_use]
    pub fn fail_apply_raw(mut self, errno: Errno) -> Self {
        self.faults.apply_raw = Some(errno);
        self
    }

    #[must_use]
    pub fn fail_restore(mut self, errno: Errno) -> Self {
        self.faults.restore = Some(errno);
        self
    }

    #[must_use]
    pub fn fail_scancode(mut self, errno: Errno) -> Self {
        self.faults.scancode = Some(errno);
        self
    }

    #[must_use]
    pub fn fail_symbolic(mut self, errno: Errno) -> Self {
        self.faults.symbolic = Some(errno);
        self
    }

    #[must_use]
    pub fn fail_keyboard_query(mut self, errno: Errno) -> Self {
        self.faults.keyboard_query = Some(errno);
        self
    }

    #[must_use]
    pub fn build(self) -> ScriptedConsole {
        ScriptedConsole::from_parts(self.attributes, self.keyboard, self.script, self.faults)
    }
}
