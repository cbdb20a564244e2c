//! Scripted in-memory console device.
//!
//! [`ScriptedConsole`] implements [`ConsoleDevice`] by replaying a queue of
//! wait/read results and recording every call. A [`ConsoleHandle`] shares
//! the recorded state so tests can inspect it after the device has been
//! moved into a session.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use kbdscan::device::ConsoleDevice;
use kbdscan::mode::RawModeAttributes;
use kbdscan::model::{KeyboardMode, Readiness};
use nix::errno::Errno;
use nix::sys::termios::{InputFlags, LocalFlags, OutputFlags};

/// Minimal stand-in for `termios`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeAttributes {
    pub input: InputFlags,
    pub output: OutputFlags,
    pub local: LocalFlags,
}

impl FakeAttributes {
    /// Typical attributes of an interactive console in cooked mode.
    pub fn cooked() -> Self {
        Self {
            input: InputFlags::BRKINT | InputFlags::ICRNL | InputFlags::IXON,
            output: OutputFlags::OPOST | OutputFlags::ONLCR,
            local: LocalFlags::ECHO
                | LocalFlags::ECHOE
                | LocalFlags::ECHOK
                | LocalFlags::ICANON
                | LocalFlags::IEXTEN
                | LocalFlags::ISIG,
        }
    }

    pub fn is_raw(&self) -> bool {
        !self.input.contains(InputFlags::BRKINT)
            && !self.local.intersects(
                LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG,
            )
    }
}

impl RawModeAttributes for FakeAttributes {
    fn input_flags_mut(&mut self) -> &mut InputFlags {
        &mut self.input
    }

    fn local_flags_mut(&mut self) -> &mut LocalFlags {
        &mut self.local
    }
}

/// One recorded device call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    GetAttributes,
    SetAttributes(FakeAttributes),
    GetKeyboardMode,
    SetKeyboardMode(KeyboardMode),
    Wait(Duration),
    Read,
}

/// One scripted reaction to a wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptStep {
    /// Input ready; the following read returns this.
    Read(Result<Option<u8>, Errno>),
    /// The wait itself returns this.
    Wait(Result<Readiness, Errno>),
}

/// Failure injection for non-loop operations.
#[derive(Clone, Debug, Default)]
pub struct Faults {
    pub query: Option<Errno>,
    pub apply_raw: Option<Errno>,
    pub restore: Option<Errno>,
    pub scancode: Option<Errno>,
    pub symbolic: Option<Errno>,
    pub keyboard_query: Option<Errno>,
}

#[derive(Debug)]
pub(crate) struct ConsoleState {
    pub(crate) original: FakeAttributes,
    pub(crate) attributes: FakeAttributes,
    pub(crate) keyboard: KeyboardMode,
    pub(crate) script: VecDeque<ScriptStep>,
    pub(crate) pending_read: Option<Result<Option<u8>, Errno>>,
    pub(crate) faults: Faults,
    pub(crate) calls: Vec<Call>,
}

/// Fake console device driven by a script.
#[derive(Debug)]
pub struct ScriptedConsole {
    state: Rc<RefCell<ConsoleState>>,
}

/// Shared view of a [`ScriptedConsole`]'s state.
#[derive(Clone, Debug)]
pub struct ConsoleHandle {
    state: Rc<RefCell<ConsoleState>>,
}

impl ScriptedConsole {
    pub(crate) fn from_parts(
        attributes: FakeAttributes,
        keyboard: KeyboardMode,
        script: Vec<ScriptStep>,
        faults: Faults,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(ConsoleState {
                original: attributes.clone(),
                attributes,
                keyboard,
                script: script.into(),
                pending_read: None,
                faults,
                calls: Vec::new(),
            })),
        }
    }

    pub fn handle(&self) -> ConsoleHandle {
        ConsoleHandle {
            state: Rc::clone(&self.state),
        }
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl ConsoleDevice for ScriptedConsole {
    type Attributes = FakeAttributes;

    fn attributes(&mut self) -> nix::Result<FakeAttributes> {
        self.record(Call::GetAttributes);
        let state = self.state.borrow();
        match state.faults.query {
            Some(errno) => Err(errno),
            None => Ok(state.attributes.clone()),
        }
    }

    fn set_attributes(&mut self, attributes: &FakeAttributes) -> nix::Result<()> {
        self.record(Call::SetAttributes(attributes.clone()));
        let mut state = self.state.borrow_mut();
        let fault = if *attributes == state.original {
            state.faults.restore
        } else {
            state.faults.apply_raw
        };
        if let Some(errno) = fault {
            return Err(errno);
        }
        state.attributes = attributes.clone();
        Ok(())
    }

    fn keyboard_mode(&mut self) -> nix::Result<KeyboardMode> {
        self.record(Call::GetKeyboardMode);
        let state = self.state.borrow();
        match state.faults.keyboard_query {
            Some(errno) => Err(errno),
            None => Ok(state.keyboard),
        }
    }

    fn set_keyboard_mode(&mut self, mode: KeyboardMode) -> nix::Result<()> {
        self.record(Call::SetKeyboardMode(mode));
        let mut state = self.state.borrow_mut();
        let fault = if mode.is_symbolic() {
            state.faults.symbolic
        } else {
            state.faults.scancode
        };
        if let Some(errno) = fault {
            return Err(errno);
        }
        state.keyboard = mode;
        Ok(())
    }

    fn wait_for_input(&mut self, timeout: Duration) -> nix::Result<Readiness> {
        self.record(Call::Wait(timeout));
        let mut state = self.state.borrow_mut();
        match state.script.pop_front() {
            None => Ok(Readiness::TimedOut),
            Some(ScriptStep::Wait(result)) => result,
            Some(ScriptStep::Read(result)) => {
                state.pending_read = Some(result);
                Ok(Readiness::Input)
            }
        }
    }

    fn read_byte(&mut self) -> nix::Result<Option<u8>> {
        self.record(Call::Read);
        self.state.borrow_mut().pending_read.take().unwrap_or(Ok(None))
    }
}

impl ConsoleHandle {
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Attributes currently applied to the fake device.
    pub fn attributes(&self) -> FakeAttributes {
        self.state.borrow().attributes.clone()
    }

    /// Attributes the device started with.
    pub fn original(&self) -> FakeAttributes {
        self.state.borrow().original.clone()
    }

    pub fn keyboard_mode(&self) -> KeyboardMode {
        self.state.borrow().keyboard
    }

    /// Number of `set_attributes` calls carrying the original attributes.
    pub fn restore_calls(&self) -> usize {
        let state = self.state.borrow();
        state
            .calls
            .iter()
            .filter(|call| matches!(call, Call::SetAttributes(a) if *a == state.original))
            .count()
    }

    /// Keyboard modes requested, in order.
    pub fn keyboard_switches(&self) -> Vec<KeyboardMode> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::SetKeyboardMode(mode) => Some(*mode),
                _ => None,
            })
            .collect()
    }

    pub fn wait_timeouts(&self) -> Vec<Duration> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Wait(timeout) => Some(*timeout),
                _ => None,
            })
            .collect()
    }

    pub fn reads(&self) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Read))
            .count()
    }

    /// Unconsumed script steps.
    pub fn remaining(&self) -> usize {
        self.state.borrow().script.len()
    }
}
