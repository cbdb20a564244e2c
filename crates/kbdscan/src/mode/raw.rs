use nix::sys::termios::{InputFlags, LocalFlags, Termios};

/// Input flags cleared in raw mode.
pub const RAW_CLEARED_INPUT_FLAGS: InputFlags = InputFlags::BRKINT;

/// Local flags cleared in raw mode.
pub const RAW_CLEARED_LOCAL_FLAGS: LocalFlags = LocalFlags::ECHO
    .union(LocalFlags::ICANON)
    .union(LocalFlags::IEXTEN)
    .union(LocalFlags::ISIG);

/// Line-discipline attributes that raw mode can be derived from.
pub trait RawModeAttributes: Clone {
    fn input_flags_mut(&mut self) -> &mut InputFlags;
    fn local_flags_mut(&mut self) -> &mut LocalFlags;
}

impl RawModeAttributes for Termios {
    fn input_flags_mut(&mut self) -> &mut InputFlags {
        &mut self.input_flags
    }

    fn local_flags_mut(&mut self) -> &mut LocalFlags {
        &mut self.local_flags
    }
}

/// Copy of `original` with break signalling, echo, canonical input,
/// extended input processing and signal characters turned off.
///
/// Output processing, control flags and control characters are untouched.
pub fn derive_raw_config<A: RawModeAttributes>(original: &A) -> A {
    let mut raw = original.clone();
    raw.input_flags_mut().remove(RAW_CLEARED_INPUT_FLAGS);
    raw.local_flags_mut().remove(RAW_CLEARED_LOCAL_FLAGS);
    raw
}
