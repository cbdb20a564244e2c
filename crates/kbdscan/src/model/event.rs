use std::fmt;

/// Bit set in a scancode byte when the key was released.
pub const RELEASE_BIT: u8 = 0x80;

/// Mask selecting the key identifier from a scancode byte.
pub const KEY_MASK: u8 = 0x7f;

/// Direction of a key transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyTransition {
    /// Key went down (bit 7 clear).
    Pressed,
    /// Key came up (bit 7 set).
    Released,
}

impl KeyTransition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pressed => "pressed",
            Self::Released => "released",
        }
    }
}

/// One byte reported by a console keyboard in raw scancode mode.
///
/// Multi-byte sequences (extended keys, Pause) are not reassembled: each
/// constituent byte decodes into its own event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScanEvent {
    code: u8,
    transition: KeyTransition,
}

impl ScanEvent {
    /// Decode a raw scancode byte.
    pub fn decode(byte: u8) -> Self {
        let transition = if byte & RELEASE_BIT == 0 {
            KeyTransition::Pressed
        } else {
            KeyTransition::Released
        };
        Self {
            code: byte & KEY_MASK,
            transition,
        }
    }

    /// Key identifier, always in `0..=127`.
    pub fn code(self) -> u8 {
        self.code
    }

    pub fn transition(self) -> KeyTransition {
        self.transition
    }
}

impl fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scancode {} {}.", self.code, self.transition.as_str())
    }
}
