use std::ffi::c_int;
use std::fmt;

/// Console keyboard interpretation mode (`KDSKBMODE` argument).
///
/// Not every mode exists on every platform; [`KeyboardMode::to_raw`]
/// returns `None` for the ones the current target does not define.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyboardMode {
    /// Raw hardware scancodes.
    Raw,
    /// Keys translated to characters through the keymap.
    Xlate,
    /// Linux keycodes instead of scancodes.
    MediumRaw,
    /// Keys translated to UTF-8 through the keymap (Linux).
    Unicode,
    /// Keyboard input disabled (Linux).
    Off,
    /// Keycodes (FreeBSD syscons/vt).
    Code,
}

impl KeyboardMode {
    /// Mode used to report one byte per key transition.
    #[cfg(not(target_os = "freebsd"))]
    pub const SCANCODE: Self = Self::Raw;
    /// Mode used to report one byte per key transition.
    #[cfg(target_os = "freebsd")]
    pub const SCANCODE: Self = Self::Code;

    /// Whether keys are translated into symbols in this mode.
    pub fn is_symbolic(self) -> bool {
        matches!(self, Self::Xlate | Self::Unicode)
    }

    /// Platform value for the `KDSKBMODE` ioctl.
    #[cfg(not(target_os = "freebsd"))]
    pub fn to_raw(self) -> Option<c_int> {
        match self {
            Self::Raw => Some(0x00),
            Self::Xlate => Some(0x01),
            Self::MediumRaw => Some(0x02),
            Self::Unicode => Some(0x03),
            Self::Off => Some(0x04),
            Self::Code => None,
        }
    }

    /// Platform value for the `KDSKBMODE` ioctl.
    #[cfg(target_os = "freebsd")]
    pub fn to_raw(self) -> Option<c_int> {
        match self {
            Self::Raw => Some(0),
            Self::Xlate => Some(1),
            Self::Code => Some(2),
            Self::MediumRaw | Self::Unicode | Self::Off => None,
        }
    }

    /// Decode a value returned by `KDGKBMODE`.
    pub fn from_raw(value: c_int) -> Option<Self> {
        [
            Self::Raw,
            Self::Xlate,
            Self::MediumRaw,
            Self::Unicode,
            Self::Off,
            Self::Code,
        ]
        .into_iter()
        .find(|mode| mode.to_raw() == Some(value))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "K_RAW",
            Self::Xlate => "K_XLATE",
            Self::MediumRaw => "K_MEDIUMRAW",
            Self::Unicode => "K_UNICODE",
            Self::Off => "K_OFF",
            Self::Code => "K_CODE",
        }
    }
}

impl fmt::Display for KeyboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scancode_mode_is_not_symbolic() {
        assert!(!KeyboardMode::SCANCODE.is_symbolic());
        assert!(KeyboardMode::Xlate.is_symbolic());
    }

    #[test]
    fn raw_values_round_trip_on_this_platform() {
        for mode in [
            KeyboardMode::Raw,
            KeyboardMode::Xlate,
            KeyboardMode::MediumRaw,
            KeyboardMode::Unicode,
            KeyboardMode::Off,
            KeyboardMode::Code,
        ] {
            if let Some(raw) = mode.to_raw() {
                assert_eq!(KeyboardMode::from_raw(raw), Some(mode));
            }
        }
        assert_eq!(KeyboardMode::from_raw(-1), None);
    }

    #[test]
    fn scancode_mode_has_a_platform_value() {
        assert!(KeyboardMode::SCANCODE.to_raw().is_some());
        assert_eq!(KeyboardMode::Xlate.to_raw(), Some(1));
    }
}
