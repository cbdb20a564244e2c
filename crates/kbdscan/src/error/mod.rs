//! Error taxonomy and exit-code mapping.
//!
//! Every failure a scan session can hit is a [`ScanError`] variant. Each
//! variant maps to a stable [`ErrorCode`] which in turn determines the
//! process exit status. Restoration failures carry a code too, but the
//! shutdown sequencer only logs them: they never decide the exit status.

use miette::Diagnostic;
use nix::errno::Errno;
use std::io;
use thiserror::Error;

use crate::model::KeyboardMode;

pub type ScanResult<T> = Result<T, ScanError>;

/// Failures of a scan session.
#[derive(Debug, Error, Diagnostic)]
pub enum ScanError {
    #[error("failed to read terminal attributes (tcgetattr)")]
    #[diagnostic(
        code(kbdscan::device_query),
        help("standard input must be a terminal")
    )]
    DeviceQuery(#[source] Errno),

    #[error("failed to set raw terminal attributes (tcsetattr)")]
    #[diagnostic(code(kbdscan::device_config))]
    DeviceConfig(#[source] Errno),

    #[error("failed to restore terminal attributes (tcsetattr)")]
    #[diagnostic(code(kbdscan::device_restore))]
    DeviceRestore(#[source] Errno),

    #[error("failed to restore keyboard mode {mode} (ioctl KDSKBMODE)")]
    #[diagnostic(code(kbdscan::device_restore))]
    KeyboardRestore {
        mode: KeyboardMode,
        #[source]
        source: Errno,
    },

    #[error("failed to switch console keyboard to {mode} (ioctl KDSKBMODE)")]
    #[diagnostic(
        code(kbdscan::unsupported_device),
        help(
            "raw scancode mode is only available on a virtual console (a Linux VT or the \
             FreeBSD console); terminal emulators, ssh sessions and multiplexers reject it. \
             EPERM means the console belongs to another user."
        )
    )]
    UnsupportedDevice {
        mode: KeyboardMode,
        #[source]
        source: Errno,
    },

    #[error("failed waiting for keyboard input (poll)")]
    #[diagnostic(code(kbdscan::wait))]
    Wait(#[source] Errno),

    #[error("failed to read keyboard input (read)")]
    #[diagnostic(code(kbdscan::read))]
    Read(#[source] Errno),

    #[error("failed to write scancode output")]
    #[diagnostic(code(kbdscan::output))]
    Output(#[source] io::Error),

    #[error("invalid configuration: {0}")]
    #[diagnostic(code(kbdscan::config))]
    InvalidConfig(String),
}

impl ScanError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DeviceQuery(_) => ErrorCode::DeviceQuery,
            Self::DeviceConfig(_) => ErrorCode::DeviceConfig,
            Self::DeviceRestore(_) | Self::KeyboardRestore { .. } => ErrorCode::DeviceRestore,
            Self::UnsupportedDevice { .. } => ErrorCode::UnsupportedDevice,
            Self::Wait(_) => ErrorCode::Wait,
            Self::Read(_) => ErrorCode::Read,
            Self::Output(_) => ErrorCode::Output,
            Self::InvalidConfig(_) => ErrorCode::Config,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    /// OS error behind this failure, if any.
    pub fn errno(&self) -> Option<Errno> {
        match self {
            Self::DeviceQuery(errno)
            | Self::DeviceConfig(errno)
            | Self::DeviceRestore(errno)
            | Self::Wait(errno)
            | Self::Read(errno) => Some(*errno),
            Self::KeyboardRestore { source, .. } | Self::UnsupportedDevice { source, .. } => {
                Some(*source)
            }
            Self::Output(err) => err.raw_os_error().map(Errno::from_raw),
            Self::InvalidConfig(_) => None,
        }
    }
}

/// Exit status clap uses for a malformed command line.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Stable identifiers for [`ScanError`] kinds.
///
/// Exit statuses start at 3: 1 is left to generic failures and 2 to
/// [`USAGE_EXIT_CODE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Config,
    DeviceQuery,
    DeviceConfig,
    UnsupportedDevice,
    Wait,
    Read,
    Output,
    DeviceRestore,
}

/// Static description of an error code.
#[derive(Clone, Copy, Debug)]
pub struct ErrorCodeInfo {
    pub code: ErrorCode,
    pub exit_code: i32,
    pub description: &'static str,
}

impl ErrorCode {
    pub const ALL: [Self; 8] = [
        Self::Config,
        Self::DeviceQuery,
        Self::DeviceConfig,
        Self::UnsupportedDevice,
        Self::Wait,
        Self::Read,
        Self::Output,
        Self::DeviceRestore,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Config => "E_CONFIG",
            Self::DeviceQuery => "E_DEVICE_QUERY",
            Self::DeviceConfig => "E_DEVICE_CONFIG",
            Self::UnsupportedDevice => "E_UNSUPPORTED_DEVICE",
            Self::Wait => "E_WAIT",
            Self::Read => "E_READ",
            Self::Output => "E_OUTPUT",
            Self::DeviceRestore => "E_DEVICE_RESTORE",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Self::Config => 3,
            Self::DeviceQuery => 4,
            Self::DeviceConfig => 5,
            Self::UnsupportedDevice => 6,
            Self::Wait => 7,
            Self::Read => 8,
            Self::Output => 9,
            Self::DeviceRestore => 10,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Config => "scan configuration rejected before touching the device",
            Self::DeviceQuery => "standard input is not a terminal or cannot be queried",
            Self::DeviceConfig => "raw line-discipline attributes could not be applied",
            Self::UnsupportedDevice => "console keyboard refused scancode mode (not a VT?)",
            Self::Wait => "waiting for input failed",
            Self::Read => "reading a scancode byte failed",
            Self::Output => "writing to standard output failed",
            Self::DeviceRestore => "restoring the original console state failed",
        }
    }

    pub fn info(self) -> ErrorCodeInfo {
        ErrorCodeInfo {
            code: self,
            exit_code: self.exit_code(),
            description: self.description(),
        }
    }
}
