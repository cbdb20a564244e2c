use std::time::Duration;

use crate::error::{ScanError, ScanResult};

/// Inactivity period after which the loop stops and the console is restored.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Shortest accepted timeout; the wait has millisecond resolution.
pub const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// Longest accepted timeout (`u16::MAX` milliseconds, the wait's upper bound).
pub const MAX_TIMEOUT: Duration = Duration::from_millis(65_535);

/// Terminator written after every scancode line.
pub const DEFAULT_LINE_ENDING: &str = "\r\n";

/// Runtime parameters for a scan session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Wait applied fresh on every loop iteration.
    pub timeout: Duration,
    /// Terminator appended to each printed event.
    pub line_ending: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            line_ending: DEFAULT_LINE_ENDING.to_string(),
        }
    }
}

impl ScanConfig {
    /// Default configuration with a different inactivity timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ScanResult<()> {
        if self.timeout < MIN_TIMEOUT || self.timeout > MAX_TIMEOUT {
            return Err(ScanError::InvalidConfig(format!(
                "timeout must be between {MIN_TIMEOUT:?} and {MAX_TIMEOUT:?}, got {:?}",
                self.timeout
            )));
        }
        if self.line_ending.is_empty() {
            return Err(ScanError::InvalidConfig(
                "line ending must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
