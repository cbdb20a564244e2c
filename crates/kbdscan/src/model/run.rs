/// Result of waiting for the input descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// The input descriptor can be read without blocking.
    Input,
    /// Nothing arrived before the timeout elapsed.
    TimedOut,
    /// A termination signal was delivered while waiting.
    Terminate,
    /// The wait was interrupted by an unrelated signal.
    Interrupted,
}

/// Normal ways for the event loop to reach `TERMINATED`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopOutcome {
    /// No key transition within the timeout.
    TimedOut,
    /// SIGINT, SIGTERM or SIGHUP was received.
    TerminationRequested,
}

impl LoopOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TimedOut => "timed_out",
            Self::TerminationRequested => "termination_requested",
        }
    }
}
