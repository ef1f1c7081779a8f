//! Reasons a replay or capture session ends.
//!
//! The coordinator logs the reason it is given when it is shut down, so the
//! log tells an exhausted input apart from an interrupted one.

/// Reason why the coordinator is being torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShutdownReason {
    /// The event source has no more events.
    #[default]
    EndOfInput,

    /// The event source failed and no further events can be read.
    InputError,

    /// A signal (SIGTERM or SIGINT) was received.
    SignalReceived,
}

impl std::fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownReason::EndOfInput => write!(f, "end of input"),
            ShutdownReason::InputError => write!(f, "input error"),
            ShutdownReason::SignalReceived => write!(f, "signal received"),
        }
    }
}
