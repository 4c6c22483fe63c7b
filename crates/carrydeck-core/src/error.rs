//! Machine-readable error codes for the CLI surface.
//!
//! The taxonomy is small by design: the console degrades rather than fails
//! for everything except one-shot commands, which report these codes in
//! their JSON error output.

use std::fmt;

/// Stable error codes (`E####`) for machine parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    TransportFailure,
    MalformedResponse,
    OrderNotFound,
    TerminalSetupFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::TransportFailure => "E2001",
            Self::MalformedResponse => "E2002",
            Self::OrderNotFound => "E3001",
            Self::TerminalSetupFailed => "E4001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::TransportFailure => "Orders endpoint unreachable",
            Self::MalformedResponse => "Orders response was not the expected envelope",
            Self::OrderNotFound => "Order not found",
            Self::TerminalSetupFailed => "Terminal setup failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in carrydeck/config.toml and retry."),
            Self::TransportFailure => {
                Some("Check the endpoint URL (--endpoint or config) and your network.")
            }
            Self::MalformedResponse => {
                Some("The endpoint must return { \"orders\": [...] }; verify the URL.")
            }
            Self::OrderNotFound => Some("The id must match a conversation_id in the latest fetch."),
            Self::TerminalSetupFailed => Some("Run from an interactive terminal."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
