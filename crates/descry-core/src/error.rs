//! Error types and handling for descry-core operations.
//!
//! The discovery chain itself never fails hard on a single bad response:
//! transport and parse failures are absorbed per step and logged, and the
//! step simply contributes no candidates. The error type here covers the
//! failures that *are* surfaced — building an HTTP client, malformed
//! configuration, and parse errors reported by the lower-level readers
//! before the orchestrator downgrades them.

use thiserror::Error;

/// The main error type for descry-core operations.
///
/// All public fallible functions in descry-core return `Result<T, Error>`.
/// Conversions from `std::io::Error` and `reqwest::Error` are automatic.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Covers client construction and HTTP requests. The underlying
    /// `reqwest::Error` is preserved for detailed connection information.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Parsing operation failed.
    ///
    /// A document body did not match the format its content type claimed.
    /// Inside the discovery chain these are absorbed; they only escape
    /// through the standalone parser entry points.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid discoverer configuration.
    ///
    /// Raised for unusable inputs like an empty predicate set or a
    /// relation token that expands to an invalid IRI.
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if the error might be resolved by retrying.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            Self::Parse(_) | Self::Config(_) => false,
        }
    }

    /// Returns a short category label for logging and diagnostics.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
        }
    }
}

/// Convenience result alias used throughout descry-core.
pub type Result<T, E = Error> = std::result::Result<T, E>;
