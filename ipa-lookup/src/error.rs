//! Error types for ipa-lookup
//!
//! Only [`TranscribeError`] reaches callers of the orchestrator. Fetch and
//! extraction failures are absorbed at the source-strategy boundary and
//! turn into an empty transcription for the affected word.

use thiserror::Error;

/// Failure of a single HTTP fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure (DNS, connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Body could not be read or decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// HTTP client could not be constructed
    #[error("Client error: {0}")]
    Client(String),
}

/// Reason a source strategy produced no result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Response decoded but the article body was not where expected
    #[error("Response has no article body at {0}")]
    MissingBody(&'static str),

    /// No extraction rule matched (the ordinary "not found" outcome)
    #[error("No extraction rule matched")]
    NoMatch,

    /// Extracted text failed the validity policy
    #[error("Extracted text rejected: {chars} chars exceeds limit of {max}")]
    Rejected { chars: usize, max: usize },
}

/// Error surfaced by [`crate::Transcriber`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscribeError {
    /// No strategy is registered under the requested language identifier
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}
