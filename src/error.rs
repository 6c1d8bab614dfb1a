// Library error type. Only failures that stop an operation from getting a
// response at all live here; bad statuses and bodies are ordinary outcomes.

use thiserror::Error;

/// Errors surfaced by the client library. HTTP status failures and
/// malformed bodies are not errors here: they are decoded into explicit
/// outcomes (see `protocol`) and reported to the operator.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid backend address `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client")]
    Setup(#[source] reqwest::Error),

    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("console I/O failed: {0}")]
    Console(#[from] std::io::Error),

    #[error("no more operator input")]
    InputClosed,
}

impl ClientError {
    pub(crate) fn transport(operation: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| ClientError::Transport { operation, source }
    }

    /// Transport failures abandon the current operation only; everything
    /// else ends the session.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
