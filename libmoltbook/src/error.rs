//! Error types for the Moltbook client

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MoltbookError>;

/// Closed error taxonomy for everything the client can fail with.
///
/// Remote failures keep their kind so callers can branch on authentication
/// and rate-limit conditions instead of string-matching messages. Local
/// file problems (`NotRegistered`, `Credentials`, `Io`) stay distinct from
/// remote API errors.
#[derive(Error, Debug)]
pub enum MoltbookError {
    /// 401 from the API: invalid or missing API key.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// 404 from the API.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 429 from the API. `retry_after` is seconds, taken from the response
    /// body when the server includes it.
    #[error("Rate limit exceeded: {message}")]
    RateLimited {
        message: String,
        retry_after: Option<u64>,
    },

    /// Any other non-2xx status, with the parsed error payload or the raw
    /// status text when the body was not JSON.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The request never reached the server, or a 2xx body was unparseable.
    #[error("Network error: {0}")]
    Network(String),

    /// No credential file on disk; the agent has not registered yet.
    #[error("Not registered: no credentials at {}", path.display())]
    NotRegistered { path: PathBuf },

    /// Credential or heartbeat-state file exists but cannot be understood.
    #[error("Credential error: {0}")]
    Credentials(String),

    /// Configuration file problems.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MoltbookError {
    /// Exit code for CLI binaries wrapping the library.
    pub fn exit_code(&self) -> i32 {
        match self {
            MoltbookError::Auth(_) => 2,
            MoltbookError::InvalidInput(_) => 3,
            _ => 1,
        }
    }

    /// True when the failure is the advisory "slow down" condition.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, MoltbookError::RateLimited { .. })
    }
}

impl From<reqwest::Error> for MoltbookError {
    fn from(err: reqwest::Error) -> Self {
        MoltbookError::Network(err.to_string())
    }
}
