// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

/// Application error type shared by the REST client and the services.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Backend answered, but with a business error or an unreadable body
    #[error("Remote API error: {0}")]
    RemoteApi(String),

    /// Backend answered with a non-success HTTP status
    #[error("Remote API error: HTTP {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    /// Request never got an answer (connect failure, timeout)
    #[error("Remote transport error: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether retrying the same remote call later could succeed.
    ///
    /// Transport failures, 5xx and 429 responses are transient; business
    /// errors, validation failures and other 4xx responses are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Transport(_) => true,
            AppError::RemoteStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Result type alias for fallible operations
pub type Result<T> = std::result::Result<T, AppError>;
