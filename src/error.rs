//! Error types for the LearnHub SDK
//!
//! ## Table of Contents
//! - **ClientError**: Main error enum covering all failure modes
//! - **Result**: Type alias for `Result<T, ClientError>`
//!
//! Note that service-client methods do not surface these errors: per the
//! never-throw contract they resolve to an [`ApiResponse`](crate::envelope::ApiResponse)
//! envelope instead. `ClientError` covers the fallible plumbing around them
//! (client construction, configuration, session persistence).

use thiserror::Error;

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for SDK plumbing
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration error during client construction
    #[error("configuration error: {0}")]
    Config(String),

    /// Session/token store failure
    #[error("session store error: {0}")]
    Storage(String),

    /// HTTP transport failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a session store error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
