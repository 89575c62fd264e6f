//! Error types for secret resolution

use thiserror::Error;

/// Failures while resolving secrets.
#[derive(Error, Debug)]
pub enum SecretError {
    /// Store identifier cannot form a vault address
    #[error("Invalid secret store identifier: {0}")]
    InvalidStoreIdentifier(String),

    /// Transport-level failure talking to the store or token endpoint
    #[error("Secret store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Store answered with a non-success status
    #[error("Secret store returned {status} for '{name}'")]
    Status { name: String, status: u16 },

    /// Access token could not be obtained
    #[error("Credential error: {0}")]
    Credential(String),

    /// Neither the secret store nor the environment supplied a connection string
    #[error("Database connection string could not be resolved")]
    MissingConnectionString,
}

/// Convenience Result type for secret operations.
pub type Result<T> = std::result::Result<T, SecretError>;
