//! Error handling module for the Fedora setup tool.
//!
//! Provides centralized error handling with proper error types using thiserror.
//! All errors in the application should use these types for consistency.

use thiserror::Error;

/// Main error type for the setup tool
#[derive(Error, Debug)]
pub enum SetupError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Identity resolution errors (passwd lookup, home directory)
    #[error("Identity error: {0}")]
    Identity(String),

    /// Configuration errors (resolution, output formatting)
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for setup operations
pub type Result<T> = std::result::Result<T, SetupError>;

// Convenient error constructors
impl SetupError {
    /// Create an identity resolution error
    pub fn identity(msg: impl Into<String>) -> Self {
        Self::Identity(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
