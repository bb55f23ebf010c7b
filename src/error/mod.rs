//! Error handling module for VerifyLens

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for VerifyLens operations
#[derive(Error, Debug)]
pub enum VerifyLensError {
    /// Domain layer error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Invalid or unreadable configuration
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Logging could not be set up
    #[error("Failed to initialize logging: {message}")]
    Logging { message: String },
}

/// Result type alias for VerifyLens operations
pub type VerifyLensResult<T> = std::result::Result<T, VerifyLensError>;
