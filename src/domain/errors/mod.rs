// Domain errors - Error types for the domain layer

use std::fmt;

/// Message shown when a submission is attempted without a selected file
pub const MISSING_INPUT_MESSAGE: &str = "Please select a file to analyze";

/// Message shown when a selection is made with nothing chosen
pub const NO_FILE_SELECTED_MESSAGE: &str = "No file selected";

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Submit attempted with no file selected
    MissingInput,
    /// Selection invoked with nothing chosen
    NoFileSelected,
    /// A submission is already in flight
    Busy,
    /// The submitting call was dropped before the service answered
    Cancelled,
    /// The analysis service could not be reached
    TransportFailure(String),
    /// The analysis service answered with a non-success status
    RemoteFailure {
        status: u16,
        reason: String,
        detail: Option<String>,
    },
    /// The response body was not valid JSON
    MalformedResponse(String),
    /// Invalid arguments provided
    BadArgs(String),
    /// Configuration could not be loaded or is invalid
    ConfigError(String),
    /// File system operation failed
    FsFail(String),
}

impl DomainError {
    /// Whether the user can recover by resubmitting
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::TransportFailure(_)
                | DomainError::Cancelled
                | DomainError::RemoteFailure { .. }
                | DomainError::MalformedResponse(_)
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::MissingInput => write!(f, "{}", MISSING_INPUT_MESSAGE),
            DomainError::NoFileSelected => write!(f, "{}", NO_FILE_SELECTED_MESSAGE),
            DomainError::Busy => write!(f, "An analysis is already in progress"),
            DomainError::Cancelled => write!(f, "Analysis cancelled"),
            DomainError::TransportFailure(msg) => write!(f, "{}", msg),
            DomainError::RemoteFailure { reason, detail, .. } => match detail {
                Some(detail) => write!(f, "Analysis failed: {} ({})", reason, detail),
                None => write!(f, "Analysis failed: {}", reason),
            },
            DomainError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
