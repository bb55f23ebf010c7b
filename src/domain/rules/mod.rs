// Domain rules - Session transition policies and endpoint layout

use crate::domain::errors::*;
use crate::domain::model::*;


/// Transition rules for an upload session
pub struct SessionRules;

impl SessionRules {
    /// State entered after a file is selected
    ///
    /// Selection clears any prior result or error. Nothing may be selected
    /// while a submission is in flight.
    pub fn on_select(current: &SessionState) -> Result<SessionState, DomainError> {
        if current.is_submitting() {
            return Err(DomainError::Busy);
        }
        Ok(SessionState::Idle)
    }

    /// State entered when a selection is made with nothing chosen
    pub fn on_empty_select(current: &SessionState) -> Result<SessionState, DomainError> {
        if current.is_submitting() {
            return Err(DomainError::Busy);
        }
        Ok(SessionState::Failed(DomainError::NoFileSelected.to_string()))
    }

    /// Check whether a submission may start from the current state
    pub fn can_submit(current: &SessionState, has_file: bool) -> Result<(), DomainError> {
        if current.is_submitting() {
            return Err(DomainError::Busy);
        }
        if !has_file {
            return Err(DomainError::MissingInput);
        }
        Ok(())
    }

    /// State entered when a submission resolves
    pub fn on_complete(outcome: Result<AnalysisResult, DomainError>) -> SessionState {
        match outcome {
            Ok(result) => SessionState::Succeeded(result),
            Err(err) => SessionState::Failed(err.to_string()),
        }
    }
}

/// Endpoint layout of the analysis service
pub struct EndpointRules;

impl EndpointRules {
    /// Default service location
    pub const DEFAULT_BASE_URL: &'static str = "https://verifylens.onrender.com";

    /// Multipart field carrying the uploaded file
    pub const FILE_FIELD: &'static str = "file";

    /// Normalize a base URL: trim whitespace and trailing slashes, require http(s)
    pub fn normalize_base_url(base_url: &str) -> Result<String, DomainError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(DomainError::BadArgs("API URL cannot be empty".to_string()));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(DomainError::BadArgs(format!(
                "API URL must start with http:// or https://: {}",
                base_url
            )));
        }
        Ok(trimmed.to_string())
    }

    /// Path of the analysis endpoint for a category
    pub fn analyze_path(category: MediaCategory) -> String {
        format!("/analyze/{}", category.as_str())
    }

    /// Full analysis URL for a normalized base
    pub fn analyze_url(base_url: &str, category: MediaCategory) -> String {
        format!("{}{}", base_url, Self::analyze_path(category))
    }
}
