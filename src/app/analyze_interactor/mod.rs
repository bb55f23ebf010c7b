// Analyze interactor - Orchestrates the upload-and-analyze use case

use std::path::PathBuf;
use std::sync::Arc;

use crate::app::session::UploadSession;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Interactor for the analyze use case
pub struct AnalyzeInteractor {
    analysis_port: Arc<dyn AnalysisPort>,
    log_port: Arc<dyn LogPort>,
}

impl AnalyzeInteractor {
    /// Create new analyze interactor with injected ports
    pub fn new(analysis_port: Arc<dyn AnalysisPort>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            analysis_port,
            log_port,
        }
    }

    /// Fresh session bound to this interactor's analysis service
    ///
    /// Callers subscribe to it before calling [`AnalyzeInteractor::execute`]
    /// to follow the submission.
    pub fn new_session(&self) -> UploadSession {
        UploadSession::new(Arc::clone(&self.analysis_port))
    }

    /// Load the requested file, select it, and submit it on `session`
    pub async fn execute(
        &self,
        session: &UploadSession,
        request: AnalyzeRequest,
    ) -> Result<AnalyzeResponse, DomainError> {
        self.log_port
            .info(&format!("Starting analysis for: {}", request.input_path.display()))
            .await;

        let file = SelectedFile::from_path(&request.input_path, request.media_type).await?;
        let summary = file.summary();

        if request.media_type.is_none() {
            self.log_port
                .debug(&format!("Inferred media type {} from file name", summary.category))
                .await;
        }

        session.select_file(Some(file))?;

        if let Err(err) = session.submit().await {
            if err == DomainError::Busy {
                return Err(err);
            }
            self.log_port
                .log_event(
                    &LogEvent::new(LogLevel::Warn, "Analysis did not succeed")
                        .with("file", &summary.name)
                        .with("media_type", summary.category)
                        .with("retryable", err.is_retryable())
                        .with("error", &err),
                )
                .await;
        }

        let state = session.state();
        self.log_port
            .log_event(
                &LogEvent::new(LogLevel::Info, "Analysis session finished")
                    .with("file", &summary.name)
                    .with("bytes", summary.size)
                    .with("state", state.name()),
            )
            .await;

        Ok(AnalyzeResponse {
            file: summary,
            state,
        })
    }
}

/// Request for the analyze use case
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub input_path: PathBuf,
    /// Declared category; inferred from the file name when absent
    pub media_type: Option<MediaCategory>,
}

impl AnalyzeRequest {
    /// Create new analyze request
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            media_type: None,
        }
    }

    /// Create new analyze request with a declared media type
    pub fn with_media_type(input_path: impl Into<PathBuf>, media_type: MediaCategory) -> Self {
        Self {
            input_path: input_path.into(),
            media_type: Some(media_type),
        }
    }
}

/// Response from the analyze use case
#[derive(Debug, Clone)]
pub struct AnalyzeResponse {
    pub file: FileSummary,
    pub state: SessionState,
}

impl AnalyzeResponse {
    pub fn success(&self) -> bool {
        self.state.result().is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.state.error()
    }
}
