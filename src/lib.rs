//! VerifyLens CLI Library
//!
//! Client side of the VerifyLens media verification service: an upload
//! session controller, the HTTP adapter for the analysis API, and terminal
//! rendering of the verdict.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod output;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use adapters::{HttpAnalysisAdapter, TomlConfigAdapter, TracingLogAdapter};
pub use app::{AnalyzeInteractor, AnalyzeRequest, AnalyzeResponse, InfoInteractor, UploadSession};
pub use domain::errors::DomainError;
pub use domain::model::{AnalysisResult, FileSummary, MediaCategory, OutputFormat, SelectedFile, SessionState};
pub use error::{VerifyLensError, VerifyLensResult};
pub use ports::AnalysisPort;
