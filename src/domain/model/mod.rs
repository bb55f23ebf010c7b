// Domain models - Core types and data structures

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::DomainError;


/// Declared media category of a selected file
///
/// The category picks the analysis endpoint; it is never checked against the
/// actual file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Video,
    Audio,
    Text,
}

impl MediaCategory {
    /// Parse category from string
    pub fn parse(category_str: &str) -> Result<Self, DomainError> {
        match category_str.trim().to_lowercase().as_str() {
            "video" => Ok(MediaCategory::Video),
            "audio" => Ok(MediaCategory::Audio),
            "text" => Ok(MediaCategory::Text),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid media type: {}. Valid types: video, audio, text",
                category_str
            ))),
        }
    }

    /// Path segment used by the `/analyze/{category}` endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Video => "video",
            MediaCategory::Audio => "audio",
            MediaCategory::Text => "text",
        }
    }

    /// MIME type the service expects for this category
    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaCategory::Video => "video/mp4",
            MediaCategory::Audio => "audio/mpeg",
            MediaCategory::Text => "text/plain",
        }
    }

    /// Infer a category from a file name extension
    pub fn from_file_name(file_name: &str) -> Self {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "mp4" | "mov" | "mkv" | "webm" | "avi" => MediaCategory::Video,
            "mp3" | "wav" | "m4a" | "ogg" | "flac" => MediaCategory::Audio,
            _ => MediaCategory::Text,
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file chosen for analysis
///
/// Replaced wholesale on every selection, never mutated in place.
#[derive(Clone, PartialEq)]
pub struct SelectedFile {
    name: String,
    bytes: Bytes,
    category: MediaCategory,
}

impl SelectedFile {
    /// Create a selected file from in-memory contents
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>, category: MediaCategory) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            category,
        }
    }

    /// Read a file from disk, inferring the category from its extension when
    /// none is declared
    pub async fn from_path(
        path: impl AsRef<Path>,
        declared: Option<MediaCategory>,
    ) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| DomainError::BadArgs(format!("Not a file path: {}", path.display())))?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to read {}: {}", path.display(), e)))?;

        let category = declared.unwrap_or_else(|| MediaCategory::from_file_name(&name));
        Ok(Self::new(name, bytes, category))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the contents; cloning does not copy the file
    pub fn payload(&self) -> Bytes {
        self.bytes.clone()
    }

    pub fn category(&self) -> MediaCategory {
        self.category
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Name and category without the payload
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            name: self.name.clone(),
            category: self.category,
            size: self.bytes.len(),
        }
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .field("category", &self.category)
            .finish()
    }
}

/// Payload-free description of a selected file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub category: MediaCategory,
    pub size: usize,
}

/// JSON document returned by the analysis service, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(Value);

impl AnalysisResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a response body; any JSON shape is accepted
    pub fn from_slice(body: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(body)
            .map(Self)
            .map_err(|e| DomainError::MalformedResponse(e.to_string()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Top-level entries: object keys, array indices, or a single `value`
    /// entry for scalars
    pub fn entries(&self) -> Vec<(String, &Value)> {
        match &self.0 {
            Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            scalar => vec![("value".to_string(), scalar)],
        }
    }

    /// Pretty-printed JSON document
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl From<Value> for AnalysisResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Lifecycle state of one upload session
///
/// Result and error live inside the variants, so they can never both be set.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(AnalysisResult),
    Failed(String),
}

impl SessionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SessionState::Submitting)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            SessionState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether a submission has resolved into a result or an error
    pub fn is_resolved(&self) -> bool {
        matches!(self, SessionState::Succeeded(_) | SessionState::Failed(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Submitting => "submitting",
            SessionState::Succeeded(_) => "succeeded",
            SessionState::Failed(_) => "failed",
        }
    }
}

/// Rendering format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn parse(format_str: &str) -> Result<Self, DomainError> {
        match format_str.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid output format: {}. Valid formats: text, json, yaml",
                format_str
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}
