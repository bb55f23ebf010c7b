// HTTP analysis adapter - Remote analysis service over reqwest

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::EndpointRules;
use crate::ports::*;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

const USER_AGENT: &str = concat!("verifylens-cli/", env!("CARGO_PKG_VERSION"));

/// Analysis service adapter speaking multipart HTTP
///
/// No timeout is configured: a hung request stays pending until the service
/// answers or the connection drops.
pub struct HttpAnalysisAdapter {
    http_client: Client,
    base_url: String,
}

impl HttpAnalysisAdapter {
    /// Create new adapter for the given base URL
    pub fn new(base_url: &str) -> Result<Self, DomainError> {
        let base_url = EndpointRules::normalize_base_url(base_url)?;
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DomainError::TransportFailure(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Build the multipart payload for a file
    fn build_form(file: &SelectedFile) -> Result<Form, DomainError> {
        let part = Part::stream_with_length(file.payload(), file.size() as u64)
            .file_name(file.name().to_string())
            .mime_str(file.category().mime_type())
            .map_err(|e| DomainError::BadArgs(format!("Invalid MIME type: {}", e)))?;

        Ok(Form::new().part(EndpointRules::FILE_FIELD, part))
    }

    /// Turn a response into a result, mapping non-success statuses
    async fn read_json(response: Response) -> Result<AnalysisResult, DomainError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::RemoteFailure {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.as_str().to_string()),
                detail: Self::error_detail(&body),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::TransportFailure(e.to_string()))?;

        AnalysisResult::from_slice(&body)
    }

    /// Extract the `detail` field of an error body, if any
    fn error_detail(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        match value.get("detail")? {
            serde_json::Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[async_trait]
impl AnalysisPort for HttpAnalysisAdapter {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, DomainError> {
        let url = EndpointRules::analyze_url(&self.base_url, file.category());
        let form = Self::build_form(file)?;

        tracing::debug!(
            url = %url,
            file = %file.name(),
            bytes = file.size(),
            "Uploading file for analysis"
        );

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::TransportFailure(e.to_string()))?;

        tracing::debug!(status = %response.status(), "Analysis service responded");

        Self::read_json(response).await
    }

    async fn service_info(&self) -> Result<AnalysisResult, DomainError> {
        let url = format!("{}/", self.base_url);
        tracing::debug!(url = %url, "Fetching service descriptor");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::TransportFailure(e.to_string()))?;

        Self::read_json(response).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
