//! HTTP client for the analysis API
//!
//! Posts the file as a multipart form with a single `file` part and decodes
//! the JSON answer as an opaque [`AnalysisPayload`]. Non-2xx answers surface
//! as `HTTP error! status: {code}`. There is no retry.

use super::upload::UploadFile;
use super::AnalysisApi;
use crate::config::{ApiConfig, SecretString};
use crate::domain::{AnalysisError, AnalysisPayload, Result, WhispError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Multipart field carrying the uploaded file
pub const FILE_FIELD: &str = "file";

/// reqwest-backed [`AnalysisApi`]
///
/// # Example
///
/// ```no_run
/// use whisp::adapters::analysis::{AnalysisApi, HttpAnalysisClient, UploadFile};
/// use whisp::config::ApiConfig;
///
/// # async fn example() -> whisp::domain::Result<()> {
/// let client = HttpAnalysisClient::new(&ApiConfig::default())?;
/// let file = UploadFile::from_path("plots.geojson")?;
/// let payload = client.analyze(&file).await?;
/// println!("{} features", payload.features().len());
/// # Ok(())
/// # }
/// ```
pub struct HttpAnalysisClient {
    client: Client,
    upload_url: String,
    api_key: Option<SecretString>,
}

impl HttpAnalysisClient {
    /// Build a client from API configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let client = builder
            .build()
            .map_err(|e| WhispError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            upload_url: config.upload_url(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisClient {
    async fn analyze(&self, file: &UploadFile) -> Result<AnalysisPayload> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.file_name().to_string())
            .mime_str(file.mime_type())
            .map_err(|e| AnalysisError::InvalidFile(e.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        let mut request = self.client.post(&self.upload_url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        tracing::debug!(
            url = %self.upload_url,
            file_name = %file.file_name(),
            bytes = file.len(),
            "Uploading file for analysis"
        );

        let response = request
            .send()
            .await
            .map_err(|e| AnalysisError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                body = %body,
                "Analysis API returned an error status"
            );
            return Err(AnalysisError::HttpStatus {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| AnalysisError::ConnectionFailed(e.to_string()))?;

        let payload = AnalysisPayload::from_json_str(&text)
            .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;

        Ok(payload)
    }
}
