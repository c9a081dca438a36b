//! HTTP implementation of the backend contracts.

use reqwest::multipart;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ExtractionBackend, ExtractionStore, ExtractionUpdate, ResultFormat, StoredExtraction};
use crate::error::BackendError;
use crate::result::RunId;

/// Client for the extraction REST backend.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Default local backend at localhost:8080 with a 30-second timeout.
    pub fn default_local() -> Self {
        Self::new("http://localhost:8080", 30)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_request_err(&self, e: reqwest::Error) -> BackendError {
        if e.is_connect() {
            BackendError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            BackendError::RequestTimeout(self.timeout_secs)
        } else {
            BackendError::HttpClient(e.to_string())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn export(
        &self,
        run_id: &RunId,
        format: ResultFormat,
    ) -> Result<reqwest::Response, BackendError> {
        let url = format!("{}/v1/exports", self.base_url);
        let body = ExportRequest {
            run_id: run_id.as_str(),
            format: format.as_str(),
        };
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_request_err(e))?;
        Self::check_status(response).await
    }
}

/// Response body from `POST /v1/uploads`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    run_id: String,
}

/// Request body for `POST /v1/exports`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRequest<'a> {
    run_id: &'a str,
    format: &'a str,
}

impl ExtractionBackend for HttpBackend {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<RunId, BackendError> {
        let url = format!("{}/v1/uploads", self.base_url);
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_request_err(e))?;
        let response = Self::check_status(response).await?;

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))?;
        Ok(RunId::new(parsed.run_id))
    }

    async fn start(&self, run_id: &RunId) -> Result<(), BackendError> {
        let url = format!("{}/v1/runs/{run_id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_request_err(e))?;
        // Status payload is opaque; call success is all that matters.
        Self::check_status(response).await?;
        Ok(())
    }

    async fn fetch_result(&self, run_id: &RunId) -> Result<Value, BackendError> {
        let response = self.export(run_id, ResultFormat::Json).await?;
        response
            .json()
            .await
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))
    }

    async fn export_csv(&self, run_id: &RunId) -> Result<String, BackendError> {
        let response = self.export(run_id, ResultFormat::Csv).await?;
        response
            .text()
            .await
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))
    }
}

impl ExtractionStore for HttpBackend {
    async fn list(&self) -> Result<Vec<StoredExtraction>, BackendError> {
        let url = format!("{}/v1/extractions", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_request_err(e))?;
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))
    }

    async fn update(&self, id: i64, update: &ExtractionUpdate) -> Result<(), BackendError> {
        let url = format!("{}/v1/extractions/{id}", self.base_url);
        let response = self
            .client
            .put(&url)
            .json(update)
            .send()
            .await
            .map_err(|e| self.map_request_err(e))?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), BackendError> {
        let url = format!("{}/v1/extractions/{id}", self.base_url);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| self.map_request_err(e))?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), BackendError> {
        let url = format!("{}/v1/extractions", self.base_url);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| self.map_request_err(e))?;
        Self::check_status(response).await?;
        Ok(())
    }
}
