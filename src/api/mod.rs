//! Backend contracts consumed by the orchestration core.
//!
//! Two trait seams mirror the REST surface: `ExtractionBackend` for the
//! attempt flow (upload → trigger → result) and `ExtractionStore` for the
//! persisted-extraction list. `HttpBackend` implements both; tests
//! substitute in-memory doubles.

mod http;

pub use http::HttpBackend;

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BackendError;
use crate::result::RunId;

/// Export format accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    Json,
    Csv,
}

impl ResultFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Attempt-flow operations against the extraction backend.
///
/// Any error from `fetch_result` means "not ready yet" to the poller;
/// kinds are not distinguished there.
pub trait ExtractionBackend: Send + Sync {
    /// Submit a file for processing; returns the run identifier.
    fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<RunId, BackendError>> + Send;

    /// Start backend processing for a run. The status payload is opaque;
    /// only call success matters.
    fn start(&self, run_id: &RunId) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Fetch the extraction result as JSON.
    fn fetch_result(
        &self,
        run_id: &RunId,
    ) -> impl Future<Output = Result<Value, BackendError>> + Send;

    /// Export the extraction result as CSV text.
    fn export_csv(
        &self,
        run_id: &RunId,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;
}

/// A persisted extraction record as the backend serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredExtraction {
    pub id: i64,
    pub run_id: String,
    #[serde(default)]
    pub document_type: Option<String>,
    pub result_json: String,
    #[serde(default)]
    pub avg_confidence: Option<f64>,
    pub created_at: String,
}

/// Fields accepted when updating a persisted extraction record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionUpdate {
    pub document_type: Option<String>,
    pub run_id: String,
    pub result_json: String,
    pub avg_confidence: Option<f64>,
}

/// CRUD over the persisted-extraction list.
///
/// Durability lives behind this seam; the core never stores records itself.
/// Concurrent edits on the same record resolve last-write-wins.
pub trait ExtractionStore: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<StoredExtraction>, BackendError>> + Send;

    fn update(
        &self,
        id: i64,
        update: &ExtractionUpdate,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn delete_all(&self) -> impl Future<Output = Result<(), BackendError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_format_strings() {
        assert_eq!(ResultFormat::Json.as_str(), "json");
        assert_eq!(ResultFormat::Csv.as_str(), "csv");
        assert_eq!(serde_json::to_string(&ResultFormat::Csv).unwrap(), "\"csv\"");
    }

    #[test]
    fn stored_extraction_reads_camel_case_wire_format() {
        let json = r#"{
            "id": 7,
            "runId": "run-42",
            "documentType": "invoice",
            "resultJson": "{\"fields\":{}}",
            "avgConfidence": 0.93,
            "createdAt": "2026-08-01T10:00:00Z"
        }"#;
        let record: StoredExtraction = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.run_id, "run-42");
        assert_eq!(record.document_type.as_deref(), Some("invoice"));
        assert_eq!(record.avg_confidence, Some(0.93));
    }

    #[test]
    fn stored_extraction_tolerates_missing_optionals() {
        let json = r#"{
            "id": 1,
            "runId": "run-1",
            "resultJson": "{}",
            "createdAt": "2026-08-01T10:00:00Z"
        }"#;
        let record: StoredExtraction = serde_json::from_str(json).unwrap();
        assert!(record.document_type.is_none());
        assert!(record.avg_confidence.is_none());
    }

    #[test]
    fn extraction_update_serializes_camel_case() {
        let update = ExtractionUpdate {
            document_type: Some("invoice".into()),
            run_id: "run-42".into(),
            result_json: "{}".into(),
            avg_confidence: None,
        };
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"documentType\""));
        assert!(json.contains("\"resultJson\""));
        assert!(json.contains("\"runId\""));
    }
}
