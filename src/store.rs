//! Editing persisted extraction records.
//!
//! A record opens into an `EditBuffer` whose result field holds the JSON
//! as editable text. Saving validates the text first; invalid JSON fails
//! the save, leaves the buffer untouched, and never reaches the store.

use serde_json::Value;

use crate::api::{ExtractionStore, ExtractionUpdate, StoredExtraction};
use crate::error::ExtractError;

/// Mutable working copy of one persisted extraction record.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    pub document_type: String,
    pub run_id: String,
    pub avg_confidence: Option<f64>,
    /// Result JSON as editable text. Pretty-printed on open when parseable.
    pub result_json: String,
}

impl EditBuffer {
    /// Open a record for editing. A parseable result field is re-rendered
    /// pretty-printed; otherwise the stored text is kept verbatim so the
    /// user can see and fix it.
    pub fn open(record: &StoredExtraction) -> Self {
        let result_json = match serde_json::from_str::<Value>(&record.result_json) {
            Ok(value) => serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| record.result_json.clone()),
            Err(_) => record.result_json.clone(),
        };
        Self {
            document_type: record.document_type.clone().unwrap_or_default(),
            run_id: record.run_id.clone(),
            avg_confidence: record.avg_confidence,
            result_json,
        }
    }

    /// Parse the edited result text, failing without side effects when it
    /// is not valid JSON.
    pub fn validate(&self) -> Result<Value, ExtractError> {
        serde_json::from_str(&self.result_json)
            .map_err(|e| ExtractError::MalformedEditBuffer(e.to_string()))
    }

    fn to_update(&self) -> ExtractionUpdate {
        ExtractionUpdate {
            document_type: if self.document_type.is_empty() {
                None
            } else {
                Some(self.document_type.clone())
            },
            run_id: self.run_id.clone(),
            result_json: self.result_json.clone(),
            avg_confidence: self.avg_confidence,
        }
    }
}

/// Validate the buffer and persist it. Returns the parsed result value on
/// success; on validation failure the store is never called.
pub async fn save_edit<S: ExtractionStore>(
    store: &S,
    id: i64,
    buffer: &EditBuffer,
) -> Result<Value, ExtractError> {
    let parsed = buffer.validate()?;
    store.update(id, &buffer.to_update()).await?;
    tracing::info!(id, run_id = %buffer.run_id, "Extraction record updated");
    Ok(parsed)
}
