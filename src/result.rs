//! Raw extraction results: run identity, page access, and the
//! empty-result classification.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque identifier for one extraction attempt.
///
/// Created once by the upload, flows unchanged through trigger and poll,
/// and is discarded when the attempt concludes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result payload returned by the backend, kept verbatim.
///
/// Either `{pages: [...]}` or a legacy single-page `{fields: ...}` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult(Value);

impl ExtractionResult {
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    pub fn payload(&self) -> &Value {
        &self.0
    }

    pub fn into_payload(self) -> Value {
        self.0
    }

    /// Whether the payload carries no content.
    ///
    /// Empty means null or a value with zero own keys: an empty object,
    /// array, or string. Numbers and booleans have no own keys and count
    /// as empty; `{"a": 0}` and `{"a": ""}` are non-empty.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::String(s) => s.is_empty(),
            Value::Bool(_) | Value::Number(_) => true,
        }
    }

    /// Declared document type, reading `document_type` then `documentType`.
    pub fn doc_type(&self) -> &str {
        self.0
            .get("document_type")
            .or_else(|| self.0.get("documentType"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Pages of the result.
    ///
    /// A document without a non-empty `pages` array falls back to its
    /// top-level `fields` mapping as one synthetic page numbered 1.
    pub fn pages(&self) -> Vec<PageView<'_>> {
        if let Some(pages) = self.0.get("pages").and_then(Value::as_array) {
            if !pages.is_empty() {
                return pages
                    .iter()
                    .map(|page| PageView {
                        number: page.get("page").and_then(Value::as_u64),
                        fields: page.get("fields").and_then(Value::as_object),
                    })
                    .collect();
            }
        }
        if let Some(fields) = self.0.get("fields").and_then(Value::as_object) {
            return vec![PageView {
                number: Some(1),
                fields: Some(fields),
            }];
        }
        Vec::new()
    }
}

/// Borrowed view of one result page.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    /// Declared page number, if any. Consumers fall back to 1-based position.
    pub number: Option<u64>,
    pub fields: Option<&'a Map<String, Value>>,
}
