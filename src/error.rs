//! Error taxonomy for the extraction client.
//!
//! `BackendError` covers transport-level failures. The poller treats every
//! one of them as "not ready yet"; only the orchestrator turns them into
//! terminal `ExtractError` outcomes.

use thiserror::Error;

/// Transport-level failure talking to the extraction backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Cannot connect to extraction backend at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    RequestTimeout(u64),

    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response parsing failed: {0}")]
    ResponseParsing(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Cannot read upload source: {0}")]
    UploadSource(String),
}

/// Terminal outcome of an extraction attempt or a stored-record edit.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Retry budget exhausted while polling for a result.
    #[error("Timeout waiting for result")]
    Timeout,

    /// The poll succeeded but the payload carries no content.
    #[error("Extraction produced no data")]
    EmptyResult,

    /// Upload or trigger failed before polling started.
    #[error("Backend request failed: {0}")]
    Backend(#[from] BackendError),

    /// The edit buffer holds invalid JSON. The buffer itself is untouched.
    #[error("Invalid JSON in result field: {0}")]
    MalformedEditBuffer(String),

    /// The attempt was cancelled locally. Not a terminal outcome: no
    /// narration, no history entry.
    #[error("Extraction cancelled")]
    Cancelled,
}
