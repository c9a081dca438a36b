//! Client-side orchestration for a document extraction backend.
//!
//! Drives the whole extraction flow against a remote service: upload a
//! document, trigger processing, poll until the result is ready, narrate
//! progress along the way, and render the nested result payload as a flat
//! table. Persisted extraction records can be listed, edited, and deleted
//! through the same backend.
//!
//! ```text
//!   file ──▶ ExtractionRunner ──▶ ExtractionBackend (HTTP)
//!               │    upload → trigger → poll → classify
//!               ├──▶ ProgressNarrator (messages, progress, phases)
//!               ├──▶ HistoryLog (terminal attempts, newest first)
//!               └──▶ ExtractionResult ──▶ project_table ──▶ DocumentTable
//! ```
//!
//! The orchestration core is transport-agnostic: `ExtractionBackend` and
//! `ExtractionStore` are the only seams to the outside, and `HttpBackend`
//! is their production implementation.

pub mod api;
pub mod error;
pub mod orchestrator;
pub mod result;
pub mod store;
pub mod table;

pub use api::{
    ExtractionBackend, ExtractionStore, ExtractionUpdate, HttpBackend, ResultFormat,
    StoredExtraction,
};
pub use error::{BackendError, ExtractError};
pub use orchestrator::{
    AttemptOutcome, AttemptPhase, AttemptReport, AttemptStatus, CancelToken, ExtractionRunner,
    HistoryEntry, HistoryLog, Message, NarratorEvent, ProgressNarrator, ResultPoller, RunnerConfig,
};
pub use result::{ExtractionResult, PageView, RunId};
pub use store::{save_edit, EditBuffer};
pub use table::{project_table, DocumentTable, TableRow};
