//! Whole-flow extraction orchestration.
//!
//! Mirrors the attempt lifecycle end to end: upload the file, trigger
//! processing, poll until the result is ready, classify the outcome, and
//! record exactly one history entry per terminal attempt that reached the
//! backend. All narration flows through the per-attempt narrator; no error
//! crosses the attempt boundary uncaught.

use std::path::Path;

use super::history::{AttemptStatus, HistoryLog};
use super::narrator::{Message, NarratorEvent, ProgressNarrator};
use super::poller::ResultPoller;
use super::{AttemptPhase, CancelToken, RunnerConfig};
use crate::api::ExtractionBackend;
use crate::error::{BackendError, ExtractError};
use crate::result::{ExtractionResult, RunId};

/// How an attempt ended.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The backend returned a non-empty result.
    Success(ExtractionResult),
    /// The poll succeeded but the payload carried no content.
    EmptyFailure,
    /// Upload, trigger, or the poll budget failed.
    Error(ExtractError),
    /// Cancelled locally before a terminal outcome.
    Cancelled,
}

/// Everything one attempt produced, returned once the task settles back
/// to idle.
#[derive(Debug)]
pub struct AttemptReport {
    pub run_id: Option<RunId>,
    pub outcome: AttemptOutcome,
    pub messages: Vec<Message>,
}

/// Drives extraction attempts against a backend, one at a time.
///
/// `run` borrows the runner mutably for the whole attempt, so attempts are
/// serialized by construction: shared narration or result state from one
/// attempt cannot be overwritten by another. Each attempt gets a fresh
/// narrator; only the history log persists across attempts.
pub struct ExtractionRunner<B: ExtractionBackend> {
    backend: B,
    config: RunnerConfig,
    history: HistoryLog,
}

impl<B: ExtractionBackend> ExtractionRunner<B> {
    pub fn new(backend: B, config: RunnerConfig) -> Self {
        Self {
            backend,
            config,
            history: HistoryLog::new(),
        }
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one extraction attempt from a file on disk.
    pub async fn run_file(
        &mut self,
        path: &Path,
        sink: Option<&(dyn Fn(NarratorEvent) + Send + Sync)>,
        cancel: &CancelToken,
    ) -> AttemptReport {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let file_name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("upload.bin");
                self.run(file_name, bytes, sink, cancel).await
            }
            Err(e) => {
                let e = ExtractError::Backend(BackendError::UploadSource(format!(
                    "{}: {e}",
                    path.display()
                )));
                let mut narrator = ProgressNarrator::new(self.config.message_pacing, sink);
                narrator.say(format!("Error: {e}")).await;
                narrator.phase_changed(AttemptPhase::Idle);
                AttemptReport {
                    run_id: None,
                    outcome: AttemptOutcome::Error(e),
                    messages: narrator.into_messages(),
                }
            }
        }
    }

    /// Run one extraction attempt from in-memory file bytes.
    pub async fn run(
        &mut self,
        file_name: &str,
        bytes: Vec<u8>,
        sink: Option<&(dyn Fn(NarratorEvent) + Send + Sync)>,
        cancel: &CancelToken,
    ) -> AttemptReport {
        let mut narrator = ProgressNarrator::new(self.config.message_pacing, sink);
        let mut run_id: Option<RunId> = None;

        let outcome = match self
            .attempt(file_name, bytes, &mut narrator, &mut run_id, cancel)
            .await
        {
            Ok(outcome) => outcome,
            Err(ExtractError::Cancelled) => {
                tracing::debug!("Extraction attempt cancelled");
                AttemptOutcome::Cancelled
            }
            Err(e) => {
                narrator.phase_changed(AttemptPhase::Error);
                narrator.say(format!("Error: {e}")).await;
                if let Some(id) = &run_id {
                    self.history.record(id.clone(), AttemptStatus::Failed);
                }
                tracing::warn!(error = %e, "Extraction attempt failed");
                AttemptOutcome::Error(e)
            }
        };

        narrator.phase_changed(AttemptPhase::Idle);
        AttemptReport {
            run_id,
            outcome,
            messages: narrator.into_messages(),
        }
    }

    async fn attempt(
        &mut self,
        file_name: &str,
        bytes: Vec<u8>,
        narrator: &mut ProgressNarrator<'_>,
        run_id_slot: &mut Option<RunId>,
        cancel: &CancelToken,
    ) -> Result<AttemptOutcome, ExtractError> {
        narrator.phase_changed(AttemptPhase::Uploading);
        narrator.say("Image upload started...").await;
        narrator.set_progress(10);

        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }
        let run_id = self.backend.upload(file_name, bytes).await?;
        tracing::info!(run_id = %run_id, "Upload accepted");
        *run_id_slot = Some(run_id.clone());
        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }

        narrator.say("Image upload completed.").await;
        narrator.set_progress(20);
        narrator.say(format!("Run ID: {run_id}")).await;
        narrator.set_progress(30);

        narrator.phase_changed(AttemptPhase::Triggering);
        narrator.say("Extraction started...").await;
        narrator.set_progress(40);

        self.backend.start(&run_id).await?;
        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }

        narrator.phase_changed(AttemptPhase::Polling);
        narrator.say("Processing...").await;
        narrator.set_progress(60);

        let poller = ResultPoller::from_config(&self.config);
        let payload = poller.poll(&self.backend, &run_id, cancel).await?;

        narrator.say("Generating response...").await;
        narrator.set_progress(80);
        if !self.config.settle_delay.is_zero() {
            tokio::time::sleep(self.config.settle_delay).await;
        }
        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }

        let result = ExtractionResult::new(payload);
        if result.is_empty() {
            narrator.phase_changed(AttemptPhase::EmptyFailure);
            narrator.say("Extraction failed: No valid data found.").await;
            self.history.record(run_id.clone(), AttemptStatus::Failed);
            narrator.set_progress(100);
            tracing::info!(run_id = %run_id, "Extraction finished with empty result");
            Ok(AttemptOutcome::EmptyFailure)
        } else {
            narrator.phase_changed(AttemptPhase::Success);
            narrator.say("Extraction completed!").await;
            self.history.record(run_id.clone(), AttemptStatus::Completed);
            narrator.set_progress(100);
            tracing::info!(run_id = %run_id, "Extraction completed");
            Ok(AttemptOutcome::Success(result))
        }
    }
}
