//! Fixed-interval result polling with a bounded retry budget.
//!
//! Every request-level failure is transient: transport errors, HTTP error
//! statuses, and not-ready bodies all retry identically, without
//! distinguishing kinds. The budget is the only exit besides a successful
//! payload. No backoff growth.

use std::time::Duration;

use serde_json::Value;

use super::{CancelToken, RunnerConfig};
use crate::api::ExtractionBackend;
use crate::error::ExtractError;
use crate::result::RunId;

/// Polls the backend for a run's result until ready or out of budget.
pub struct ResultPoller {
    interval: Duration,
    max_failures: u32,
}

impl ResultPoller {
    pub fn new(interval: Duration, max_failures: u32) -> Self {
        Self {
            interval,
            max_failures,
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self::new(config.poll_interval, config.max_poll_failures)
    }

    /// Repeatedly request the result, sleeping the fixed interval before
    /// every request. Returns the first successful payload unchanged; fails
    /// with `Timeout` once more than `max_failures` requests have failed.
    pub async fn poll<B: ExtractionBackend>(
        &self,
        backend: &B,
        run_id: &RunId,
        cancel: &CancelToken,
    ) -> Result<Value, ExtractError> {
        let mut failures: u32 = 0;
        loop {
            tokio::time::sleep(self.interval).await;
            if cancel.is_cancelled() {
                return Err(ExtractError::Cancelled);
            }
            match backend.fetch_result(run_id).await {
                Ok(payload) => {
                    // A payload landing after cancel is a benign race; drop it.
                    if cancel.is_cancelled() {
                        return Err(ExtractError::Cancelled);
                    }
                    return Ok(payload);
                }
                Err(e) => {
                    failures += 1;
                    tracing::trace!(run_id = %run_id, failures, error = %e, "Result not ready, retrying");
                    if failures > self.max_failures {
                        tracing::warn!(run_id = %run_id, failures, "Poll budget exhausted");
                        return Err(ExtractError::Timeout);
                    }
                }
            }
        }
    }
}
