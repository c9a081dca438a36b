//! Extraction attempt orchestration.
//!
//! One cooperative task per attempt: upload → trigger → poll → classify.
//! Suspension happens only at network calls and pacing delays. The runner
//! borrows itself mutably for the whole attempt, so attempts on one runner
//! are serialized by construction; a `CancelToken` abandons the current
//! attempt at its next suspension point.

pub mod history;
pub mod narrator;
pub mod poller;
pub mod runner;

pub use history::{AttemptStatus, HistoryEntry, HistoryLog};
pub use narrator::{Message, NarratorEvent, ProgressNarrator};
pub use poller::ResultPoller;
pub use runner::{AttemptOutcome, AttemptReport, ExtractionRunner};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing and budget knobs for one extraction attempt.
///
/// Defaults are the production constants; tests shrink them so retry and
/// timeout behavior stays observable without wall-clock delay.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Fixed delay before every result poll.
    pub poll_interval: Duration,
    /// Failed polls tolerated before the attempt times out.
    pub max_poll_failures: u32,
    /// Minimum delay before each narrated message.
    pub message_pacing: Duration,
    /// Settle delay after the backend reports a result, before classification.
    pub settle_delay: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1400),
            max_poll_failures: 100,
            message_pacing: Duration::from_millis(400),
            settle_delay: Duration::from_millis(1200),
        }
    }
}

/// Phases of the whole-flow state machine:
/// `Idle → Uploading → Triggering → Polling → terminal → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptPhase {
    Idle,
    Uploading,
    Triggering,
    Polling,
    Success,
    EmptyFailure,
    Error,
}

impl AttemptPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Uploading => "uploading",
            Self::Triggering => "triggering",
            Self::Polling => "polling",
            Self::Success => "success",
            Self::EmptyFailure => "empty_failure",
            Self::Error => "error",
        }
    }
}

/// Cooperative cancellation flag shared with the attempt task.
///
/// Cancelling cannot abort an already-issued network request; the attempt
/// observes the flag at its next suspension point and discards any late
/// payload as a benign race.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_production_constants() {
        let config = RunnerConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(1400));
        assert_eq!(config.max_poll_failures, 100);
        assert_eq!(config.message_pacing, Duration::from_millis(400));
        assert_eq!(config.settle_delay, Duration::from_millis(1200));
    }

    #[test]
    fn cancel_token_sets_shared_flag() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn phase_serde_uses_snake_case() {
        let json = serde_json::to_string(&AttemptPhase::EmptyFailure).unwrap();
        assert_eq!(json, "\"empty_failure\"");
        assert_eq!(AttemptPhase::EmptyFailure.as_str(), "empty_failure");
    }
}
