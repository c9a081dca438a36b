//! Paced status narration for an extraction attempt.
//!
//! Append-only message log with fixed progress checkpoints. Each append
//! waits the pacing delay first, then pushes, then notifies the sink so a
//! consumer can scroll its log to the latest entry. Messages are never
//! reordered, deduplicated, or edited. Progress starts at zero and only
//! moves forward; a stale lower value is ignored.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AttemptPhase;

/// One narrated status line. Never edited or removed once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Notifications emitted alongside the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NarratorEvent {
    /// A message was appended; consumers scroll their log to the latest entry.
    MessageAppended { message: Message },
    /// The progress percentage advanced.
    ProgressChanged { percent: u8 },
    /// The attempt moved to a new phase.
    PhaseChanged { phase: AttemptPhase },
}

/// Per-attempt narration state: the message log and the progress value.
///
/// Owned exclusively by the attempt task; a fresh narrator is created for
/// every attempt, so narration from one attempt cannot leak into the next.
pub struct ProgressNarrator<'a> {
    messages: Vec<Message>,
    progress: u8,
    pacing: Duration,
    sink: Option<&'a (dyn Fn(NarratorEvent) + Send + Sync)>,
}

impl<'a> ProgressNarrator<'a> {
    pub fn new(
        pacing: Duration,
        sink: Option<&'a (dyn Fn(NarratorEvent) + Send + Sync)>,
    ) -> Self {
        Self {
            messages: Vec::new(),
            progress: 0,
            pacing,
            sink,
        }
    }

    /// Append a status message after the pacing delay.
    pub async fn say(&mut self, text: impl Into<String>) {
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
        let message = Message {
            id: Uuid::new_v4(),
            text: text.into(),
            timestamp: Utc::now(),
        };
        self.messages.push(message.clone());
        self.emit(NarratorEvent::MessageAppended { message });
    }

    /// Advance the progress percentage. Values at or below the current one
    /// are ignored, keeping the sequence monotonically increasing.
    pub fn set_progress(&mut self, percent: u8) {
        if percent <= self.progress {
            return;
        }
        self.progress = percent;
        self.emit(NarratorEvent::ProgressChanged { percent });
    }

    pub fn phase_changed(&self, phase: AttemptPhase) {
        self.emit(NarratorEvent::PhaseChanged { phase });
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    fn emit(&self, event: NarratorEvent) {
        if let Some(sink) = self.sink {
            sink(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test(start_paused = true)]
    async fn messages_append_in_order_with_unique_ids() {
        let mut narrator = ProgressNarrator::new(Duration::from_millis(400), None);
        narrator.say("first").await;
        narrator.say("second").await;
        narrator.say("third").await;

        let texts: Vec<&str> = narrator.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_ne!(narrator.messages()[0].id, narrator.messages()[1].id);
    }

    #[tokio::test(start_paused = true)]
    async fn pacing_delay_runs_before_every_append() {
        let mut narrator = ProgressNarrator::new(Duration::from_millis(400), None);
        let started = tokio::time::Instant::now();
        narrator.say("one").await;
        narrator.say("two").await;
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_pacing_skips_the_delay() {
        let mut narrator = ProgressNarrator::new(Duration::ZERO, None);
        let started = tokio::time::Instant::now();
        narrator.say("fast").await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[test]
    fn progress_is_monotonic() {
        let mut narrator = ProgressNarrator::new(Duration::ZERO, None);
        narrator.set_progress(40);
        narrator.set_progress(20);
        assert_eq!(narrator.progress(), 40);
        narrator.set_progress(60);
        assert_eq!(narrator.progress(), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn sink_sees_appends_and_progress_in_order() {
        let events: Mutex<Vec<NarratorEvent>> = Mutex::new(Vec::new());
        let sink = |event: NarratorEvent| events.lock().unwrap().push(event);

        let mut narrator = ProgressNarrator::new(Duration::ZERO, Some(&sink));
        narrator.say("uploading").await;
        narrator.set_progress(10);
        narrator.set_progress(10); // ignored: not an advance

        let events = events.into_inner().unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            NarratorEvent::MessageAppended { message } if message.text == "uploading"
        ));
        assert!(matches!(events[1], NarratorEvent::ProgressChanged { percent: 10 }));
    }

    #[test]
    fn phase_change_reaches_the_sink() {
        let events: Mutex<Vec<NarratorEvent>> = Mutex::new(Vec::new());
        let sink = |event: NarratorEvent| events.lock().unwrap().push(event);

        let narrator = ProgressNarrator::new(Duration::ZERO, Some(&sink));
        narrator.phase_changed(AttemptPhase::Polling);

        let events = events.into_inner().unwrap();
        assert!(matches!(
            events[0],
            NarratorEvent::PhaseChanged { phase: AttemptPhase::Polling }
        ));
    }
}
