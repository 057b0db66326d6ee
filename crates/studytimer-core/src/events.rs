use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every accepted state change produces an Event.
/// Rejected commands produce none, so callers can tell the two apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    DurationChanged {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        remaining_secs: u64,
    },
    /// Countdown reached zero on its own.
    TimerCompleted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Session closed by the user. `weekday` is set only when minutes
    /// were written to the ledger.
    SessionFinished {
        elapsed_secs: u64,
        elapsed_min: u64,
        weekday: Option<String>,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        session_started: bool,
        duration_secs: u64,
        remaining_secs: u64,
        display: String,
        progress: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name of the event, as it appears in the `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Event::DurationChanged { .. } => "duration_changed",
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerResumed { .. } => "timer_resumed",
            Event::TimerTicked { .. } => "timer_ticked",
            Event::TimerCompleted { .. } => "timer_completed",
            Event::TimerReset { .. } => "timer_reset",
            Event::SessionFinished { .. } => "session_finished",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_matches_serde_tag() {
        let ev = Event::TimerPaused {
            remaining_secs: 10,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], ev.name());
    }
}
