//! Countdown session state machine.
//!
//! The session does not own a clock or a thread. One call to `tick()` is one
//! elapsed second; the caller (usually [`crate::SessionController`]) decides
//! when ticks happen.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |          |
//!            v          v
//!        Finished --> Idle   (reset / finish)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = TimerSession::new();
//! session.start();
//! session.tick(); // Returns Some(Event::TimerCompleted) on the last second
//! session.finish(&mut ledger, Weekday::Mon);
//! ```

use chrono::{Utc, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::presets::{default_preset, find_preset, CustomDuration, Preset, PRESETS};
use crate::events::Event;
use crate::ledger::{weekday_name, StudyLedger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// Countdown hit zero. Waits for finish or reset.
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSession {
    state: TimerState,
    /// Duration picked before the session started, in seconds.
    duration_secs: u64,
    remaining_secs: u64,
    session_started: bool,
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerSession {
    /// Create an idle session using the first preset.
    pub fn new() -> Self {
        Self::with_preset(default_preset())
    }

    pub fn with_preset(preset: Preset) -> Self {
        Self::with_duration(preset.duration_secs)
    }

    pub fn with_duration(duration_secs: u64) -> Self {
        Self {
            state: TimerState::Idle,
            duration_secs,
            remaining_secs: duration_secs,
            session_started: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// True from `start()` until the session is reset or finished.
    pub fn session_started(&self) -> bool {
        self.session_started
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.duration_secs.saturating_sub(self.remaining_secs)
    }

    /// Whether `finish()` would be accepted right now.
    pub fn can_finish(&self) -> bool {
        self.session_started && matches!(self.state, TimerState::Paused | TimerState::Finished)
    }

    /// Preset whose duration matches the current one, if the session is
    /// idle. Used to highlight the active quick-select option.
    pub fn active_preset(&self) -> Option<Preset> {
        if self.session_started {
            return None;
        }
        PRESETS
            .iter()
            .copied()
            .find(|p| p.duration_secs == self.duration_secs)
    }

    /// 0.0 .. 1.0 progress through the countdown.
    pub fn progress(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.elapsed_secs() as f64 / self.duration_secs as f64
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format_remaining(self.remaining_secs)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            session_started: self.session_started,
            duration_secs: self.duration_secs,
            remaining_secs: self.remaining_secs,
            display: self.display(),
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set the duration in seconds. Only accepted while idle.
    pub fn set_preset(&mut self, duration_secs: u64) -> Option<Event> {
        if self.state != TimerState::Idle || duration_secs == 0 {
            debug!(state = ?self.state, duration_secs, "duration change rejected");
            return None;
        }
        self.duration_secs = duration_secs;
        self.remaining_secs = duration_secs;
        debug!(duration_secs, "duration set");
        Some(Event::DurationChanged {
            duration_secs,
            at: Utc::now(),
        })
    }

    /// Select a preset by label. Unknown labels are ignored.
    pub fn select_preset(&mut self, label: &str) -> Option<Event> {
        let preset = find_preset(label).ok()?;
        self.set_preset(preset.duration_secs)
    }

    /// Set the duration from free-form minute input.
    ///
    /// Empty, non-numeric and non-positive input leaves the session untouched.
    pub fn set_custom(&mut self, minutes: &str) -> Option<Event> {
        match CustomDuration::parse(minutes) {
            Ok(custom) => self.set_preset(custom.duration_secs()),
            Err(e) => {
                debug!(input = minutes, error = %e, "custom duration rejected");
                None
            }
        }
    }

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                if self.remaining_secs == 0 {
                    return None;
                }
                self.state = TimerState::Running;
                self.session_started = true;
                debug!(duration_secs = self.duration_secs, "session started");
                Some(Event::TimerStarted {
                    duration_secs: self.duration_secs,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                debug!(remaining_secs = self.remaining_secs, "session resumed");
                Some(Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            // Already running, or nothing left to count.
            TimerState::Running | TimerState::Finished => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        debug!(remaining_secs = self.remaining_secs, "session paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance one second. Ignored unless running.
    ///
    /// Returns `TimerCompleted` on the second that reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Finished;
            debug!(duration_secs = self.duration_secs, "countdown completed");
            return Some(Event::TimerCompleted {
                duration_secs: self.duration_secs,
                at: Utc::now(),
            });
        }
        Some(Event::TimerTicked {
            remaining_secs: self.remaining_secs,
        })
    }

    /// Return to idle with the full duration. The ledger is not touched.
    pub fn reset(&mut self) -> Option<Event> {
        if self.state == TimerState::Idle {
            return None;
        }
        self.clear();
        Some(Event::TimerReset {
            duration_secs: self.duration_secs,
            at: Utc::now(),
        })
    }

    /// Close a paused or completed session and report the elapsed minutes.
    ///
    /// Minutes are written to `ledger` under `today` only when they round to
    /// at least one. The session is reset either way.
    pub fn finish<L>(&mut self, ledger: &mut L, today: Weekday) -> Option<Event>
    where
        L: StudyLedger + ?Sized,
    {
        if !self.can_finish() {
            debug!(state = ?self.state, "finish rejected");
            return None;
        }
        let elapsed_secs = self.elapsed_secs();
        let elapsed_min = elapsed_minutes(elapsed_secs);
        let weekday = if elapsed_min > 0 {
            ledger.add_minutes(today, elapsed_min);
            Some(weekday_name(today).to_string())
        } else {
            None
        };
        debug!(elapsed_secs, elapsed_min, "session finished");
        self.clear();
        Some(Event::SessionFinished {
            elapsed_secs,
            elapsed_min,
            weekday,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn clear(&mut self) {
        self.state = TimerState::Idle;
        self.remaining_secs = self.duration_secs;
        self.session_started = false;
    }
}

/// Whole minutes in `elapsed_secs`, rounding half away from zero.
pub fn elapsed_minutes(elapsed_secs: u64) -> u64 {
    elapsed_secs / 60 + u64::from(elapsed_secs % 60 >= 30)
}

/// Zero-padded `MM:SS`. Minutes grow past two digits for long sessions.
pub fn format_remaining(remaining_secs: u64) -> String {
    if remaining_secs == 0 {
        return "00:00".to_string();
    }
    format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::WeeklyLedger;

    #[test]
    fn new_session_uses_first_preset() {
        let session = TimerSession::new();
        assert_eq!(session.state(), TimerState::Idle);
        assert_eq!(session.duration_secs(), 900);
        assert_eq!(session.remaining_secs(), 900);
        assert!(!session.session_started());
        assert_eq!(session.active_preset().map(|p| p.label), Some("15 mins"));
    }

    #[test]
    fn start_pause_resume() {
        let mut session = TimerSession::new();
        assert!(session.start().is_some());
        assert_eq!(session.state(), TimerState::Running);

        assert!(session.pause().is_some());
        assert_eq!(session.state(), TimerState::Paused);

        assert!(matches!(session.start(), Some(Event::TimerResumed { .. })));
        assert_eq!(session.state(), TimerState::Running);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut session = TimerSession::new();
        session.start();
        assert!(session.start().is_none());
    }

    #[test]
    fn tick_ignored_unless_running() {
        let mut session = TimerSession::with_duration(10);
        assert!(session.tick().is_none());
        session.start();
        session.pause();
        assert!(session.tick().is_none());
        assert_eq!(session.remaining_secs(), 10);
    }

    #[test]
    fn duration_locked_after_start() {
        let mut session = TimerSession::new();
        session.start();
        assert!(session.set_preset(1800).is_none());
        assert!(session.set_custom("10").is_none());
        assert!(session.select_preset("1 hour").is_none());
        assert_eq!(session.duration_secs(), 900);
        assert!(session.active_preset().is_none());
    }

    #[test]
    fn select_preset_by_label() {
        let mut session = TimerSession::new();
        assert!(session.select_preset("2 hours").is_some());
        assert_eq!(session.remaining_secs(), 7200);
        assert!(session.select_preset("3 hours").is_none());
        assert_eq!(session.remaining_secs(), 7200);
    }

    #[test]
    fn finish_rejected_while_idle_or_running() {
        let mut ledger = WeeklyLedger::new();
        let mut session = TimerSession::new();
        assert!(session.finish(&mut ledger, Weekday::Mon).is_none());
        session.start();
        session.tick();
        assert!(session.finish(&mut ledger, Weekday::Mon).is_none());
        assert_eq!(session.state(), TimerState::Running);
        assert_eq!(ledger.total_minutes(), 0);
    }

    #[test]
    fn finish_after_completion_reports_full_duration() {
        let mut ledger = WeeklyLedger::new();
        let mut session = TimerSession::with_duration(120);
        session.start();
        for _ in 0..120 {
            session.tick();
        }
        assert_eq!(session.state(), TimerState::Finished);
        match session.finish(&mut ledger, Weekday::Fri) {
            Some(Event::SessionFinished {
                elapsed_secs,
                elapsed_min,
                weekday,
                ..
            }) => {
                assert_eq!(elapsed_secs, 120);
                assert_eq!(elapsed_min, 2);
                assert_eq!(weekday.as_deref(), Some("Friday"));
            }
            other => panic!("Expected SessionFinished, got {other:?}"),
        }
        assert_eq!(ledger.minutes(Weekday::Fri), 2);
        assert_eq!(session.state(), TimerState::Idle);
        assert_eq!(session.remaining_secs(), 120);
    }

    #[test]
    fn start_rejected_after_completion() {
        let mut session = TimerSession::with_duration(1);
        session.start();
        assert!(matches!(session.tick(), Some(Event::TimerCompleted { .. })));
        assert!(session.start().is_none());
        assert!(session.tick().is_none());
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn zero_duration_cannot_start() {
        let mut session = TimerSession::with_duration(0);
        assert!(session.start().is_none());
        assert_eq!(session.state(), TimerState::Idle);
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn elapsed_minutes_rounds_half_up() {
        assert_eq!(elapsed_minutes(0), 0);
        assert_eq!(elapsed_minutes(29), 0);
        assert_eq!(elapsed_minutes(30), 1);
        assert_eq!(elapsed_minutes(89), 1);
        assert_eq!(elapsed_minutes(90), 2);
        assert_eq!(elapsed_minutes(125), 2);
    }

    #[test]
    fn format_pads_both_fields() {
        assert_eq!(format_remaining(65), "01:05");
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(900), "15:00");
        assert_eq!(format_remaining(7200), "120:00");
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let mut session = TimerSession::with_duration(100);
        session.start();
        for _ in 0..25 {
            session.tick();
        }
        match session.snapshot() {
            Event::StateSnapshot {
                state,
                remaining_secs,
                display,
                progress,
                session_started,
                ..
            } => {
                assert_eq!(state, TimerState::Running);
                assert_eq!(remaining_secs, 75);
                assert_eq!(display, "01:15");
                assert!((progress - 0.25).abs() < f64::EPSILON);
                assert!(session_started);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
