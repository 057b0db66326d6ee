//! Session controller: a [`TimerSession`] plus the resources it needs.
//!
//! The controller holds a [`TickHandle`] exactly while the session is
//! running. Every command that moves the session out of `Running` drops
//! the handle before returning.

use std::time::Duration;

use tracing::debug;

use crate::clock::Clock;
use crate::events::Event;
use crate::ledger::StudyLedger;
use crate::timer::{TickHandle, TickSource, TimerSession, TimerState};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

pub struct SessionController<L, C, T> {
    session: TimerSession,
    ledger: L,
    clock: C,
    ticks: T,
    period: Duration,
    handle: Option<TickHandle>,
}

impl<L, C, T> SessionController<L, C, T>
where
    L: StudyLedger,
    C: Clock,
    T: TickSource,
{
    pub fn new(session: TimerSession, ledger: L, clock: C, ticks: T) -> Self {
        Self {
            session,
            ledger,
            clock,
            ticks,
            period: DEFAULT_TICK_INTERVAL,
            handle: None,
        }
    }

    /// Override the tick period. Takes effect the next time ticking starts.
    /// Periods below one millisecond are raised to one millisecond.
    pub fn with_tick_interval(mut self, period: Duration) -> Self {
        self.period = period.max(MIN_TICK_INTERVAL);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn is_ticking(&self) -> bool {
        self.handle.is_some()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn select_preset(&mut self, label: &str) -> Option<Event> {
        self.session.select_preset(label)
    }

    pub fn set_custom(&mut self, minutes: &str) -> Option<Event> {
        self.session.set_custom(minutes)
    }

    pub fn start(&mut self) -> Option<Event> {
        let event = self.session.start()?;
        self.sync_ticker();
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.session.pause()?;
        self.sync_ticker();
        Some(event)
    }

    pub fn reset(&mut self) -> Option<Event> {
        let event = self.session.reset()?;
        self.sync_ticker();
        Some(event)
    }

    /// Finish the session, crediting today's weekday from the clock.
    pub fn finish(&mut self) -> Option<Event> {
        let today = self.clock.weekday();
        let event = self.session.finish(&mut self.ledger, today)?;
        self.sync_ticker();
        Some(event)
    }

    /// Wait for the next tick and apply it.
    ///
    /// Never resolves while the session is not running, so it can sit in a
    /// `tokio::select!` next to input handling.
    pub async fn next_tick(&mut self) -> Option<Event> {
        let Some(handle) = self.handle.as_mut() else {
            return std::future::pending().await;
        };
        if handle.next().await.is_none() {
            // Source went away; nothing will tick this session again.
            debug!("tick source closed");
            self.handle = None;
            return None;
        }
        let event = self.session.tick();
        self.sync_ticker();
        event
    }

    /// Apply one tick without waiting. Used by callers that drive the
    /// countdown from their own loop.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.session.tick();
        self.sync_ticker();
        event
    }

    /// Stop everything and hand back the ledger.
    pub fn into_ledger(mut self) -> L {
        self.handle = None;
        self.ledger
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn sync_ticker(&mut self) {
        let running = self.session.state() == TimerState::Running;
        match (running, self.handle.is_some()) {
            (true, false) => {
                debug!(period_ms = self.period.as_millis() as u64, "acquiring tick handle");
                self.handle = Some(self.ticks.start_ticking(self.period));
            }
            (false, true) => {
                debug!(state = ?self.session.state(), "releasing tick handle");
                self.handle = None;
            }
            _ => {}
        }
    }
}
