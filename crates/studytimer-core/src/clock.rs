//! Wall-clock abstraction.
//!
//! The session only needs the clock to know which weekday to credit when a
//! session is finished. Tests and replays plug in a [`FixedClock`].

use chrono::{DateTime, Datelike, Local, Weekday};

pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn weekday(&self) -> Weekday {
        self.now().weekday()
    }
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
