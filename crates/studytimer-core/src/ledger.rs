//! Weekday ledger: accumulated study minutes per day of the week.
//!
//! The timer only ever writes to the ledger through [`StudyLedger::add_minutes`];
//! reporting code reads it back through [`StudyLedger::totals`].

use chrono::Weekday;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Monday-first display order.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday ("Monday", ...).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Sink for finished study time.
pub trait StudyLedger {
    /// Add `minutes` to `weekday`. Callers never pass zero.
    fn add_minutes(&mut self, weekday: Weekday, minutes: u64);

    /// Minutes accumulated for one day.
    fn minutes(&self, weekday: Weekday) -> u64;

    /// All seven days, Monday first.
    fn totals(&self) -> IndexMap<String, u64> {
        WEEK.iter()
            .map(|&d| (weekday_name(d).to_string(), self.minutes(d)))
            .collect()
    }

    fn total_minutes(&self) -> u64 {
        WEEK.iter().map(|&d| self.minutes(d)).sum()
    }

    /// Day with the most minutes, if any minutes were recorded at all.
    /// Ties go to the earlier day in the week.
    fn best_day(&self) -> Option<(Weekday, u64)> {
        let mut best: Option<(Weekday, u64)> = None;
        for &day in &WEEK {
            let m = self.minutes(day);
            if m > 0 && best.map_or(true, |(_, b)| m > b) {
                best = Some((day, m));
            }
        }
        best
    }
}

/// In-memory ledger. Lives as long as the process; nothing is written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyLedger {
    /// Indexed by `Weekday::num_days_from_monday`.
    days: [u64; 7],
}

impl WeeklyLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StudyLedger for WeeklyLedger {
    fn add_minutes(&mut self, weekday: Weekday, minutes: u64) {
        let slot = &mut self.days[weekday.num_days_from_monday() as usize];
        *slot = slot.saturating_add(minutes);
        info!(day = weekday_name(weekday), minutes, total = *slot, "study time recorded");
    }

    fn minutes(&self, weekday: Weekday) -> u64 {
        self.days[weekday.num_days_from_monday() as usize]
    }
}

impl<L: StudyLedger + ?Sized> StudyLedger for &mut L {
    fn add_minutes(&mut self, weekday: Weekday, minutes: u64) {
        (**self).add_minutes(weekday, minutes)
    }

    fn minutes(&self, weekday: Weekday) -> u64 {
        (**self).minutes(weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let ledger = WeeklyLedger::new();
        assert_eq!(ledger.total_minutes(), 0);
        assert!(ledger.best_day().is_none());
        assert!(ledger.totals().values().all(|&m| m == 0));
    }

    #[test]
    fn add_minutes_accumulates_per_day() {
        let mut ledger = WeeklyLedger::new();
        ledger.add_minutes(Weekday::Wed, 20);
        ledger.add_minutes(Weekday::Wed, 5);
        ledger.add_minutes(Weekday::Sun, 3);
        assert_eq!(ledger.minutes(Weekday::Wed), 25);
        assert_eq!(ledger.minutes(Weekday::Sun), 3);
        assert_eq!(ledger.minutes(Weekday::Mon), 0);
        assert_eq!(ledger.total_minutes(), 28);
    }

    #[test]
    fn totals_are_monday_first() {
        let mut ledger = WeeklyLedger::new();
        ledger.add_minutes(Weekday::Sun, 1);
        let totals = ledger.totals();
        let keys: Vec<&str> = totals.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
        assert_eq!(totals["Sunday"], 1);
    }

    #[test]
    fn best_day_prefers_earlier_on_tie() {
        let mut ledger = WeeklyLedger::new();
        ledger.add_minutes(Weekday::Fri, 30);
        ledger.add_minutes(Weekday::Tue, 30);
        assert_eq!(ledger.best_day(), Some((Weekday::Tue, 30)));
    }

    #[test]
    fn works_through_mutable_reference() {
        fn record<L: StudyLedger>(mut sink: L) {
            sink.add_minutes(Weekday::Mon, 4);
        }
        let mut ledger = WeeklyLedger::new();
        record(&mut ledger);
        assert_eq!(ledger.minutes(Weekday::Mon), 4);
    }
}
