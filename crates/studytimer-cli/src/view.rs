//! Plain-text rendering of the timer screen and the weekly overview.
//!
//! Nothing here reads global state: the theme comes in as an argument.

use studytimer_core::ledger::{weekday_name, StudyLedger, WEEK};
use studytimer_core::storage::UiConfig;
use studytimer_core::timer::PRESETS;
use studytimer_core::{TimerSession, TimerState};

/// Minutes at which a weekly bar stops growing.
const BAR_CAP_MIN: u64 = 60;

#[derive(Debug, Clone)]
pub struct Theme {
    pub dark_mode: bool,
    /// `(r, g, b)` when color output is enabled and the accent parses.
    pub accent: Option<(u8, u8, u8)>,
    pub bar_width: u32,
}

impl Theme {
    pub fn from_config(ui: &UiConfig, color: bool) -> Self {
        Self {
            dark_mode: ui.dark_mode,
            accent: if color {
                parse_hex_color(&ui.accent_color)
            } else {
                None
            },
            bar_width: ui.bar_width.max(1),
        }
    }

    fn fill(&self) -> char {
        if self.dark_mode { '█' } else { '#' }
    }

    fn empty(&self) -> char {
        if self.dark_mode { '·' } else { '-' }
    }

    fn accent(&self, text: &str) -> String {
        match self.accent {
            Some((r, g, b)) => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
            None => text.to_string(),
        }
    }
}

/// Parse `#RRGGBB`.
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn state_label(session: &TimerSession) -> &'static str {
    match session.state() {
        TimerState::Idle => "ready",
        TimerState::Running => "running",
        TimerState::Paused => "paused",
        TimerState::Finished => "time's up",
    }
}

/// Full timer screen.
pub fn render_timer(session: &TimerSession, theme: &Theme) -> String {
    let mut out = String::new();
    out.push_str("Study Timer\n\n");
    out.push_str(&format!(
        "    {}    [{}]\n\n",
        theme.accent(&session.display()),
        state_label(session)
    ));

    let active = session.active_preset();
    let presets: Vec<String> = PRESETS
        .iter()
        .map(|p| {
            if active.map(|a| a.label) == Some(p.label) {
                format!("[{}]", p.label)
            } else {
                format!(" {} ", p.label)
            }
        })
        .collect();
    out.push_str(&format!("presets: {}\n", presets.join(" ")));

    let mut actions = Vec::new();
    if !session.session_started() {
        actions.push("preset <label>");
        actions.push("custom <minutes>");
    }
    actions.push(if session.state() == TimerState::Running {
        "pause"
    } else {
        "start"
    });
    actions.push("reset");
    if session.can_finish() {
        actions.push("finish");
    }
    out.push_str(&format!("actions: {}\n", actions.join(", ")));
    out
}

fn bar_cells(minutes: u64, width: u32) -> usize {
    // A capped day fills 90% of the bar.
    (minutes.min(BAR_CAP_MIN) * u64::from(width) * 3 / 200) as usize
}

/// Weekly overview, Monday first.
pub fn render_week<L: StudyLedger + ?Sized>(ledger: &L, theme: &Theme) -> String {
    let width = theme.bar_width as usize;
    let mut out = String::from("Weekly Study Overview\n\n");
    for day in WEEK {
        let minutes = ledger.minutes(day);
        let filled = bar_cells(minutes, theme.bar_width).min(width);
        let bar: String = std::iter::repeat(theme.fill())
            .take(filled)
            .chain(std::iter::repeat(theme.empty()).take(width - filled))
            .collect();
        out.push_str(&format!(
            "{:<4}{} {} mins\n",
            &weekday_name(day)[..3],
            bar,
            minutes
        ));
    }
    out.push_str(&format!("\ntotal: {} mins\n", ledger.total_minutes()));
    if let Some((day, minutes)) = ledger.best_day() {
        out.push_str(&format!(
            "best day: {} ({minutes} mins)\n",
            theme.accent(weekday_name(day))
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use studytimer_core::WeeklyLedger;

    fn plain(dark_mode: bool) -> Theme {
        Theme {
            dark_mode,
            accent: None,
            bar_width: 20,
        }
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#FFC700"), Some((255, 199, 0)));
        assert_eq!(parse_hex_color("FFC700"), None);
        assert_eq!(parse_hex_color("#FFC7"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn theme_ignores_accent_without_color() {
        let ui = UiConfig::default();
        assert!(Theme::from_config(&ui, false).accent.is_none());
        assert_eq!(Theme::from_config(&ui, true).accent, Some((255, 199, 0)));
    }

    #[test]
    fn timer_marks_active_preset_while_idle() {
        let session = TimerSession::new();
        let text = render_timer(&session, &plain(false));
        assert!(text.contains("15:00"));
        assert!(text.contains("[15 mins]"));
        assert!(text.contains("custom <minutes>"));
        assert!(!text.contains("finish"));
    }

    #[test]
    fn timer_offers_finish_when_paused() {
        let mut session = TimerSession::new();
        session.start();
        session.tick();
        session.pause();
        let text = render_timer(&session, &plain(false));
        assert!(text.contains("14:59"));
        assert!(text.contains("finish"));
        assert!(!text.contains("[15 mins]"));
        assert!(!text.contains("custom <minutes>"));
    }

    #[test]
    fn week_bars_cap_at_sixty_minutes() {
        let mut ledger = WeeklyLedger::new();
        ledger.add_minutes(Weekday::Mon, 30);
        ledger.add_minutes(Weekday::Tue, 600);
        let text = render_week(&ledger, &plain(false));
        let lines: Vec<&str> = text.lines().collect();
        // 30 min -> 9 of 20 cells, capped -> 18 of 20.
        assert!(lines[2].starts_with("Mon #########-----------"));
        assert!(lines[3].starts_with("Tue ##################--"));
        assert!(lines[2].ends_with("30 mins"));
        assert!(text.contains("total: 630 mins"));
    }

    #[test]
    fn week_names_best_day_only_when_recorded() {
        let mut ledger = WeeklyLedger::new();
        assert!(!render_week(&ledger, &plain(false)).contains("best day"));

        ledger.add_minutes(Weekday::Thu, 45);
        ledger.add_minutes(Weekday::Sat, 45);
        ledger.add_minutes(Weekday::Mon, 10);
        let text = render_week(&ledger, &plain(false));
        assert!(text.ends_with("best day: Thursday (45 mins)\n"));
    }

    #[test]
    fn dark_mode_changes_glyphs() {
        let ledger = WeeklyLedger::new();
        let text = render_week(&ledger, &plain(true));
        assert!(text.contains('·'));
        assert!(!text.contains('#'));
    }
}
