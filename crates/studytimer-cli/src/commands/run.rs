//! Interactive timer loop.
//!
//! Reads one command per line from stdin while the countdown ticks on the
//! same current-thread runtime. Ledger contents live only as long as the
//! process and are printed on exit.

use std::io::Write;

use clap::Args;
use indexmap::IndexMap;
use serde::Serialize;
use studytimer_core::error::Result;
use studytimer_core::ledger::StudyLedger;
use studytimer_core::timer::find_preset;
use studytimer_core::{
    Config, Event, SessionController, SystemClock, TimerSession, TokioTicker, WeeklyLedger,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::view::{render_timer, render_week, Theme};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Preset to start with (e.g. "30 mins"); defaults to the configured one
    #[arg(long, conflicts_with = "minutes")]
    preset: Option<String>,
    /// Custom duration in minutes
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=10_000))]
    minutes: Option<u64>,
    /// Emit events as JSON lines instead of text
    #[arg(long)]
    json: bool,
    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Start,
    Pause,
    Reset,
    Finish,
    Preset(String),
    Custom(String),
    Status,
    Week,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        match word.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "start" | "s" => Self::Start,
            "pause" | "p" => Self::Pause,
            "reset" | "r" => Self::Reset,
            "finish" | "f" => Self::Finish,
            "preset" => Self::Preset(rest.to_string()),
            "custom" | "c" => Self::Custom(rest.to_string()),
            "status" => Self::Status,
            "week" | "w" => Self::Week,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "\
commands:
  start | s             start or resume the countdown
  pause | p             pause the countdown
  reset | r             stop and restore the full duration
  finish | f            record elapsed minutes and reset (paused or done)
  preset <label>        pick a preset: 15 mins, 30 mins, 1 hour, 2 hours
  custom | c <minutes>  set a custom duration
  status                show the timer
  week | w              show this week's study minutes
  quit | q              exit";

/// Ledger dump for JSON output. Days stay Monday first.
#[derive(Serialize)]
struct WeeklyTotals {
    #[serde(rename = "type")]
    kind: &'static str,
    days: IndexMap<String, u64>,
}

struct Printer {
    json: bool,
    theme: Theme,
}

impl Printer {
    fn event(&self, event: &Event) -> Result<()> {
        let mut out = std::io::stdout().lock();
        if self.json {
            writeln!(out, "{}", serde_json::to_string(event)?)?;
            return Ok(());
        }
        match event {
            Event::TimerTicked { remaining_secs } => {
                write!(out, "\r{}   ", studytimer_core::timer::format_remaining(*remaining_secs))?;
                out.flush()?;
            }
            Event::TimerCompleted { .. } => writeln!(out, "\r00:00   time's up! type 'finish' to record it")?,
            Event::SessionFinished {
                elapsed_min,
                weekday: Some(day),
                ..
            } => writeln!(out, "recorded {elapsed_min} min for {day}")?,
            Event::SessionFinished { .. } => writeln!(out, "session under a minute, nothing recorded")?,
            Event::DurationChanged { duration_secs, .. } => writeln!(
                out,
                "duration set to {}",
                studytimer_core::timer::format_remaining(*duration_secs)
            )?,
            other => writeln!(out, "{}", other.name().replace('_', " "))?,
        }
        Ok(())
    }

    fn rejected(&self, command: &ReplCommand) -> Result<()> {
        debug!(?command, "command had no effect");
        if !self.json {
            println!("no change");
        }
        Ok(())
    }

    fn screen(&self, session: &TimerSession) -> Result<()> {
        if self.json {
            return self.event(&session.snapshot());
        }
        println!("{}", render_timer(session, &self.theme));
        Ok(())
    }

    fn week<L: StudyLedger>(&self, ledger: &L) -> Result<()> {
        if self.json {
            let totals = WeeklyTotals {
                kind: "weekly_totals",
                days: ledger.totals(),
            };
            println!("{}", serde_json::to_string(&totals)?);
        } else {
            println!("{}", render_week(ledger, &self.theme));
        }
        Ok(())
    }
}

fn initial_session(args: &RunArgs, config: &Config) -> Result<TimerSession> {
    let mut session = match args.preset.as_deref() {
        Some(label) => TimerSession::with_preset(find_preset(label)?),
        None => TimerSession::with_preset(config.default_preset()),
    };
    if let Some(minutes) = args.minutes {
        session.set_preset(minutes * 60);
    }
    Ok(session)
}

pub fn run(args: RunArgs, config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_loop(args, config))
}

async fn run_loop(args: RunArgs, config: &Config) -> Result<()> {
    let printer = Printer {
        json: args.json,
        theme: Theme::from_config(&config.ui, !args.no_color && !args.json),
    };
    let mut ctl = SessionController::new(
        initial_session(&args, config)?,
        WeeklyLedger::new(),
        SystemClock,
        TokioTicker,
    )
    .with_tick_interval(config.tick_interval());
    info!(duration_secs = ctl.session().duration_secs(), "timer ready");

    printer.screen(ctl.session())?;
    if !printer.json {
        println!("type 'help' for commands");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = ReplCommand::parse(&line);
                let event = match &command {
                    ReplCommand::Start => ctl.start(),
                    ReplCommand::Pause => ctl.pause(),
                    ReplCommand::Reset => ctl.reset(),
                    ReplCommand::Finish => ctl.finish(),
                    ReplCommand::Preset(label) => ctl.select_preset(label),
                    ReplCommand::Custom(minutes) => ctl.set_custom(minutes),
                    ReplCommand::Status => {
                        printer.screen(ctl.session())?;
                        continue;
                    }
                    ReplCommand::Week => {
                        printer.week(ctl.ledger())?;
                        continue;
                    }
                    ReplCommand::Help => {
                        if !printer.json {
                            println!("{HELP}");
                        }
                        continue;
                    }
                    ReplCommand::Quit => break,
                    ReplCommand::Empty => continue,
                    ReplCommand::Unknown(text) => {
                        if !printer.json {
                            println!("unknown command '{text}', type 'help'");
                        }
                        continue;
                    }
                };
                match event {
                    Some(event) => printer.event(&event)?,
                    None => printer.rejected(&command)?,
                }
            }
            Some(event) = ctl.next_tick() => {
                printer.event(&event)?;
            }
        }
    }

    if ctl.session().session_started() {
        info!(remaining_secs = ctl.session().remaining_secs(), "exiting with unfinished session");
    }
    let ledger = ctl.into_ledger();
    printer.week(&ledger)?;
    Ok(())
}
