//! # Study Timer Core Library
//!
//! Countdown session logic for the study timer. The CLI binary is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Session**: state machine driven by one `tick()` per second
//! - **Tick Source**: cancellable tokio interval owned by the controller
//! - **Ledger**: weekday -> minutes accumulator fed by finished sessions
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerSession`]: Core timer state machine
//! - [`SessionController`]: Session plus ledger, clock and tick handle
//! - [`WeeklyLedger`]: In-memory study ledger
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod controller;
pub mod error;
pub mod events;
pub mod ledger;
pub mod storage;
pub mod timer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::SessionController;
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use ledger::{StudyLedger, WeeklyLedger};
pub use storage::Config;
pub use timer::{TickHandle, TickSource, TimerSession, TimerState, TokioTicker};
