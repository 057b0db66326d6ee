mod presets;
mod session;
mod ticker;

pub use presets::{default_preset, find_preset, CustomDuration, Preset, PRESETS};
pub use session::{elapsed_minutes, format_remaining, TimerSession, TimerState};
pub use ticker::{TickHandle, TickSource, TokioTicker};
