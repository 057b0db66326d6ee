use serde::Serialize;
use studytimer_core::timer::{format_remaining, PRESETS};

#[derive(Serialize)]
struct PresetRow {
    label: &'static str,
    duration_secs: u64,
    duration_min: u64,
    display: String,
}

/// Print the preset table as JSON.
pub fn list() -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<PresetRow> = PRESETS
        .iter()
        .map(|p| PresetRow {
            label: p.label,
            duration_secs: p.duration_secs,
            duration_min: p.duration_min(),
            display: format_remaining(p.duration_secs),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

/// Print a number of seconds as `MM:SS`.
pub fn format(seconds: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", format_remaining(seconds));
    Ok(())
}
