use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A fixed, named duration offered as a quick-select option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub label: &'static str,
    /// Duration in seconds. Always greater than zero.
    pub duration_secs: u64,
}

impl Preset {
    pub fn duration_min(&self) -> u64 {
        self.duration_secs / 60
    }
}

/// The preset table, in display order.
pub const PRESETS: [Preset; 4] = [
    Preset {
        label: "15 mins",
        duration_secs: 15 * 60,
    },
    Preset {
        label: "30 mins",
        duration_secs: 30 * 60,
    },
    Preset {
        label: "1 hour",
        duration_secs: 60 * 60,
    },
    Preset {
        label: "2 hours",
        duration_secs: 120 * 60,
    },
];

/// Preset used when nothing else is configured.
pub fn default_preset() -> Preset {
    PRESETS[0]
}

/// Look up a preset by label. Matching ignores ASCII case and surrounding
/// whitespace so `"1 HOUR "` finds `"1 hour"`.
pub fn find_preset(label: &str) -> Result<Preset, ValidationError> {
    let wanted = label.trim();
    PRESETS
        .iter()
        .copied()
        .find(|p| p.label.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ValidationError::UnknownPreset(wanted.to_string()))
}

/// Duration requested by the user, before it is applied to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDuration {
    pub minutes: u64,
}

impl CustomDuration {
    /// Parse free-form minute input.
    ///
    /// Accepts a positive whole number with optional surrounding whitespace.
    /// Signs, decimals and trailing garbage are rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyDuration);
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::NotANumber(trimmed.to_string()));
        }
        let minutes: u64 = trimmed
            .parse()
            .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
        if minutes == 0 {
            return Err(ValidationError::NonPositive);
        }
        if minutes.checked_mul(60).is_none() {
            return Err(ValidationError::TooLarge(minutes));
        }
        Ok(Self { minutes })
    }

    pub fn duration_secs(&self) -> u64 {
        self.minutes.saturating_mul(60)
    }
}
