use crate::config::{
    BASE_APPROACH_MS, MAX_SCROLL_SPEED, MIN_SCROLL_SPEED, MUSIC_START_DELAY_MS,
    REFERENCE_SCROLL_SPEED,
};
use std::fmt;
use std::str::FromStr;

/// Player scroll speed on the 2..=10 dial. Higher is faster travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScrollSpeedSetting(u32);

impl Default for ScrollSpeedSetting {
    fn default() -> Self {
        ScrollSpeedSetting(REFERENCE_SCROLL_SPEED)
    }
}

impl fmt::Display for ScrollSpeedSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ScrollSpeedSetting {
    type Err = String;

    /// Parses a speed; out-of-range numbers clamp instead of failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("ScrollSpeed value is empty".to_string());
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| format!("ScrollSpeed '{}' is not a valid number", trimmed))?;
        if !value.is_finite() {
            return Err(format!("ScrollSpeed '{}' is not a finite number", trimmed));
        }
        Ok(Self::clamped(value.round() as i64))
    }
}

impl ScrollSpeedSetting {
    pub fn clamped(value: i64) -> Self {
        ScrollSpeedSetting(value.clamp(MIN_SCROLL_SPEED as i64, MAX_SCROLL_SPEED as i64) as u32)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub fn is_in_range(value: i64) -> bool {
        (MIN_SCROLL_SPEED as i64..=MAX_SCROLL_SPEED as i64).contains(&value)
    }

    pub fn faster(self) -> Self {
        Self::clamped(self.0 as i64 + 1)
    }

    pub fn slower(self) -> Self {
        Self::clamped(self.0 as i64 - 1)
    }

    /// Time a note takes from spawn to the hit line. Inversely
    /// proportional to speed; the reference speed takes `BASE_APPROACH_MS`.
    pub fn approach_duration_ms(self) -> i64 {
        BASE_APPROACH_MS * REFERENCE_SCROLL_SPEED as i64 / self.0 as i64
    }

    /// Countdown before the music starts, scaled the same way so the first
    /// note always has a full approach to travel.
    pub fn music_start_delay_ms(self) -> i64 {
        MUSIC_START_DELAY_MS * REFERENCE_SCROLL_SPEED as i64 / self.0 as i64
    }
}
