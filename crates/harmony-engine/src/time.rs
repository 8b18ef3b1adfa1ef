//! Minute-of-day arithmetic, parsing, and formatting.
//!
//! All scheduling math in this crate happens in plain minute counts. A
//! [`TimePoint`] pins a minute to a clock position within one day; raw `i64`
//! minutes are used for durations, gaps, and wraparound-adjusted arithmetic.

use crate::error::{HarmonyError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// A clock position within a single day, in minutes since midnight.
///
/// The stored value is in `[0, 1440]`. The value `1440` is legal only as an
/// exclusive end bound (the midnight that closes the day); everything
/// constructed through [`TimePoint::from_minutes`] wraps into `[0, 1440)`.
/// Deserialization enforces the same bound, so untrusted JSON cannot smuggle
/// an out-of-range minute count in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TimePoint(u16);

impl<'de> Deserialize<'de> for TimePoint {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let minutes = u16::deserialize(deserializer)?;
        if i64::from(minutes) > MINUTES_PER_DAY {
            return Err(serde::de::Error::custom(format!(
                "minute-of-day out of range: {}",
                minutes
            )));
        }
        Ok(TimePoint(minutes))
    }
}

impl TimePoint {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: TimePoint = TimePoint(0);

    /// Build a `TimePoint` from a raw minute count, wrapping modulo 1440.
    ///
    /// Negative and oversized inputs are normalized, so `-60` and `1380` both
    /// land on 11:00 PM.
    pub fn from_minutes(minutes: i64) -> Self {
        TimePoint(minutes.rem_euclid(MINUTES_PER_DAY) as u16)
    }

    /// Build a `TimePoint` from hour and minute components.
    ///
    /// Returns `None` when the components are out of range.
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(TimePoint(hour as u16 * 60 + minute as u16))
    }

    /// The exclusive end-of-day bound (minute 1440).
    pub fn end_of_day() -> Self {
        TimePoint(MINUTES_PER_DAY as u16)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> i64 {
        self.0 as i64
    }

    /// Render as 12-hour `"h:mm AM/PM"`.
    pub fn format(self) -> String {
        format_time(self.minutes())
    }
}

/// Parse a strict `"HH:MM"` 24-hour time string.
///
/// # Errors
/// Returns `HarmonyError::InvalidTime` on anything that is not two numeric
/// fields separated by a colon with hour 0-23 and minute 0-59.
pub fn parse_time(input: &str) -> Result<TimePoint> {
    let invalid = || HarmonyError::InvalidTime(input.to_string());

    let (hour_str, minute_str) = input.split_once(':').ok_or_else(invalid)?;
    // Digits only: u8's FromStr would tolerate a leading `+` sign.
    let all_digits =
        |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(hour_str) || !all_digits(minute_str) {
        return Err(invalid());
    }

    let hour: u8 = hour_str.parse().map_err(|_| invalid())?;
    let minute: u8 = minute_str.parse().map_err(|_| invalid())?;

    TimePoint::from_hm(hour, minute).ok_or_else(invalid)
}

/// Render a raw minute count as 12-hour `"h:mm AM/PM"`.
///
/// The input is normalized modulo 1440 first, so negative minutes and values
/// past midnight (e.g. a wraparound-adjusted end time of 1500) format safely.
pub fn format_time(minutes: i64) -> String {
    let normalized = minutes.rem_euclid(MINUTES_PER_DAY);
    let hour24 = normalized / 60;
    let minute = normalized % 60;

    let meridiem = if hour24 < 12 { "AM" } else { "PM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };

    format!("{}:{:02} {}", hour12, minute, meridiem)
}

/// Render a duration in minutes as `"45 min"`, `"2 hr"`, or `"2 hr 30 min"`.
///
/// Negative durations render as `-` followed by the formatted positive value.
pub fn format_duration(minutes: i64) -> String {
    if minutes < 0 {
        return format!("-{}", format_duration(-minutes));
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} hr", h),
        (h, m) => format!("{} hr {} min", h, m),
    }
}
