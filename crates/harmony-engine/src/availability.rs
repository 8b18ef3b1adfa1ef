//! Compute one party's free windows from their busy intervals.
//!
//! For each date in a range, busy intervals are clipped to the day, merged,
//! and complemented to produce the gaps — optionally clipped again to the
//! party's preferred hours. This is the first stage of the availability
//! pipeline; [`crate::mutual`] intersects two parties' outputs.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::time::{TimePoint, MINUTES_PER_DAY};

/// A committed block of time on one party's calendar, in pre-normalized
/// local time. Timezone resolution and recurrence expansion happen upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub owner: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// One party's stated scheduling preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    pub owner: String,
    /// Days of the week the party prefers to go out.
    pub preferred_days: Vec<Weekday>,
    /// Preferred clock window within a day.
    pub preferred_start: TimePoint,
    pub preferred_end: TimePoint,
}

impl PreferenceProfile {
    /// Whether `weekday` is one of the party's preferred days.
    pub fn prefers_day(&self, weekday: Weekday) -> bool {
        self.preferred_days.contains(&weekday)
    }

    /// Whether the minute range `[start, end)` overlaps the preferred window.
    pub fn overlaps_preferred_window(&self, start: i64, end: i64) -> bool {
        let clipped_start = start.max(self.preferred_start.minutes());
        let clipped_end = end.min(self.preferred_end.minutes());
        clipped_end > clipped_start
    }
}

/// A stretch of free time on one party's calendar on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeWindow {
    pub owner: String,
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub start: TimePoint,
    pub end: TimePoint,
}

/// Compute a party's free windows for every date in `[range_start, range_end]`.
///
/// A date with no busy time yields one window spanning the full day (or the
/// full preferred window when `restrict_to_preferred_hours` is set); a fully
/// booked date yields nothing. A reversed range yields an empty result.
pub fn compute_free_windows(
    busy: &[BusyInterval],
    profile: &PreferenceProfile,
    range_start: NaiveDate,
    range_end: NaiveDate,
    restrict_to_preferred_hours: bool,
) -> Vec<FreeWindow> {
    let mut windows = Vec::new();

    let mut date = range_start;
    while date <= range_end {
        let merged = merged_busy_minutes(busy, date);
        for (start, end) in free_spans(&merged) {
            let (start, end) = if restrict_to_preferred_hours {
                let clipped_start = start.max(profile.preferred_start.minutes());
                let clipped_end = end.min(profile.preferred_end.minutes());
                if clipped_end <= clipped_start {
                    continue;
                }
                (clipped_start, clipped_end)
            } else {
                (start, end)
            };

            windows.push(FreeWindow {
                owner: profile.owner.clone(),
                date,
                weekday: date.weekday(),
                start: TimePoint::from_minutes(start),
                end: if end == MINUTES_PER_DAY {
                    TimePoint::end_of_day()
                } else {
                    TimePoint::from_minutes(end)
                },
            });
        }

        date = match date.succ_opt() {
            Some(next) => next,
            None => break, // end of the calendar
        };
    }

    windows
}

/// Busy intervals clipped to `date`, expressed as sorted, merged
/// minute-of-day ranges.
fn merged_busy_minutes(busy: &[BusyInterval], date: NaiveDate) -> Vec<(i64, i64)> {
    let day_start = date.and_time(chrono::NaiveTime::MIN);
    let day_end = day_start + Duration::minutes(MINUTES_PER_DAY);

    let mut spans: Vec<(i64, i64)> = busy
        .iter()
        .filter(|b| b.start < day_end && b.end > day_start)
        .map(|b| {
            let start = (b.start.max(day_start) - day_start).num_minutes();
            let end = (b.end.min(day_end) - day_start).num_minutes();
            (start, end)
        })
        .collect();

    spans.sort_unstable();

    let mut merged: Vec<(i64, i64)> = Vec::new();
    for (start, end) in spans {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                // Overlapping or adjacent -- extend the current span.
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

/// The complement of a merged busy list within `[0, 1440]`.
fn free_spans(merged_busy: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for &(busy_start, busy_end) in merged_busy {
        if cursor < busy_start {
            spans.push((cursor, busy_start));
        }
        cursor = cursor.max(busy_end);
    }

    if cursor < MINUTES_PER_DAY {
        spans.push((cursor, MINUTES_PER_DAY));
    }

    spans
}
