//! Intersect two parties' free windows into scored mutual time slots.
//!
//! For each date both parties have free time, every pairwise window
//! intersection is computed, merged so no time range is represented twice,
//! scored against each party's preferences, and sorted best-first. Dates with
//! no mutual overlap are simply absent from the output — absence encodes
//! "no overlap", never an empty record.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::availability::{FreeWindow, PreferenceProfile};

/// How well a mutual slot satisfies the two parties' preferences.
///
/// Ordered worst-to-best so the best quality is the `Ord` maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotQuality {
    /// Neither party's preferences match — but they are both free.
    Possible,
    /// Exactly one party's preferences match.
    Good,
    /// Both parties' preferences match.
    Ideal,
}

/// Which parties' preferences a slot satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceMatch {
    pub user1: bool,
    pub user2: bool,
}

/// A stretch of time during which both parties are free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutualTimeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
    pub quality: SlotQuality,
    pub matches_preferences: PreferenceMatch,
}

/// All mutual slots on one date. Only emitted when at least one slot exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutualAvailability {
    pub date: NaiveDate,
    pub weekday: Weekday,
    /// Non-empty, sorted by quality descending then start ascending.
    pub slots: Vec<MutualTimeSlot>,
    /// True iff any slot is [`SlotQuality::Ideal`].
    pub is_ideal: bool,
}

/// Intersect two parties' free windows and score the resulting slots.
///
/// A date present in only one party's set contributes nothing — intersection
/// requires both. Output records are ordered by date ascending.
pub fn compute_mutual_availability(
    windows1: &[FreeWindow],
    windows2: &[FreeWindow],
    profile1: &PreferenceProfile,
    profile2: &PreferenceProfile,
) -> Vec<MutualAvailability> {
    let by_date1 = group_by_date(windows1);
    let by_date2 = group_by_date(windows2);

    let mut results = Vec::new();
    for (date, day_windows1) in &by_date1 {
        let Some(day_windows2) = by_date2.get(date) else {
            continue;
        };

        let overlaps = merged_intersections(day_windows1, day_windows2);
        if overlaps.is_empty() {
            continue;
        }

        let weekday = date.weekday();
        let mut slots: Vec<MutualTimeSlot> = overlaps
            .into_iter()
            .map(|(start, end)| score_slot(*date, weekday, start, end, profile1, profile2))
            .collect();

        // Best quality first, then chronological within a quality.
        slots.sort_by(|a, b| b.quality.cmp(&a.quality).then(a.start.cmp(&b.start)));

        results.push(MutualAvailability {
            date: *date,
            weekday,
            is_ideal: slots.iter().any(|s| s.quality == SlotQuality::Ideal),
            slots,
        });
    }

    results
}

fn group_by_date(windows: &[FreeWindow]) -> BTreeMap<NaiveDate, Vec<&FreeWindow>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&FreeWindow>> = BTreeMap::new();
    for window in windows {
        by_date.entry(window.date).or_default().push(window);
    }
    by_date
}

/// All pairwise window intersections on one date, with overlapping raw
/// intersections collapsed so no time range is represented twice.
///
/// Touching intersections are kept separate: each surviving slot must stay
/// inside a single free window of each party, and merging across a shared
/// endpoint could span two of one party's windows.
fn merged_intersections(windows1: &[&FreeWindow], windows2: &[&FreeWindow]) -> Vec<(i64, i64)> {
    let mut raw: Vec<(i64, i64)> = Vec::new();
    for w1 in windows1 {
        for w2 in windows2 {
            let start = w1.start.minutes().max(w2.start.minutes());
            let end = w1.end.minutes().min(w2.end.minutes());
            if end > start {
                raw.push((start, end));
            }
        }
    }

    raw.sort_unstable();

    let mut merged: Vec<(i64, i64)> = Vec::new();
    for (start, end) in raw {
        if let Some(last) = merged.last_mut() {
            if start < last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

fn score_slot(
    date: NaiveDate,
    weekday: Weekday,
    start_minute: i64,
    end_minute: i64,
    profile1: &PreferenceProfile,
    profile2: &PreferenceProfile,
) -> MutualTimeSlot {
    let matches = PreferenceMatch {
        user1: profile1.prefers_day(weekday)
            && profile1.overlaps_preferred_window(start_minute, end_minute),
        user2: profile2.prefers_day(weekday)
            && profile2.overlaps_preferred_window(start_minute, end_minute),
    };
    let quality = match (matches.user1, matches.user2) {
        (true, true) => SlotQuality::Ideal,
        (true, false) | (false, true) => SlotQuality::Good,
        (false, false) => SlotQuality::Possible,
    };

    let day_start = date.and_time(chrono::NaiveTime::MIN);
    MutualTimeSlot {
        start: day_start + Duration::minutes(start_minute),
        end: day_start + Duration::minutes(end_minute),
        duration_minutes: end_minute - start_minute,
        quality,
        matches_preferences: matches,
    }
}
