//! Validate a single itinerary for overlaps, travel-buffer violations, and
//! midnight-spanning ambiguity.
//!
//! Conflicts are output data, not errors: an itinerary containing conflicts is
//! a valid state the application must display. Severity (error/warning/info)
//! is the only signal the presentation layer needs to decide between blocking,
//! confirming, and advising.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::time::{format_duration, format_time, TimePoint, MINUTES_PER_DAY};

/// Minute-of-day cutoff that disambiguates "end before start" inputs when no
/// [`DaySpan`] tag is supplied: an end at or before 6:00 AM is read as an
/// intentional spill past midnight, anything later as an authoring error.
pub const DAWN_THRESHOLD_MINUTES: i64 = 360;

/// Whether an activity's times are meant to fall on one day or spill past
/// midnight into the next.
///
/// When present, this tag is authoritative. When absent, the detector falls
/// back to the dawn-threshold heuristic on `end < start` activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaySpan {
    SameDay,
    SpansMidnight,
}

/// One timed activity in an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledActivity {
    pub id: String,
    pub name: String,
    pub start: TimePoint,
    pub end: TimePoint,
    /// Estimated travel time to the next activity, in minutes. Absent means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_minutes_to_next: Option<i64>,
    /// Whether this activity holds a reservation, making it costly to move.
    #[serde(default)]
    pub reservation_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_span: Option<DaySpan>,
}

/// The kind of problem a conflict describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    Overlap,
    InsufficientTravel,
    TightTransition,
    SameTime,
    ReverseOrder,
    PastMidnight,
    LongGap,
}

impl ConflictType {
    /// Stable wire name, also used as the prefix of conflict ids.
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictType::Overlap => "overlap",
            ConflictType::InsufficientTravel => "insufficient_travel",
            ConflictType::TightTransition => "tight_transition",
            ConflictType::SameTime => "same_time",
            ConflictType::ReverseOrder => "reverse_order",
            ConflictType::PastMidnight => "past_midnight",
            ConflictType::LongGap => "long_gap",
        }
    }
}

/// How strongly a conflict should block or merely advise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Numeric context for a conflict, when the kind carries any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_minutes: Option<i64>,
}

/// A single detected conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Stable id derived from the kind and the sorted involved activity ids,
    /// so identical inputs always reproduce identical ids.
    pub id: String,
    pub kind: ConflictType,
    pub severity: Severity,
    pub message: String,
    pub short_message: String,
    /// The involved activity ids (one or two entries).
    pub activity_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ConflictDetails>,
}

impl Conflict {
    fn new(
        kind: ConflictType,
        severity: Severity,
        message: String,
        short_message: &str,
        activity_ids: Vec<String>,
    ) -> Self {
        let mut sorted_ids = activity_ids.clone();
        sorted_ids.sort();
        Conflict {
            id: format!("{}:{}", kind.as_str(), sorted_ids.join("+")),
            kind,
            severity,
            message,
            short_message: short_message.to_string(),
            activity_ids,
            suggested_fix: None,
            details: None,
        }
    }

    fn with_fix(mut self, fix: String) -> Self {
        self.suggested_fix = Some(fix);
        self
    }

    fn with_details(mut self, details: ConflictDetails) -> Self {
        self.details = Some(details);
        self
    }
}

/// Detector thresholds and toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Buffers below this many minutes are a warning.
    pub min_buffer_minutes: i64,
    /// Buffers below this many minutes (but at least `min_buffer_minutes`)
    /// are an advisory info.
    pub tight_buffer_minutes: i64,
    /// Gaps above this many minutes produce a long-gap info.
    pub long_gap_minutes: i64,
    /// Emit info-severity findings at all.
    pub include_infos: bool,
    /// Flag untagged activities that appear to spill past midnight.
    pub check_past_midnight: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            min_buffer_minutes: 5,
            tight_buffer_minutes: 15,
            long_gap_minutes: 180,
            include_infos: true,
            check_past_midnight: true,
        }
    }
}

/// Severity tallies for a report. The counts always partition
/// `conflicts.len()` exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictSummary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

/// The full result of validating one itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// All conflicts, in chronological scan order.
    pub conflicts: Vec<Conflict>,
    /// Every input activity id, mapped to the conflicts involving it
    /// (possibly empty).
    pub by_activity: BTreeMap<String, Vec<Conflict>>,
    pub summary: ConflictSummary,
    pub has_errors: bool,
    pub has_warnings: bool,
}

/// Validate an itinerary and report every conflict in one pass.
///
/// The input need not be pre-sorted; activities are sorted by start time
/// (stable on ties) before adjacent pairs are examined. Well-formed
/// activities never cause an error — every finding comes back as data in
/// the report.
pub fn detect_conflicts(activities: &[ScheduledActivity], config: &DetectorConfig) -> ConflictReport {
    let mut sorted: Vec<&ScheduledActivity> = activities.iter().collect();
    sorted.sort_by_key(|a| a.start);

    let mut conflicts = Vec::new();
    for (i, activity) in sorted.iter().enumerate() {
        if let Some(conflict) = check_activity(activity, config) {
            conflicts.push(conflict);
        }
        if let Some(next) = sorted.get(i + 1) {
            check_pair(activity, next, config, &mut conflicts);
        }
    }

    build_report(activities, conflicts)
}

/// End minute adjusted for midnight wraparound: any `end < start` activity is
/// treated as running into the next day for pairwise arithmetic.
fn adjusted_end(activity: &ScheduledActivity) -> i64 {
    if activity.end < activity.start {
        activity.end.minutes() + MINUTES_PER_DAY
    } else {
        activity.end.minutes()
    }
}

fn check_activity(activity: &ScheduledActivity, config: &DetectorConfig) -> Option<Conflict> {
    if activity.end >= activity.start {
        return None;
    }

    let spans_midnight = match activity.day_span {
        Some(DaySpan::SpansMidnight) => return None, // intentional, nothing to flag
        Some(DaySpan::SameDay) => false,
        None => activity.end.minutes() <= DAWN_THRESHOLD_MINUTES,
    };

    if !spans_midnight {
        return Some(
            Conflict::new(
                ConflictType::ReverseOrder,
                Severity::Error,
                format!(
                    "\"{}\" ends before it starts ({} to {})",
                    activity.name,
                    activity.start.format(),
                    activity.end.format()
                ),
                "End before start",
                vec![activity.id.clone()],
            )
            .with_fix(format!("Check the start and end times of \"{}\"", activity.name)),
        );
    }

    if config.check_past_midnight && config.include_infos {
        return Some(Conflict::new(
            ConflictType::PastMidnight,
            Severity::Info,
            format!(
                "\"{}\" runs past midnight, ending at {}",
                activity.name,
                activity.end.format()
            ),
            "Runs past midnight",
            vec![activity.id.clone()],
        ));
    }

    None
}

fn check_pair(
    first: &ScheduledActivity,
    second: &ScheduledActivity,
    config: &DetectorConfig,
    conflicts: &mut Vec<Conflict>,
) {
    let first_end = adjusted_end(first);
    let second_end = adjusted_end(second);
    let pair_ids = vec![first.id.clone(), second.id.clone()];

    let overlap = first_end.min(second_end) - first.start.minutes().max(second.start.minutes());
    if overlap > 0 {
        if first.start == second.start {
            conflicts.push(
                Conflict::new(
                    ConflictType::SameTime,
                    Severity::Error,
                    format!(
                        "\"{}\" and \"{}\" both start at {}",
                        first.name,
                        second.name,
                        first.start.format()
                    ),
                    "Same start time",
                    pair_ids,
                )
                .with_fix(format!("Reschedule \"{}\" or \"{}\"", first.name, second.name)),
            );
        } else {
            let fix = if second.reservation_required {
                format!(
                    "\"{}\" holds a reservation -- end \"{}\" by {}",
                    second.name,
                    first.name,
                    second.start.format()
                )
            } else {
                format!(
                    "Move \"{}\" to start at {} or later",
                    second.name,
                    format_time(first_end)
                )
            };
            conflicts.push(
                Conflict::new(
                    ConflictType::Overlap,
                    Severity::Error,
                    format!(
                        "\"{}\" overlaps \"{}\" by {}",
                        first.name,
                        second.name,
                        format_duration(overlap)
                    ),
                    "Overlapping activities",
                    pair_ids,
                )
                .with_fix(fix)
                .with_details(ConflictDetails {
                    overlap_minutes: Some(overlap),
                    ..ConflictDetails::default()
                }),
            );
        }
        return;
    }

    let gap = second.start.minutes() - first_end;
    let travel = first.travel_minutes_to_next.unwrap_or(0);
    let buffer = gap - travel;

    if travel > 0 && buffer < 0 {
        conflicts.push(
            Conflict::new(
                ConflictType::InsufficientTravel,
                Severity::Error,
                format!(
                    "Only {} to get from \"{}\" to \"{}\", but travel takes {}",
                    format_duration(gap),
                    first.name,
                    second.name,
                    format_duration(travel)
                ),
                "Not enough travel time",
                pair_ids.clone(),
            )
            .with_fix(format!(
                "Move \"{}\" to start at {} or later",
                second.name,
                format_time(first_end + travel + config.min_buffer_minutes)
            ))
            .with_details(ConflictDetails {
                available_minutes: Some(gap),
                required_minutes: Some(travel),
                ..ConflictDetails::default()
            }),
        );
    } else if (0..config.min_buffer_minutes).contains(&buffer) {
        conflicts.push(
            Conflict::new(
                ConflictType::TightTransition,
                Severity::Warning,
                format!(
                    "Only {} of buffer between \"{}\" and \"{}\"",
                    format_duration(buffer),
                    first.name,
                    second.name
                ),
                "Tight transition",
                pair_ids.clone(),
            )
            .with_fix(format!(
                "Leave at least {} between activities",
                format_duration(config.min_buffer_minutes)
            )),
        );
    } else if (config.min_buffer_minutes..config.tight_buffer_minutes).contains(&buffer)
        && config.include_infos
    {
        conflicts.push(Conflict::new(
            ConflictType::TightTransition,
            Severity::Info,
            format!(
                "{} of buffer between \"{}\" and \"{}\" is on the tight side",
                format_duration(buffer),
                first.name,
                second.name
            ),
            "Tight transition",
            pair_ids.clone(),
        ));
    }

    if gap > config.long_gap_minutes && config.include_infos {
        conflicts.push(
            Conflict::new(
                ConflictType::LongGap,
                Severity::Info,
                format!(
                    "{} gap between \"{}\" and \"{}\"",
                    format_duration(gap),
                    first.name,
                    second.name
                ),
                "Long gap",
                pair_ids,
            )
            .with_details(ConflictDetails {
                gap_minutes: Some(gap),
                ..ConflictDetails::default()
            }),
        );
    }
}

fn build_report(activities: &[ScheduledActivity], conflicts: Vec<Conflict>) -> ConflictReport {
    let mut by_activity: BTreeMap<String, Vec<Conflict>> = activities
        .iter()
        .map(|a| (a.id.clone(), Vec::new()))
        .collect();
    for conflict in &conflicts {
        for id in &conflict.activity_ids {
            if let Some(bucket) = by_activity.get_mut(id) {
                bucket.push(conflict.clone());
            }
        }
    }

    let mut summary = ConflictSummary {
        total: conflicts.len(),
        ..ConflictSummary::default()
    };
    for conflict in &conflicts {
        match conflict.severity {
            Severity::Error => summary.errors += 1,
            Severity::Warning => summary.warnings += 1,
            Severity::Info => summary.infos += 1,
        }
    }

    ConflictReport {
        has_errors: summary.errors > 0,
        has_warnings: summary.warnings > 0,
        conflicts,
        by_activity,
        summary,
    }
}
