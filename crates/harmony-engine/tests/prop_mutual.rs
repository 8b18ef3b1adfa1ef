//! Property-based tests for the availability → mutual → suggestions pipeline.
//!
//! Free windows are generated through `compute_free_windows` from random busy
//! calendars, so the mutual engine sees the same well-formed inputs it would
//! in production.

use chrono::{Duration, NaiveDate, Weekday};
use harmony_engine::availability::{
    compute_free_windows, BusyInterval, FreeWindow, PreferenceProfile,
};
use harmony_engine::mutual::{compute_mutual_availability, SlotQuality};
use harmony_engine::suggest::rank_suggestions;
use harmony_engine::time::TimePoint;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

// A fixed one-week range starting Friday 2026-03-20.
fn range_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 20).unwrap()
}

fn range_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 26).unwrap()
}

/// Random busy intervals within the week: (day offset, start minute, length).
fn arb_calendar(owner: &'static str) -> impl Strategy<Value = Vec<BusyInterval>> {
    prop::collection::vec((0i64..7, 0i64..1380, 15i64..360), 0..10).prop_map(move |raw| {
        raw.into_iter()
            .map(|(day, start, len)| {
                let day_start = (range_start() + Duration::days(day)).and_time(chrono::NaiveTime::MIN);
                BusyInterval {
                    owner: owner.to_string(),
                    start: day_start + Duration::minutes(start),
                    end: day_start + Duration::minutes(start + len),
                }
            })
            .collect()
    })
}

fn arb_profile(owner: &'static str) -> impl Strategy<Value = PreferenceProfile> {
    let days = prop::sample::subsequence(
        vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ],
        0..=7,
    );
    (days, 0i64..1200, 60i64..600).prop_map(move |(preferred_days, start, len)| {
        PreferenceProfile {
            owner: owner.to_string(),
            preferred_days,
            preferred_start: TimePoint::from_minutes(start),
            preferred_end: TimePoint::from_minutes((start + len).min(1439)),
        }
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    }
}

fn contains(window: &FreeWindow, start_minute: i64, end_minute: i64) -> bool {
    window.start.minutes() <= start_minute && end_minute <= window.end.minutes()
}

// ---------------------------------------------------------------------------
// Property 1: Pipeline is idempotent end to end
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn pipeline_is_idempotent(
        busy1 in arb_calendar("alice"),
        busy2 in arb_calendar("bob"),
        profile1 in arb_profile("alice"),
        profile2 in arb_profile("bob"),
    ) {
        let run = || {
            let w1 = compute_free_windows(&busy1, &profile1, range_start(), range_end(), false);
            let w2 = compute_free_windows(&busy2, &profile2, range_start(), range_end(), false);
            compute_mutual_availability(&w1, &w2, &profile1, &profile2)
        };
        prop_assert_eq!(run(), run());
    }
}

// ---------------------------------------------------------------------------
// Property 2: Slot soundness — every slot sits inside one free window of
//   each party on that date
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_are_sound(
        busy1 in arb_calendar("alice"),
        busy2 in arb_calendar("bob"),
        profile1 in arb_profile("alice"),
        profile2 in arb_profile("bob"),
    ) {
        let w1 = compute_free_windows(&busy1, &profile1, range_start(), range_end(), false);
        let w2 = compute_free_windows(&busy2, &profile2, range_start(), range_end(), false);
        let availability = compute_mutual_availability(&w1, &w2, &profile1, &profile2);

        for day in &availability {
            for slot in &day.slots {
                prop_assert!(slot.duration_minutes > 0);
                let day_start = day.date.and_time(chrono::NaiveTime::MIN);
                let start_minute = (slot.start - day_start).num_minutes();
                let end_minute = (slot.end - day_start).num_minutes();

                let in_w1 = w1.iter().any(|w| w.date == day.date && contains(w, start_minute, end_minute));
                let in_w2 = w2.iter().any(|w| w.date == day.date && contains(w, start_minute, end_minute));
                prop_assert!(in_w1, "slot {:?} escapes alice's windows", slot);
                prop_assert!(in_w2, "slot {:?} escapes bob's windows", slot);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Records are non-empty and slot quality never increases down
//   a date's sorted slot list
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn records_are_nonempty_and_quality_sorted(
        busy1 in arb_calendar("alice"),
        busy2 in arb_calendar("bob"),
        profile1 in arb_profile("alice"),
        profile2 in arb_profile("bob"),
    ) {
        let w1 = compute_free_windows(&busy1, &profile1, range_start(), range_end(), false);
        let w2 = compute_free_windows(&busy2, &profile2, range_start(), range_end(), false);
        let availability = compute_mutual_availability(&w1, &w2, &profile1, &profile2);

        for day in &availability {
            prop_assert!(!day.slots.is_empty(), "empty record for {}", day.date);
            for pair in day.slots.windows(2) {
                prop_assert!(pair[0].quality >= pair[1].quality);
            }
            let has_ideal = day.slots.iter().any(|s| s.quality == SlotQuality::Ideal);
            prop_assert_eq!(day.is_ideal, has_ideal);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: rank_suggestions obeys the length law and quality ordering
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn ranking_obeys_length_and_order(
        busy1 in arb_calendar("alice"),
        busy2 in arb_calendar("bob"),
        profile1 in arb_profile("alice"),
        profile2 in arb_profile("bob"),
        n in 0usize..12,
    ) {
        let w1 = compute_free_windows(&busy1, &profile1, range_start(), range_end(), false);
        let w2 = compute_free_windows(&busy2, &profile2, range_start(), range_end(), false);
        let availability = compute_mutual_availability(&w1, &w2, &profile1, &profile2);

        let total: usize = availability.iter().map(|d| d.slots.len()).sum();
        let suggestions = rank_suggestions(&availability, n);

        prop_assert_eq!(suggestions.len(), n.min(total));
        for (index, suggestion) in suggestions.iter().enumerate() {
            prop_assert_eq!(suggestion.rank, index + 1);
        }
        for pair in suggestions.windows(2) {
            prop_assert!(pair[0].quality >= pair[1].quality);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Restricting to preferred hours only ever shrinks windows
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn restriction_only_shrinks(
        busy in arb_calendar("alice"),
        profile in arb_profile("alice"),
    ) {
        let unrestricted = compute_free_windows(&busy, &profile, range_start(), range_end(), false);
        let restricted = compute_free_windows(&busy, &profile, range_start(), range_end(), true);

        prop_assert!(restricted.len() <= unrestricted.len());
        for window in &restricted {
            prop_assert!(window.start >= profile.preferred_start);
            prop_assert!(window.end <= profile.preferred_end);
            prop_assert!(window.end > window.start);
            // Every restricted window sits inside some unrestricted one.
            let inside = unrestricted.iter().any(|u| {
                u.date == window.date
                    && u.start.minutes() <= window.start.minutes()
                    && window.end.minutes() <= u.end.minutes()
            });
            prop_assert!(inside);
        }
    }
}
