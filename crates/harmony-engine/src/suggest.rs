//! Flatten ranked mutual availability into a bounded, explained top-N list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::mutual::{MutualAvailability, MutualTimeSlot, SlotQuality};

/// One ranked, explained suggestion for when to meet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSuggestion {
    /// Stable id derived from the slot's start, so identical inputs always
    /// reproduce identical ids.
    pub id: String,
    pub date: NaiveDate,
    pub slot: MutualTimeSlot,
    pub quality: SlotQuality,
    /// Human explanation of why this slot was suggested.
    pub reason: String,
    /// 1-based position in the ranked list.
    pub rank: usize,
}

/// Rank every mutual slot across a range and keep the best `n`.
///
/// Slots are ordered by quality descending, then date ascending, then start
/// ascending. The output length is `min(n, total slot count)`; `n == 0`
/// yields an empty list, not an error.
pub fn rank_suggestions(availability: &[MutualAvailability], n: usize) -> Vec<DateSuggestion> {
    let mut flattened: Vec<(NaiveDate, &MutualTimeSlot)> = availability
        .iter()
        .flat_map(|day| day.slots.iter().map(move |slot| (day.date, slot)))
        .collect();

    flattened.sort_by(|(date_a, slot_a), (date_b, slot_b)| {
        slot_b
            .quality
            .cmp(&slot_a.quality)
            .then(date_a.cmp(date_b))
            .then(slot_a.start.cmp(&slot_b.start))
    });

    flattened
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(index, (date, slot))| DateSuggestion {
            id: format!("suggestion-{}", slot.start.format("%Y%m%d%H%M")),
            date,
            slot: slot.clone(),
            quality: slot.quality,
            reason: reason_for(slot),
            rank: index + 1,
        })
        .collect()
}

fn reason_for(slot: &MutualTimeSlot) -> String {
    let matches = slot.matches_preferences;
    match (matches.user1, matches.user2) {
        (true, true) => "You're both free and it matches both of your preferred times".to_string(),
        (true, false) => "You're both free and it matches your preferred times".to_string(),
        (false, true) => "You're both free and it matches their preferred times".to_string(),
        (false, false) => "A time you're both free, outside your usual preferences".to_string(),
    }
}
