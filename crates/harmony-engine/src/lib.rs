//! # harmony-engine
//!
//! Temporal scheduling and conflict intelligence for trip and date planning.
//!
//! Two independent pipelines share the same minute-of-day primitives:
//!
//! - **Itinerary validation** — [`detect_conflicts`] walks one party's timed
//!   activities and reports overlaps, travel-buffer violations, and
//!   midnight-spanning ambiguity as structured, severity-tagged data.
//! - **Availability & suggestions** — [`compute_free_windows`] complements a
//!   party's busy calendar into free windows, [`compute_mutual_availability`]
//!   intersects and scores two parties' windows, and [`rank_suggestions`]
//!   flattens the result into a bounded, explained top-N list.
//!
//! The engine is purely functional: every operation is a total function of its
//! inputs with no shared state and no I/O, so identical inputs always
//! reproduce structurally identical outputs. Logical conflicts are output
//! data, never errors — only malformed time strings fail.
//!
//! ## Modules
//!
//! - [`time`] — minute-of-day arithmetic, parsing, formatting
//! - [`conflict`] — single-itinerary conflict detection
//! - [`availability`] — per-party free-window computation
//! - [`mutual`] — cross-party intersection and scoring
//! - [`suggest`] — ranked, explained suggestions
//! - [`error`] — error types

pub mod availability;
pub mod conflict;
pub mod error;
pub mod mutual;
pub mod suggest;
pub mod time;

pub use availability::{compute_free_windows, BusyInterval, FreeWindow, PreferenceProfile};
pub use conflict::{
    detect_conflicts, Conflict, ConflictDetails, ConflictReport, ConflictSummary, ConflictType,
    DaySpan, DetectorConfig, ScheduledActivity, Severity,
};
pub use error::HarmonyError;
pub use mutual::{
    compute_mutual_availability, MutualAvailability, MutualTimeSlot, PreferenceMatch, SlotQuality,
};
pub use suggest::{rank_suggestions, DateSuggestion};
pub use time::{format_duration, format_time, parse_time, TimePoint};
