//! WASM bindings for harmony-engine.
//!
//! Exposes conflict detection, mutual availability, and suggestion ranking to
//! JavaScript via `wasm-bindgen`. All complex types are passed as JSON
//! strings; the Rust types in `harmony-engine` derive serde, so the JSON
//! shapes mirror them field for field.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p harmony-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/harmony-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/harmony_engine_wasm.wasm
//! ```

use harmony_engine::availability::{FreeWindow, PreferenceProfile};
use harmony_engine::conflict::{DetectorConfig, ScheduledActivity};
use harmony_engine::mutual::MutualAvailability;
use wasm_bindgen::prelude::*;

fn parse_json<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Validate an itinerary and return the full conflict report as JSON.
///
/// `activities_json` must be a JSON array of activity objects. `config_json`
/// may be `None` to use the default thresholds, or a JSON object overriding
/// any subset of them.
#[wasm_bindgen(js_name = "detectConflicts")]
pub fn detect_conflicts(activities_json: &str, config_json: Option<String>) -> Result<String, JsValue> {
    let activities: Vec<ScheduledActivity> = parse_json(activities_json, "activities")?;
    let config: DetectorConfig = match config_json {
        Some(json) => parse_json(&json, "config")?,
        None => DetectorConfig::default(),
    };

    let report = harmony_engine::detect_conflicts(&activities, &config);
    to_json(&report)
}

/// Intersect two parties' free windows and return scored, per-date mutual
/// availability as JSON.
///
/// The window arguments are JSON arrays of free-window objects; the profile
/// arguments are the corresponding parties' preference profiles.
#[wasm_bindgen(js_name = "computeMutualAvailability")]
pub fn compute_mutual_availability(
    windows1_json: &str,
    windows2_json: &str,
    profile1_json: &str,
    profile2_json: &str,
) -> Result<String, JsValue> {
    let windows1: Vec<FreeWindow> = parse_json(windows1_json, "windows1")?;
    let windows2: Vec<FreeWindow> = parse_json(windows2_json, "windows2")?;
    let profile1: PreferenceProfile = parse_json(profile1_json, "profile1")?;
    let profile2: PreferenceProfile = parse_json(profile2_json, "profile2")?;

    let availability =
        harmony_engine::compute_mutual_availability(&windows1, &windows2, &profile1, &profile2);
    to_json(&availability)
}

/// Rank mutual availability into a bounded, explained top-N suggestion list,
/// returned as JSON.
#[wasm_bindgen(js_name = "rankSuggestions")]
pub fn rank_suggestions(availability_json: &str, n: usize) -> Result<String, JsValue> {
    let availability: Vec<MutualAvailability> = parse_json(availability_json, "availability")?;
    let suggestions = harmony_engine::rank_suggestions(&availability, n);
    to_json(&suggestions)
}
