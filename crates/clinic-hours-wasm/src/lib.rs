//! WASM bindings for clinic-hours.
//!
//! Exposes configuration normalization, day resolution, slot validation and
//! slot enumeration to the browser booking UI via `wasm-bindgen`. All complex
//! types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p clinic-hours-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/clinic_hours_wasm.wasm
//! ```
//!
//! Configuration payloads are never rejected for their shape: any valid JSON
//! is normalized. Only text that is not JSON at all, or an unparseable date
//! identifier, produces a thrown error.

use clinic_hours::time::parse_date;
use clinic_hours::{ExceptionTable, HolidaySet, WeeklySchedule};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: JSON in, JSON out
// ---------------------------------------------------------------------------

fn parse_payload(json: &str, what: &str) -> Result<Value, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {what} JSON: {e}")))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// The three configuration structures, normalized from their JSON payloads.
struct Snapshot {
    weekly: WeeklySchedule,
    holidays: HolidaySet,
    exceptions: ExceptionTable,
}

impl Snapshot {
    fn parse(weekly_json: &str, holidays_json: &str, exceptions_json: &str) -> Result<Self, JsValue> {
        Ok(Self {
            weekly: clinic_hours::normalize_weekly_schedule(&parse_payload(weekly_json, "weekly schedule")?),
            holidays: clinic_hours::normalize_holidays(&parse_payload(holidays_json, "holidays")?),
            exceptions: clinic_hours::normalize_exceptions(&parse_payload(exceptions_json, "exceptions")?),
        })
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Normalize a weekly schedule payload keyed `"1"`..`"7"`.
///
/// Returns the seven-entry table as a JSON object, ready to bind to the
/// weekly-hours editor.
#[wasm_bindgen(js_name = "normalizeWeeklySchedule")]
pub fn normalize_weekly_schedule(weekly_json: &str) -> Result<String, JsValue> {
    let raw = parse_payload(weekly_json, "weekly schedule")?;
    to_json(&clinic_hours::normalize_weekly_schedule(&raw))
}

/// Normalize a holiday list. Returns an ascending JSON array.
#[wasm_bindgen(js_name = "normalizeHolidays")]
pub fn normalize_holidays(holidays_json: &str) -> Result<String, JsValue> {
    let raw = parse_payload(holidays_json, "holidays")?;
    to_json(&clinic_hours::normalize_holidays(&raw))
}

/// Normalize an exception list. Returns an ascending JSON array.
#[wasm_bindgen(js_name = "normalizeExceptions")]
pub fn normalize_exceptions(exceptions_json: &str) -> Result<String, JsValue> {
    let raw = parse_payload(exceptions_json, "exceptions")?;
    to_json(&clinic_hours::normalize_exceptions(&raw))
}

/// Resolve the opening window of `date` (`YYYY-MM-DD`).
///
/// Returns `{closed, openTime, closeTime, reason, source}`.
#[wasm_bindgen(js_name = "resolveDay")]
pub fn resolve_day(
    date: &str,
    weekly_json: &str,
    holidays_json: &str,
    exceptions_json: &str,
) -> Result<String, JsValue> {
    let date = parse_date(date).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let snapshot = Snapshot::parse(weekly_json, holidays_json, exceptions_json)?;
    let window =
        clinic_hours::resolve_day(date, &snapshot.weekly, &snapshot.holidays, &snapshot.exceptions);
    to_json(&window)
}

/// Validate an appointment slot.
///
/// Returns `{valid, reason}`. Unparseable `start`/`end` values are reported
/// as a rejection, not thrown.
#[wasm_bindgen(js_name = "validateSlot")]
pub fn validate_slot(
    start: &str,
    end: &str,
    weekly_json: &str,
    holidays_json: &str,
    exceptions_json: &str,
) -> Result<String, JsValue> {
    let snapshot = Snapshot::parse(weekly_json, holidays_json, exceptions_json)?;
    let result = clinic_hours::validate_slot(
        start,
        end,
        &snapshot.weekly,
        &snapshot.holidays,
        &snapshot.exceptions,
    );
    to_json(&result)
}

/// List bookable slots of `duration_minutes` on `date`, one every
/// `step_minutes`. Returns a JSON array of `{start, end}`.
#[wasm_bindgen(js_name = "availableSlots")]
pub fn available_slots(
    date: &str,
    duration_minutes: u32,
    step_minutes: u32,
    weekly_json: &str,
    holidays_json: &str,
    exceptions_json: &str,
) -> Result<String, JsValue> {
    let date = parse_date(date).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let snapshot = Snapshot::parse(weekly_json, holidays_json, exceptions_json)?;
    let slots = clinic_hours::available_slots(
        date,
        duration_minutes,
        step_minutes,
        &snapshot.weekly,
        &snapshot.holidays,
        &snapshot.exceptions,
    );
    to_json(&slots)
}
