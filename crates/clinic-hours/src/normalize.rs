//! Sanitize untrusted configuration payloads into canonical structures.
//!
//! The payloads come from an admin UI and an external store, so any JSON shape
//! may show up here. None of these functions fail: an entry that cannot be
//! read is dropped, and a field that cannot be read falls back to a default.
//! Dropped and superseded entries are reported through `tracing` only.
//!
//! Field names are read in camelCase (`openTime`) with a snake_case alias
//! (`open_time`). Output always serializes in camelCase, so normalizing the
//! serialized output again yields the same structure.
//!
//! Duplicate dates in the holiday and exception lists resolve the same way:
//! the last occurrence wins.

use serde_json::Value;
use tracing::{debug, warn};

use crate::exception::{
    ExceptionTable, ScheduleException, DEFAULT_EXCEPTION_CLOSE, DEFAULT_EXCEPTION_OPEN,
};
use crate::holiday::{Holiday, HolidayCategory, HolidaySet};
use crate::schedule::{weekday_key, WeeklyDayConfig, WeeklySchedule, WEEKDAYS};
use crate::time::{parse_date, TimeOfDay};

/// Strict `HH:MM` (hour 0–23, minute 0–59); anything else yields `fallback`.
pub fn normalize_time_of_day(raw: &Value, fallback: TimeOfDay) -> TimeOfDay {
    raw.as_str()
        .and_then(TimeOfDay::parse_strict)
        .unwrap_or(fallback)
}

/// Normalize a weekly payload keyed `"1"` (Monday) to `"7"` (Sunday).
///
/// Each weekday is read on its own. A missing or non-boolean `enabled` keeps
/// the built-in value for that weekday, and unreadable times take the built-in
/// times. If the resulting window is empty or inverted, both times revert to
/// the built-in pair. A payload that is not an object yields the built-in
/// table.
pub fn normalize_weekly_schedule(raw: &Value) -> WeeklySchedule {
    let entries = raw.as_object();
    if entries.is_none() && !raw.is_null() {
        debug!("weekly schedule payload is not an object, using built-in hours");
    }

    let days = WEEKDAYS.map(|weekday| {
        let builtin = WeeklyDayConfig::builtin(weekday);
        let key = weekday_key(weekday).to_string();
        match entries.and_then(|map| map.get(&key)) {
            Some(entry) => normalize_day(entry, builtin, &key),
            None => builtin,
        }
    });

    WeeklySchedule::from_days(days)
}

fn normalize_day(entry: &Value, builtin: WeeklyDayConfig, key: &str) -> WeeklyDayConfig {
    let enabled = entry
        .get("enabled")
        .and_then(Value::as_bool)
        .unwrap_or(builtin.enabled);
    let open_time = normalize_time_of_day(field(entry, "openTime", "open_time"), builtin.open_time);
    let close_time =
        normalize_time_of_day(field(entry, "closeTime", "close_time"), builtin.close_time);

    if open_time < close_time {
        WeeklyDayConfig::new(enabled, open_time, close_time)
    } else {
        debug!(
            weekday = key,
            %open_time,
            %close_time,
            "weekly window does not open before it closes, using built-in hours"
        );
        WeeklyDayConfig::new(enabled, builtin.open_time, builtin.close_time)
    }
}

/// Normalize a holiday list.
///
/// Entries are either `{date, label?, category?}` objects or bare date
/// strings. Entries without a valid `YYYY-MM-DD` date are dropped. `category`
/// is `national` only on an exact match, otherwise `local`. A payload that is
/// not an array yields an empty set.
pub fn normalize_holidays(raw: &Value) -> HolidaySet {
    let Some(entries) = raw.as_array() else {
        if !raw.is_null() {
            debug!("holiday payload is not an array, ignoring it");
        }
        return HolidaySet::new();
    };

    let mut holidays = HolidaySet::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(holiday) = holiday_from_entry(entry) else {
            debug!(index, "dropping holiday entry without a valid date");
            continue;
        };
        if let Some(previous) = holidays.insert(holiday) {
            warn!(
                date = %previous.date,
                superseded = %previous.label,
                "duplicate holiday date, keeping the later entry"
            );
        }
    }
    holidays
}

fn holiday_from_entry(entry: &Value) -> Option<Holiday> {
    match entry {
        Value::String(raw) => {
            let date = parse_date(raw).ok()?;
            Some(Holiday::new(date, String::new(), HolidayCategory::Local))
        }
        Value::Object(_) => {
            let date = parse_date(entry.get("date")?.as_str()?).ok()?;
            let category =
                HolidayCategory::from_raw(entry.get("category").and_then(Value::as_str));
            Some(Holiday::new(date, text(entry, "label"), category))
        }
        _ => None,
    }
}

/// Normalize an exception list.
///
/// Entries without a valid `YYYY-MM-DD` date are dropped. A missing or
/// non-boolean `enabled` means `true`. Unreadable times default to
/// `08:00`/`18:00`, and an empty or inverted window reverts both times to that
/// pair. A payload that is not an array yields an empty table.
pub fn normalize_exceptions(raw: &Value) -> ExceptionTable {
    let Some(entries) = raw.as_array() else {
        if !raw.is_null() {
            debug!("exception payload is not an array, ignoring it");
        }
        return ExceptionTable::new();
    };

    let mut exceptions = ExceptionTable::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(exception) = exception_from_entry(entry) else {
            debug!(index, "dropping exception entry without a valid date");
            continue;
        };
        if let Some(previous) = exceptions.insert(exception) {
            warn!(
                date = %previous.date,
                superseded = %previous.reason,
                "duplicate exception date, keeping the later entry"
            );
        }
    }
    exceptions
}

fn exception_from_entry(entry: &Value) -> Option<ScheduleException> {
    let date = parse_date(entry.get("date")?.as_str()?).ok()?;
    let enabled = entry
        .get("enabled")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    let mut open_time =
        normalize_time_of_day(field(entry, "openTime", "open_time"), DEFAULT_EXCEPTION_OPEN);
    let mut close_time =
        normalize_time_of_day(field(entry, "closeTime", "close_time"), DEFAULT_EXCEPTION_CLOSE);

    if open_time >= close_time {
        debug!(
            %date,
            %open_time,
            %close_time,
            "exception window does not open before it closes, using 08:00-18:00"
        );
        open_time = DEFAULT_EXCEPTION_OPEN;
        close_time = DEFAULT_EXCEPTION_CLOSE;
    }

    Some(ScheduleException {
        date,
        enabled,
        open_time,
        close_time,
        reason: text(entry, "reason"),
    })
}

static NULL: Value = Value::Null;

/// Look up `camel`, then `snake`; `Null` when neither is present or `entry` is
/// not an object.
fn field<'a>(entry: &'a Value, camel: &str, snake: &str) -> &'a Value {
    entry
        .get(camel)
        .or_else(|| entry.get(snake))
        .unwrap_or(&NULL)
}

/// A trimmed string field, empty when missing or not a string.
fn text(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
