//! The recurring weekly opening-hours table.
//!
//! Exactly one [`WeeklyDayConfig`] per ISO weekday, stored in a fixed array
//! indexed from Monday. On the wire the table is an object keyed `"1"` (Monday)
//! through `"7"` (Sunday).

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;

/// ISO weekdays in key order (`1` = Monday … `7` = Sunday).
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const fn at(hour: u32, minute: u32) -> TimeOfDay {
    match TimeOfDay::from_hm(hour, minute) {
        Some(t) => t,
        None => TimeOfDay::MIDNIGHT,
    }
}

const WEEKDAY_DEFAULT: WeeklyDayConfig = WeeklyDayConfig::new(true, at(8, 0), at(18, 0));
const SATURDAY_DEFAULT: WeeklyDayConfig = WeeklyDayConfig::new(true, at(8, 0), at(12, 0));
const SUNDAY_DEFAULT: WeeklyDayConfig = WeeklyDayConfig::new(false, at(8, 0), at(12, 0));

/// Open/closed state and hours for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyDayConfig {
    pub enabled: bool,
    pub open_time: TimeOfDay,
    pub close_time: TimeOfDay,
}

impl WeeklyDayConfig {
    pub const fn new(enabled: bool, open_time: TimeOfDay, close_time: TimeOfDay) -> Self {
        Self {
            enabled,
            open_time,
            close_time,
        }
    }

    /// The built-in configuration for `weekday`: Monday to Friday 08:00–18:00,
    /// Saturday 08:00–12:00, Sunday closed.
    pub const fn builtin(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sat => SATURDAY_DEFAULT,
            Weekday::Sun => SUNDAY_DEFAULT,
            _ => WEEKDAY_DEFAULT,
        }
    }

    pub fn has_valid_window(&self) -> bool {
        self.open_time < self.close_time
    }
}

/// Map a weekday to its configuration key (Monday = 1, Sunday = 7).
pub fn weekday_key(weekday: Weekday) -> u32 {
    weekday.number_from_monday()
}

/// Seven fully populated weekday entries, each with `open_time < close_time`.
///
/// Deserializing goes through [`normalize_weekly_schedule`], so any JSON value
/// produces a valid table.
///
/// [`normalize_weekly_schedule`]: crate::normalize::normalize_weekly_schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "BTreeMap<String, WeeklyDayConfig>")]
pub struct WeeklySchedule {
    days: [WeeklyDayConfig; 7],
}

impl WeeklySchedule {
    /// Build a table from explicit entries (Monday first). An entry whose
    /// window is empty or inverted is replaced by the built-in entry for that
    /// weekday.
    pub fn from_days(days: [WeeklyDayConfig; 7]) -> Self {
        let mut repaired = days;
        for (slot, weekday) in repaired.iter_mut().zip(WEEKDAYS) {
            if !slot.has_valid_window() {
                *slot = WeeklyDayConfig::builtin(weekday);
            }
        }
        Self { days: repaired }
    }

    /// Replace one weekday, with the same repair rule as [`Self::from_days`].
    pub fn with_day(mut self, weekday: Weekday, config: WeeklyDayConfig) -> Self {
        let index = weekday.num_days_from_monday() as usize;
        if let Some(slot) = self.days.get_mut(index) {
            *slot = if config.has_valid_window() {
                config
            } else {
                WeeklyDayConfig::builtin(weekday)
            };
        }
        self
    }

    pub fn day(&self, weekday: Weekday) -> &WeeklyDayConfig {
        // num_days_from_monday is always 0..=6
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn for_date(&self, date: NaiveDate) -> &WeeklyDayConfig {
        self.day(date.weekday())
    }

    /// Entries in key order, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &WeeklyDayConfig)> {
        WEEKDAYS.into_iter().zip(self.days.iter())
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            days: WEEKDAYS.map(WeeklyDayConfig::builtin),
        }
    }
}

impl From<serde_json::Value> for WeeklySchedule {
    fn from(raw: serde_json::Value) -> Self {
        crate::normalize::normalize_weekly_schedule(&raw)
    }
}

impl From<WeeklySchedule> for BTreeMap<String, WeeklyDayConfig> {
    fn from(schedule: WeeklySchedule) -> Self {
        schedule
            .iter()
            .map(|(weekday, config)| (weekday_key(weekday).to_string(), *config))
            .collect()
    }
}
