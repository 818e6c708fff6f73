//! Per-date overrides of the weekly table.
//!
//! An exception either re-opens a date with its own hours (even a holiday) or
//! force-closes it. Exceptions outrank both holidays and the weekly table.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;

/// Window used when an exception omits its hours or gives an invalid pair.
pub const DEFAULT_EXCEPTION_OPEN: TimeOfDay = match TimeOfDay::from_hm(8, 0) {
    Some(t) => t,
    None => TimeOfDay::MIDNIGHT,
};
pub const DEFAULT_EXCEPTION_CLOSE: TimeOfDay = match TimeOfDay::from_hm(18, 0) {
    Some(t) => t,
    None => TimeOfDay::MIDNIGHT,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleException {
    pub date: NaiveDate,
    /// `true` re-opens the date with `open_time..close_time`; `false` closes it.
    pub enabled: bool,
    pub open_time: TimeOfDay,
    pub close_time: TimeOfDay,
    pub reason: String,
}

impl ScheduleException {
    /// An exception opening `date` with custom hours. An empty or inverted
    /// window falls back to 08:00–18:00.
    pub fn open(
        date: NaiveDate,
        open_time: TimeOfDay,
        close_time: TimeOfDay,
        reason: impl Into<String>,
    ) -> Self {
        let (open_time, close_time) = if open_time < close_time {
            (open_time, close_time)
        } else {
            (DEFAULT_EXCEPTION_OPEN, DEFAULT_EXCEPTION_CLOSE)
        };
        Self {
            date,
            enabled: true,
            open_time,
            close_time,
            reason: reason.into(),
        }
    }

    /// An exception closing `date`.
    pub fn closed(date: NaiveDate, reason: impl Into<String>) -> Self {
        Self {
            date,
            enabled: false,
            open_time: DEFAULT_EXCEPTION_OPEN,
            close_time: DEFAULT_EXCEPTION_CLOSE,
            reason: reason.into(),
        }
    }
}

/// Exceptions keyed by date, at most one per date, iterated in ascending date
/// order.
///
/// Deserializing goes through [`normalize_exceptions`]; serializing yields an
/// ascending JSON array.
///
/// [`normalize_exceptions`]: crate::normalize::normalize_exceptions
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "Vec<ScheduleException>")]
pub struct ExceptionTable {
    by_date: BTreeMap<NaiveDate, ScheduleException>,
}

impl ExceptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an exception, returning the entry it replaced on the same date.
    pub fn insert(&mut self, exception: ScheduleException) -> Option<ScheduleException> {
        self.by_date.insert(exception.date, exception)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&ScheduleException> {
        self.by_date.get(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleException> {
        self.by_date.values()
    }
}

/// Later exceptions replace earlier ones on the same date.
impl FromIterator<ScheduleException> for ExceptionTable {
    fn from_iter<I: IntoIterator<Item = ScheduleException>>(iter: I) -> Self {
        let mut table = Self::new();
        for exception in iter {
            table.insert(exception);
        }
        table
    }
}

impl From<serde_json::Value> for ExceptionTable {
    fn from(raw: serde_json::Value) -> Self {
        crate::normalize::normalize_exceptions(&raw)
    }
}

impl From<ExceptionTable> for Vec<ScheduleException> {
    fn from(table: ExceptionTable) -> Self {
        table.by_date.into_values().collect()
    }
}
