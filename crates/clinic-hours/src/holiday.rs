//! Fixed fully-closed dates.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayCategory {
    National,
    #[default]
    Local,
}

impl HolidayCategory {
    /// `"national"` on an exact match, `Local` for anything else.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("national") => Self::National,
            _ => Self::Local,
        }
    }
}

/// A date on which the clinic is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub date: NaiveDate,
    /// Shown to the user when a booking on this date is rejected. May be empty.
    pub label: String,
    pub category: HolidayCategory,
}

impl Holiday {
    pub fn new(date: NaiveDate, label: impl Into<String>, category: HolidayCategory) -> Self {
        Self {
            date,
            label: label.into(),
            category,
        }
    }
}

/// Holidays keyed by date, at most one per date, iterated in ascending date
/// order.
///
/// Deserializing goes through [`normalize_holidays`]; serializing yields an
/// ascending JSON array.
///
/// [`normalize_holidays`]: crate::normalize::normalize_holidays
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "Vec<Holiday>")]
pub struct HolidaySet {
    by_date: BTreeMap<NaiveDate, Holiday>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a holiday, returning the entry it replaced on the same date.
    pub fn insert(&mut self, holiday: Holiday) -> Option<Holiday> {
        self.by_date.insert(holiday.date, holiday)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Holiday> {
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

    pub fn iter(&self) -> impl Iterator<Item = &Holiday> {
        self.by_date.values()
    }
}

/// Later holidays replace earlier ones on the same date.
impl FromIterator<Holiday> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = Holiday>>(iter: I) -> Self {
        let mut set = Self::new();
        for holiday in iter {
            set.insert(holiday);
        }
        set
    }
}

impl From<serde_json::Value> for HolidaySet {
    fn from(raw: serde_json::Value) -> Self {
        crate::normalize::normalize_holidays(&raw)
    }
}

impl From<HolidaySet> for Vec<Holiday> {
    fn from(set: HolidaySet) -> Self {
        set.by_date.into_values().collect()
    }
}
