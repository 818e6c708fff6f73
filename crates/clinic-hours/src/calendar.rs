//! One immutable snapshot of a clinic's configuration.
//!
//! `ClinicCalendar` bundles the normalized weekly table, holidays and
//! exceptions loaded for a session, and exposes the resolver, validator and
//! slot enumeration as methods. It is plain data: clone it freely and share it
//! across threads.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClinicError, Result};
use crate::exception::ExceptionTable;
use crate::holiday::HolidaySet;
use crate::normalize::{normalize_exceptions, normalize_holidays, normalize_weekly_schedule};
use crate::resolver::{self, ResolvedDay, ResolvedDayWindow};
use crate::schedule::WeeklySchedule;
use crate::slots::{self, BookableSlot};
use crate::validator::{self, SlotRejection, ValidationResult};

/// Longest span [`ClinicCalendar::resolve_range`] accepts, in days (inclusive).
pub const MAX_RANGE_DAYS: i64 = 366;

/// The JSON document shape is
/// `{"weeklySchedule": {...}, "holidays": [...], "exceptions": [...]}`.
/// Missing fields normalize as if they were `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicCalendar {
    pub weekly_schedule: WeeklySchedule,
    pub holidays: HolidaySet,
    pub exceptions: ExceptionTable,
}

impl ClinicCalendar {
    pub fn new(
        weekly_schedule: WeeklySchedule,
        holidays: HolidaySet,
        exceptions: ExceptionTable,
    ) -> Self {
        Self {
            weekly_schedule,
            holidays,
            exceptions,
        }
    }

    /// Normalize the three raw payloads.
    pub fn from_payloads(weekly: &Value, holidays: &Value, exceptions: &Value) -> Self {
        Self {
            weekly_schedule: normalize_weekly_schedule(weekly),
            holidays: normalize_holidays(holidays),
            exceptions: normalize_exceptions(exceptions),
        }
    }

    /// Parse and normalize a configuration document.
    ///
    /// # Errors
    /// Returns `ClinicError::Json` only when `json` is not a JSON object.
    /// Malformed entries inside it are normalized, not reported.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn resolve_day(&self, date: NaiveDate) -> ResolvedDayWindow {
        resolver::resolve_day(date, &self.weekly_schedule, &self.holidays, &self.exceptions)
    }

    pub fn resolve_date_str(&self, raw_date: &str) -> Option<ResolvedDayWindow> {
        resolver::resolve_date_str(
            raw_date,
            &self.weekly_schedule,
            &self.holidays,
            &self.exceptions,
        )
    }

    pub fn check_slot(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> std::result::Result<(), SlotRejection> {
        validator::check_slot(start, end, &self.weekly_schedule, &self.holidays, &self.exceptions)
    }

    pub fn validate_slot(&self, start: &str, end: &str) -> ValidationResult {
        validator::validate_slot(start, end, &self.weekly_schedule, &self.holidays, &self.exceptions)
    }

    pub fn available_slots(
        &self,
        date: NaiveDate,
        duration_minutes: u32,
        step_minutes: u32,
    ) -> Vec<BookableSlot> {
        slots::available_slots(
            date,
            duration_minutes,
            step_minutes,
            &self.weekly_schedule,
            &self.holidays,
            &self.exceptions,
        )
    }

    /// Resolve every date in `from..=to`.
    ///
    /// # Errors
    /// Returns `ClinicError::InvalidRange` when `from > to` or the range covers
    /// more than [`MAX_RANGE_DAYS`] dates.
    pub fn resolve_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ResolvedDay>> {
        if from > to || (to - from).num_days() >= MAX_RANGE_DAYS {
            return Err(ClinicError::InvalidRange { from, to });
        }
        Ok(from
            .iter_days()
            .take_while(|date| *date <= to)
            .map(|date| ResolvedDay {
                date,
                window: self.resolve_day(date),
            })
            .collect())
    }

    /// The first open date among the `horizon_days` dates starting at `from`.
    pub fn next_open_day(&self, from: NaiveDate, horizon_days: u32) -> Option<ResolvedDay> {
        from.iter_days()
            .take(horizon_days as usize)
            .map(|date| ResolvedDay {
                date,
                window: self.resolve_day(date),
            })
            .find(|day| day.window.is_open())
    }
}
