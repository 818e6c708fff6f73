//! Resolve one calendar date into an open/closed window.
//!
//! Three layers are consulted in fixed precedence, first match wins:
//!
//! 1. an exception for the date (re-open with custom hours, or close);
//! 2. a holiday on the date (closed);
//! 3. the weekly table entry for the date's ISO weekday.
//!
//! A closed result always carries the window `00:00–00:00`, whichever layer
//! closed it.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::exception::ExceptionTable;
use crate::holiday::HolidaySet;
use crate::schedule::WeeklySchedule;
use crate::time::{parse_date, TimeOfDay};

pub const CLOSED_BY_EXCEPTION: &str = "Closed by schedule exception";
pub const SPECIAL_HOURS: &str = "Special hours for this date";
pub const SPECIAL_HOURS_PREFIX: &str = "Special hours: ";
pub const HOLIDAY: &str = "Holiday";
pub const CLOSED_WEEKDAY: &str = "Closed on this weekday";

/// Which configuration layer decided a [`ResolvedDayWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowSource {
    Exception,
    Holiday,
    Weekly,
}

/// The outcome of resolving one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDayWindow {
    pub closed: bool,
    pub open_time: TimeOfDay,
    pub close_time: TimeOfDay,
    /// User-facing explanation. Empty for an ordinary weekly open day.
    pub reason: String,
    pub source: WindowSource,
}

impl ResolvedDayWindow {
    fn open(open_time: TimeOfDay, close_time: TimeOfDay, reason: String, source: WindowSource) -> Self {
        Self {
            closed: false,
            open_time,
            close_time,
            reason,
            source,
        }
    }

    fn closed(reason: String, source: WindowSource) -> Self {
        Self {
            closed: true,
            open_time: TimeOfDay::MIDNIGHT,
            close_time: TimeOfDay::MIDNIGHT,
            reason,
            source,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Whether `start..end` lies inside the window. Always `false` when closed.
    pub fn contains(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.is_open()
            && start >= self.open_time.to_naive_time()
            && end <= self.close_time.to_naive_time()
            && start < end
    }

    /// `"HH:MM to HH:MM"`.
    pub fn describe_hours(&self) -> String {
        format!("{} to {}", self.open_time, self.close_time)
    }
}

/// A resolved window together with its date, for calendar views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDay {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub window: ResolvedDayWindow,
}

/// Resolve `date` against the three configuration layers.
pub fn resolve_day(
    date: NaiveDate,
    weekly: &WeeklySchedule,
    holidays: &HolidaySet,
    exceptions: &ExceptionTable,
) -> ResolvedDayWindow {
    if let Some(exception) = exceptions.get(date) {
        trace!(%date, enabled = exception.enabled, "resolved by exception");
        return if exception.enabled {
            let reason = if exception.reason.is_empty() {
                SPECIAL_HOURS.to_string()
            } else {
                format!("{SPECIAL_HOURS_PREFIX}{}", exception.reason)
            };
            ResolvedDayWindow::open(
                exception.open_time,
                exception.close_time,
                reason,
                WindowSource::Exception,
            )
        } else {
            let reason = non_empty_or(&exception.reason, CLOSED_BY_EXCEPTION);
            ResolvedDayWindow::closed(reason, WindowSource::Exception)
        };
    }

    if let Some(holiday) = holidays.get(date) {
        trace!(%date, label = %holiday.label, "resolved by holiday");
        let reason = non_empty_or(&holiday.label, HOLIDAY);
        return ResolvedDayWindow::closed(reason, WindowSource::Holiday);
    }

    let day = weekly.for_date(date);
    trace!(%date, enabled = day.enabled, "resolved by weekly table");
    if day.enabled {
        ResolvedDayWindow::open(day.open_time, day.close_time, String::new(), WindowSource::Weekly)
    } else {
        ResolvedDayWindow::closed(CLOSED_WEEKDAY.to_string(), WindowSource::Weekly)
    }
}

/// [`resolve_day`] for a raw `YYYY-MM-DD` identifier; `None` when it does not
/// parse.
pub fn resolve_date_str(
    raw_date: &str,
    weekly: &WeeklySchedule,
    holidays: &HolidaySet,
    exceptions: &ExceptionTable,
) -> Option<ResolvedDayWindow> {
    let date = parse_date(raw_date).ok()?;
    Some(resolve_day(date, weekly, holidays, exceptions))
}

fn non_empty_or(text: &str, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}
