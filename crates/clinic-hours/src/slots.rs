//! Enumerate bookable appointment slots inside a date's resolved window.
//!
//! Walks the window from its open time in fixed steps and keeps every
//! `[t, t + duration)` that ends at or before close. Every slot returned is
//! accepted by [`check_slot`](crate::validator::check_slot).

use std::iter;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

use crate::exception::ExceptionTable;
use crate::holiday::HolidaySet;
use crate::resolver::resolve_day;
use crate::schedule::WeeklySchedule;

/// A candidate appointment that fits the clinic's hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookableSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// All slots of `duration_minutes` on `date`, starting every `step_minutes`
/// from the open time.
///
/// Closed days, a zero duration and a zero step all yield no slots.
pub fn available_slots(
    date: NaiveDate,
    duration_minutes: u32,
    step_minutes: u32,
    weekly: &WeeklySchedule,
    holidays: &HolidaySet,
    exceptions: &ExceptionTable,
) -> Vec<BookableSlot> {
    let window = resolve_day(date, weekly, holidays, exceptions);
    if window.closed || duration_minutes == 0 || step_minutes == 0 {
        return Vec::new();
    }

    let midnight = date.and_time(NaiveTime::MIN);
    let close = window.close_time.minutes();

    // Oversized durations and steps end the walk instead of overflowing.
    iter::successors(Some(window.open_time.minutes()), |start| start.checked_add(step_minutes))
        .take_while(|start| {
            start
                .checked_add(duration_minutes)
                .is_some_and(|end| end <= close)
        })
        .map(|start| {
            let start_at = midnight + TimeDelta::minutes(i64::from(start));
            BookableSlot {
                start: start_at,
                end: start_at + TimeDelta::minutes(i64::from(duration_minutes)),
            }
        })
        .collect()
}
