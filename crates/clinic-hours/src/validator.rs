//! Check a proposed appointment against the resolved window of its date.
//!
//! Checks run cheapest first and stop at the first failure:
//!
//! 1. both instants parse and `end > start`;
//! 2. both instants fall on the same calendar date;
//! 3. the date is open;
//! 4. `start >= open` and `end <= close`.
//!
//! Rejections are values, never errors. Their `Display` text is shown to the
//! user verbatim.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::exception::ExceptionTable;
use crate::holiday::HolidaySet;
use crate::resolver::resolve_day;
use crate::schedule::WeeklySchedule;
use crate::time::{parse_datetime, TimeOfDay};

/// Why a slot was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotRejection {
    #[error("Invalid appointment start or end time")]
    InvalidInstant,

    #[error("Appointment end must be after its start")]
    EndNotAfterStart,

    #[error("Appointment must start and end on the same day")]
    SpansMidnight,

    /// Carries the resolver's reason for the closure.
    #[error("{0}")]
    Closed(String),

    #[error("Outside clinic hours: allowed {open} to {close}")]
    OutsideHours { open: TimeOfDay, close: TimeOfDay },
}

/// Accept/reject decision for the booking UI. `reason` is empty when valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub reason: String,
}

impl ValidationResult {
    pub fn accepted() -> Self {
        Self {
            valid: true,
            reason: String::new(),
        }
    }

    pub fn rejected(rejection: &SlotRejection) -> Self {
        Self {
            valid: false,
            reason: rejection.to_string(),
        }
    }
}

impl From<Result<(), SlotRejection>> for ValidationResult {
    fn from(outcome: Result<(), SlotRejection>) -> Self {
        match outcome {
            Ok(()) => Self::accepted(),
            Err(rejection) => Self::rejected(&rejection),
        }
    }
}

/// Typed slot check on already-parsed instants.
pub fn check_slot(
    start: NaiveDateTime,
    end: NaiveDateTime,
    weekly: &WeeklySchedule,
    holidays: &HolidaySet,
    exceptions: &ExceptionTable,
) -> Result<(), SlotRejection> {
    if end <= start {
        return Err(SlotRejection::EndNotAfterStart);
    }
    if start.date() != end.date() {
        return Err(SlotRejection::SpansMidnight);
    }

    let window = resolve_day(start.date(), weekly, holidays, exceptions);
    if window.closed {
        return Err(SlotRejection::Closed(window.reason));
    }

    if start.time() < window.open_time.to_naive_time()
        || end.time() > window.close_time.to_naive_time()
    {
        return Err(SlotRejection::OutsideHours {
            open: window.open_time,
            close: window.close_time,
        });
    }

    Ok(())
}

/// Validate raw start/end identifiers from the booking UI.
///
/// Accepted instant formats are those of [`parse_datetime`]. The result never
/// errors: unparseable input is a rejection like any other.
pub fn validate_slot(
    start: &str,
    end: &str,
    weekly: &WeeklySchedule,
    holidays: &HolidaySet,
    exceptions: &ExceptionTable,
) -> ValidationResult {
    let outcome = match (parse_datetime(start), parse_datetime(end)) {
        (Ok(start), Ok(end)) => check_slot(start, end, weekly, holidays, exceptions),
        _ => Err(SlotRejection::InvalidInstant),
    };
    if let Err(rejection) = &outcome {
        debug!(start, end, %rejection, "slot rejected");
    }
    outcome.into()
}
