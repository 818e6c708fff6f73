//! Wall-clock time and date helpers.
//!
//! Everything here works on naive local values: `HH:MM` times of day,
//! `YYYY-MM-DD` dates and appointment instants without a time zone. Parsing is
//! strict on shape so that `7:5` or `2024-1-05` never sneak through the
//! normalizers as valid configuration.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ClinicError, Result};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day with minute precision, stored as minutes since
/// midnight (`0..=1439`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// `00:00`, also used as the window of a closed day.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Build from hour and minute; `None` when out of range.
    pub const fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay((hour * 60 + minute) as u16))
        } else {
            None
        }
    }

    /// Build from minutes since midnight; `None` past `23:59`.
    pub const fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes < MINUTES_PER_DAY as u32 {
            Some(TimeOfDay(minutes as u16))
        } else {
            None
        }
    }

    /// Truncates seconds and sub-second precision.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        TimeOfDay((time.hour() * 60 + time.minute()) as u16)
    }

    pub const fn minutes(self) -> u32 {
        self.0 as u32
    }

    pub const fn hour(self) -> u32 {
        self.0 as u32 / 60
    }

    pub const fn minute(self) -> u32 {
        self.0 as u32 % 60
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::MIN + TimeDelta::minutes(i64::from(self.0))
    }

    /// Strict `HH:MM` parse: two digits, a colon, two digits.
    pub fn parse_strict(raw: &str) -> Option<Self> {
        let bytes = raw.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return None;
        }
        let digit = |b: u8| b.is_ascii_digit().then(|| u32::from(b - b'0'));
        let hour = digit(bytes[0])? * 10 + digit(bytes[1])?;
        let minute = digit(bytes[3])? * 10 + digit(bytes[4])?;
        Self::from_hm(hour, minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_strict(s).ok_or_else(|| ClinicError::InvalidTime(s.to_string()))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Whether `raw` has the exact `YYYY-MM-DD` shape (ASCII digits, dashes at
/// positions 4 and 7). Says nothing about the date existing.
pub fn is_date_shaped(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// # Errors
/// Returns `ClinicError::InvalidDate` when the shape is wrong or the date does
/// not exist (e.g. `2023-02-29`).
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if !is_date_shaped(raw) {
        return Err(ClinicError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ClinicError::InvalidDate(raw.to_string()))
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Whether `raw` starts with `YYYY-MM-DD`, a `T` or space, then `HH:MM` and
/// an optional `:SS` below 60. Anything after that (fraction, offset) is left
/// to chrono.
fn is_instant_shaped(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let two_digits = |at: usize| bytes.get(at..at + 2).is_some_and(|d| d.iter().all(u8::is_ascii_digit));

    let head_ok = raw.get(..10).is_some_and(is_date_shaped)
        && matches!(bytes.get(10), Some(b'T' | b't' | b' '))
        && two_digits(11)
        && bytes.get(13) == Some(&b':')
        && two_digits(14);
    if !head_ok {
        return false;
    }
    match bytes.get(16) {
        None => true,
        // No leap seconds.
        Some(b':') => two_digits(17) && bytes[17] < b'6',
        Some(_) => false,
    }
}

/// Parse an appointment instant as a naive local date-time.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]` (or a space instead of `T`) with every
/// component zero-padded. An RFC 3339
/// value with an offset is accepted too; the offset is dropped and the local
/// wall-clock part kept as-is, without any time-zone conversion.
///
/// # Errors
/// Returns `ClinicError::InvalidDateTime` when no accepted format matches.
pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    if !is_instant_shaped(raw) {
        return Err(ClinicError::InvalidDateTime(raw.to_string()));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| ClinicError::InvalidDateTime(raw.to_string()))
}

/// Minutes since midnight of a wall-clock time, ignoring seconds.
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    TimeOfDay::from_naive_time(time).minutes()
}
