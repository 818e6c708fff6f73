//! # clinic-hours
//!
//! Opening-hours resolution and appointment slot validation for a clinic.
//!
//! Three operator-edited configuration sources decide whether the clinic is
//! open on a given date: a recurring weekly table, a set of holidays, and a set
//! of per-date exceptions. The engine normalizes those sources from untrusted
//! JSON, resolves any date into one open/closed window under fixed precedence
//! (exception, then holiday, then weekly table), and checks proposed
//! appointment slots against that window.
//!
//! Everything operates on naive local wall-clock values. Nothing here performs
//! I/O or keeps state between calls.
//!
//! ## Quick start
//!
//! ```rust
//! use clinic_hours::ClinicCalendar;
//!
//! let calendar = ClinicCalendar::from_json(r#"{
//!     "weeklySchedule": {"1": {"enabled": true, "openTime": "08:00", "closeTime": "14:00"}},
//!     "holidays": [{"date": "2024-12-25", "label": "Natal", "category": "national"}]
//! }"#).unwrap();
//!
//! // 2024-12-23 is a Monday.
//! assert!(calendar.validate_slot("2024-12-23T09:00", "2024-12-23T09:30").valid);
//!
//! let rejected = calendar.validate_slot("2024-12-25T10:00", "2024-12-25T10:30");
//! assert!(!rejected.valid);
//! assert_eq!(rejected.reason, "Natal");
//! ```
//!
//! ## Modules
//!
//! - [`time`] — `HH:MM` / `YYYY-MM-DD` / instant parsing, [`TimeOfDay`]
//! - [`normalize`] — untrusted JSON → canonical structures, never failing
//! - [`schedule`] — the seven-entry weekly table
//! - [`holiday`] — date-keyed closed days
//! - [`exception`] — date-keyed overrides
//! - [`resolver`] — precedence resolution of one date
//! - [`validator`] — slot checks with user-facing reasons
//! - [`slots`] — bookable slot enumeration
//! - [`calendar`] — [`ClinicCalendar`], one configuration snapshot
//! - [`error`] — Error types

pub mod calendar;
pub mod error;
pub mod exception;
pub mod holiday;
pub mod normalize;
pub mod resolver;
pub mod schedule;
pub mod slots;
pub mod time;
pub mod validator;

pub use calendar::ClinicCalendar;
pub use error::ClinicError;
pub use exception::{ExceptionTable, ScheduleException};
pub use holiday::{Holiday, HolidayCategory, HolidaySet};
pub use normalize::{
    normalize_exceptions, normalize_holidays, normalize_time_of_day, normalize_weekly_schedule,
};
pub use resolver::{resolve_day, ResolvedDay, ResolvedDayWindow, WindowSource};
pub use schedule::{WeeklyDayConfig, WeeklySchedule};
pub use slots::{available_slots, BookableSlot};
pub use time::TimeOfDay;
pub use validator::{check_slot, validate_slot, SlotRejection, ValidationResult};
