//! Error types for clinic-hours operations.
//!
//! Normalization and slot validation never return these: malformed
//! configuration is defaulted and bad slots become a [`ValidationResult`].
//! `ClinicError` covers the strict parsing entry points only.
//!
//! [`ValidationResult`]: crate::validator::ValidationResult

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Invalid time of day (expected HH:MM): {0}")]
    InvalidTime(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("Invalid date range: {from} to {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("Configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClinicError>;
