//! Date normalization for category attributes.
//!
//! Date setters accept either a chrono date type or raw components and always
//! store the same `YYYY-MM-DD` text.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

const ISO_DATE: &str = "%Y-%m-%d";

/// Something that names a calendar day.
///
/// Implemented for chrono dates and for `(year, month, day)`, `(year, month)`
/// and bare `year` components. Missing components default to `1`.
pub trait IntoDate {
    /// Converts into a calendar date.
    fn into_date(self) -> Result<NaiveDate>;
}

impl IntoDate for NaiveDate {
    fn into_date(self) -> Result<NaiveDate> {
        Ok(self)
    }
}

impl IntoDate for NaiveDateTime {
    fn into_date(self) -> Result<NaiveDate> {
        Ok(self.date())
    }
}

impl<Tz: TimeZone> IntoDate for DateTime<Tz> {
    fn into_date(self) -> Result<NaiveDate> {
        Ok(self.date_naive())
    }
}

impl IntoDate for (i32, u32, u32) {
    fn into_date(self) -> Result<NaiveDate> {
        let (year, month, day) = self;
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            Error::invalid_date(format!("{:04}-{:02}-{:02}", year, month, day))
        })
    }
}

impl IntoDate for (i32, u32) {
    fn into_date(self) -> Result<NaiveDate> {
        (self.0, self.1, 1).into_date()
    }
}

impl IntoDate for i32 {
    fn into_date(self) -> Result<NaiveDate> {
        (self, 1, 1).into_date()
    }
}

/// Normalizes a date to `YYYY-MM-DD`.
pub fn iso_date<D: IntoDate>(date: D) -> Result<String> {
    Ok(date.into_date()?.format(ISO_DATE).to_string())
}
