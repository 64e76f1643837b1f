// SPDX-License-Identifier: MIT

//!
//! Mapping between calendar dates and screen x coordinates.
//!
//! A date's x is its whole-day distance from [`EPOCH`] multiplied by the scale
//! (pixels per day) plus the offset (the screen x of the epoch itself).
//!

use chrono::{Days, NaiveDate};
use log::trace;
use timeline_pro_core::{EventDate, date};

/// The date that sits at x = `offset`
pub const EPOCH: NaiveDate = date!("1970-01-01");

/// The whole number of days from `from` to `to` (negative if `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Move a date by a (possibly fractional, possibly huge) number of days.  The
/// result is rounded to the nearest day and saturates at the ends of the
/// representable calendar.
pub fn add_days_saturating(date: NaiveDate, days: f64) -> NaiveDate {
    if days.is_nan() {
        return date;
    }
    let days = days.round();
    if days >= 0.0 {
        let days = if days >= u64::MAX as f64 { u64::MAX } else { days as u64 };
        date.checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX)
    } else {
        let days = if -days >= u64::MAX as f64 { u64::MAX } else { (-days) as u64 };
        date.checked_sub_days(Days::new(days))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// The screen x of a date
pub fn date_to_x(date: NaiveDate, scale: f64, offset: f64) -> f64 {
    (days_between(EPOCH, date) as f64) * scale + offset
}

/// The screen x of an [`EventDate`].  A date that didn't parse sits at 0.
pub fn event_date_to_x(date: &EventDate, scale: f64, offset: f64) -> f64 {
    match date.date() {
        Some(date) => date_to_x(date, scale, offset),
        None => {
            trace!("unparseable date `{date}` mapped to x = 0");
            0.0
        }
    }
}

/// The date at a screen x (to the nearest day)
pub fn x_to_date(pixel: f64, scale: f64, offset: f64) -> NaiveDate {
    add_days_saturating(EPOCH, (pixel - offset) / scale)
}

/// The date at a screen x, rounded down to the day it falls within
pub(crate) fn x_to_date_floor(pixel: f64, scale: f64, offset: f64) -> NaiveDate {
    add_days_saturating(EPOCH, ((pixel - offset) / scale).floor())
}
