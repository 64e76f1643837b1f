// SPDX-License-Identifier: MIT

//!
//! Axis markers (ticks and their labels).
//!
//! How finely the axis is divided depends only on the scale: days when a day
//! is wide, then months, then years in steps of 1, 10, 100 or 1000.
//!

use crate::{MAX_MARKERS, date_to_x, floor_to_multiple, x_to_date_floor};
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

/// How finely the axis is divided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Granularity {
    Day,
    Month,
    Year { interval: i32 },
}

impl Granularity {
    pub fn for_scale(scale: f64) -> Self {
        if scale > 15.0 {
            Granularity::Day
        } else if scale > 1.5 {
            Granularity::Month
        } else if scale > 0.1 {
            Granularity::Year { interval: 1 }
        } else if scale > 0.01 {
            Granularity::Year { interval: 10 }
        } else if scale > 0.001 {
            Granularity::Year { interval: 100 }
        } else {
            Granularity::Year { interval: 1000 }
        }
    }
}

/// A tick on the axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub x: f64,
    pub label: String,

    /// Major markers start a bigger unit (a month, a year, or a run of ten
    /// intervals)
    pub is_major: bool,
}

/// Compute the markers for a viewport `width` pixels wide.  The first marker
/// may lie a little left of the screen (it's snapped back to the start of its
/// unit).  Never more than [`MAX_MARKERS`] are returned.
pub fn compute_markers(scale: f64, offset: f64, width: f64) -> Vec<Marker> {
    let start = x_to_date_floor(0.0, scale, offset);
    let end = x_to_date_floor(width, scale, offset);
    let marker = |date: NaiveDate, label: String, is_major: bool| Marker {
        x: date_to_x(date, scale, offset),
        label,
        is_major,
    };

    let mut markers = Vec::new();
    match Granularity::for_scale(scale) {
        Granularity::Day => {
            let mut cursor = Some(start);
            for _ in 0..MAX_MARKERS {
                let Some(date) = cursor.filter(|date| *date <= end) else {
                    break;
                };
                markers.push(marker(date, date.format("%-d %b").to_string(), date.day() == 1));
                cursor = date.succ_opt();
            }
        }
        Granularity::Month => {
            let mut cursor = start.with_day(1);
            for _ in 0..MAX_MARKERS {
                let Some(date) = cursor.filter(|date| *date <= end) else {
                    break;
                };
                markers.push(marker(
                    date,
                    date.format("%b %Y").to_string(),
                    date.month() == 1,
                ));
                cursor = date.checked_add_months(Months::new(1));
            }
        }
        Granularity::Year { interval } => {
            // Snapping down can pass the earliest representable year
            let min_year = NaiveDate::MIN.year();
            let mut first_year = floor_to_multiple(start.year(), interval);
            if first_year < min_year {
                first_year = floor_to_multiple(min_year, interval);
                if first_year < min_year {
                    first_year += interval;
                }
            }
            let mut year = Some(first_year);
            for _ in 0..MAX_MARKERS {
                let Some(date) = year
                    .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
                    .filter(|date| *date <= end)
                else {
                    break;
                };
                if date.year().rem_euclid(interval) == 0 {
                    markers.push(marker(
                        date,
                        date.year().to_string(),
                        date.year().rem_euclid(interval * 10) == 0,
                    ));
                }
                year = date.year().checked_add(interval);
            }
        }
    }
    markers
}
