// SPDX-License-Identifier: MIT

//!
//! The Timeline Pro event date type
//!

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::Display;
use thiserror::Error;

/// Errors that can arise in relation to an [`EventDate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The string isn't a recognised calendar date
    #[error("`{0}` is not a valid date")]
    Unparseable(String),
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times (e.g. `2026-10-16T09:30:00Z`,
/// the date part as written is used), and `YYYY-MM-DDTHH:MM:SS` without a
/// zone.  Surrounding whitespace is ignored.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, DateError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(date_time.date_naive());
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(date_time.date());
    }
    Err(DateError::Unparseable(value.to_string()))
}

/// A date as entered by a user or found in an imported document.
///
/// The raw string is always kept (so that documents round trip untouched)
/// alongside the calendar date it parses to, if it parses at all.  Rendering
/// must tolerate partially bad data, so an [`EventDate`] can always be built;
/// callers decide what an unparseable date means for them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventDate {
    raw: String,
    date: Option<NaiveDate>,
}

impl EventDate {
    /// Create an [`EventDate`] from any string (valid or not)
    pub fn parse<S: Into<String>>(raw: S) -> Self {
        let raw = raw.into();
        let date = parse_calendar_date(&raw).ok();
        Self { raw, date }
    }

    /// Create an [`EventDate`] from a known calendar date
    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            raw: date.format("%Y-%m-%d").to_string(),
            date: Some(date),
        }
    }

    /// Today's (local) date
    pub fn today() -> Self {
        Self::from_naive(Local::now().date_naive())
    }

    /// The calendar date, if the raw value parsed
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// The calendar date, or an error naming the raw value
    pub fn try_date(&self) -> Result<NaiveDate, DateError> {
        self.date
            .ok_or_else(|| DateError::Unparseable(self.raw.clone()))
    }

    /// Whether the raw value parsed to a calendar date
    pub fn is_valid(&self) -> bool {
        self.date.is_some()
    }

    /// The value as it was entered
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// e.g. `Jan 5, 2020` (the raw value is returned if it didn't parse)
    pub fn as_long_date_format(&self) -> String {
        match self.date {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None => self.raw.clone(),
        }
    }
}

impl From<NaiveDate> for EventDate {
    fn from(value: NaiveDate) -> Self {
        EventDate::from_naive(value)
    }
}

impl Display for EventDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

// Valid dates sort chronologically and before all invalid ones
impl Ord for EventDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.date.is_none(), self.date, &self.raw).cmp(&(
            other.date.is_none(),
            other.date,
            &other.raw,
        ))
    }
}

impl PartialOrd for EventDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for EventDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(EventDate::parse(raw))
    }
}
