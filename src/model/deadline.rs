// src/model/deadline.rs

//! Task deadline.
//!
//! A deadline is always a single calendar day. It is stored as a timestamp
//! string of the form `dd/mm/yyyyT00:00:01Z`, one second past midnight UTC,
//! and displayed as `dd/mm/yyyy`.

use std::fmt;

use chrono::NaiveDate;

const DISPLAY_FORMAT: &str = "%d/%m/%Y";
const TIMESTAMP_SUFFIX: &str = "T00:00:01Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline {
    date: NaiveDate,
}

impl Deadline {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Parse a value previously produced by [`Deadline::timestamp`].
    pub fn parse_timestamp(s: &str) -> Option<Self> {
        let day = s.trim().strip_suffix(TIMESTAMP_SUFFIX)?;
        NaiveDate::parse_from_str(day, DISPLAY_FORMAT)
            .ok()
            .map(Self::new)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Replace the wrapped date, keeping the wrapper.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Stored form, e.g. `01/05/2017T00:00:01Z`.
    pub fn timestamp(&self) -> String {
        format!("{}{TIMESTAMP_SUFFIX}", self.display())
    }

    /// Display form, e.g. `01/05/2017`.
    pub fn display(&self) -> String {
        self.date.format(DISPLAY_FORMAT).to_string()
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
