//! Unvalidated date fields and the free-form parser that produces them.
//!
//! A [`CandidateDate`] may hold any combination of numbers. Nothing outside
//! this module can turn one into a [`Date`] without going through
//! [`CandidateDate::validate`].

use std::fmt;

use crate::consts::{FIELD_SEPARATORS, MIN_DAY};
use crate::types::{Day, Era, Month, Year};
use crate::{Date, ValidationError, write_date};

/// Date fields as read from input, before any calendar checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateDate {
    day:   i64,
    month: i64,
    year:  u32,
    era:   Era,
}

impl Default for CandidateDate {
    /// Day, month and year default to 1; the era defaults to [`Era::BC`].
    fn default() -> Self {
        Self {
            day:   i64::from(MIN_DAY),
            month: i64::from(MIN_DAY),
            year:  u32::from(MIN_DAY),
            era:   Era::default(),
        }
    }
}

impl CandidateDate {
    pub const fn new(day: i64, month: i64, year: u32, era: Era) -> Self {
        Self {
            day,
            month,
            year,
            era,
        }
    }

    #[must_use]
    pub const fn day(mut self, day: i64) -> Self {
        self.day = day;
        self
    }

    #[must_use]
    pub const fn month(mut self, month: i64) -> Self {
        self.month = month;
        self
    }

    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = year;
        self
    }

    #[must_use]
    pub const fn era(mut self, era: Era) -> Self {
        self.era = era;
        self
    }

    /// Splits `text` into fields and fills a candidate from them.
    ///
    /// Returns `None` when there are fewer than two fields, in which case no
    /// parsing is attempted and the caller decides on a fallback date.
    ///
    /// | fields | layout                               |
    /// |--------|--------------------------------------|
    /// | 2      | `year era`                           |
    /// | 3      | `month year era`                     |
    /// | 4+     | `day month year era` (rest ignored)  |
    ///
    /// Numbers that fail to parse keep their default of 1. An era that is
    /// neither `bc` nor `ad` leaves the era at its default, [`Era::BC`].
    pub fn parse(text: &str) -> Option<Self> {
        let fields: Vec<&str> = text
            .split(&FIELD_SEPARATORS[..])
            .filter(|field| !field.is_empty())
            .collect();

        let candidate = Self::default();
        let candidate = match fields.as_slice() {
            [] | [_] => return None,
            [year, era] => candidate.year(parse_year(year)).era(parse_era(era)),
            [month, year, era] => candidate
                .month(parse_field(month, "month"))
                .year(parse_year(year))
                .era(parse_era(era)),
            [day, month, year, era, rest @ ..] => {
                if !rest.is_empty() {
                    log::debug!("ignoring {} trailing field(s) in {text:?}", rest.len());
                }
                candidate
                    .day(parse_field(day, "day"))
                    .month(parse_field(month, "month"))
                    .year(parse_year(year))
                    .era(parse_era(era))
            }
        };
        Some(candidate)
    }

    /// Checks the month, then the day against that month's length.
    ///
    /// The year is not range-checked.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidMonth` or `ValidationError::InvalidDay`
    /// for the first field that breaks the calendar.
    pub fn validate(self) -> Result<Date, ValidationError> {
        let year = Year::from(self.year);
        let month = Month::new(self.month)?;
        let day = Day::new(self.day, month, year)?;
        Ok(Date::from_parts(day, month, year, self.era))
    }
}

impl fmt::Display for CandidateDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_date(f, self.day, self.month, self.year, self.era)
    }
}

fn parse_field(field: &str, name: &str) -> i64 {
    field.parse().unwrap_or_else(|_| {
        log::debug!("{name} field {field:?} is not a number, using {MIN_DAY}");
        i64::from(MIN_DAY)
    })
}

fn parse_year(field: &str) -> u32 {
    field.parse().unwrap_or_else(|_| {
        log::debug!("year field {field:?} is not a number, using {MIN_DAY}");
        u32::from(MIN_DAY)
    })
}

fn parse_era(field: &str) -> Era {
    field.parse().unwrap_or_else(|err| {
        log::warn!("{err}, falling back to {}", Era::default());
        Era::default()
    })
}
