use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MIN_DAY, MONTH_NAMES,
};
use crate::ValidationError;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the epoch a year is counted from.
///
/// Years are always stored as positive numbers; the era says whether they run
/// backwards (BC) or forwards (AD) from the epoch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
pub enum Era {
    /// Before the epoch. Also the fallback for an unrecognized era token.
    #[default]
    #[display(fmt = "BC")]
    BC,
    /// On or after the epoch
    #[display(fmt = "AD")]
    AD,
}

/// Error returned when a string is neither `bc` nor `ad`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EraError {
    #[error("Unknown era: {0} (expected BC or AD)")]
    Unknown(String),
}

impl FromStr for Era {
    type Err = EraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("bc") {
            Ok(Self::BC)
        } else if trimmed.eq_ignore_ascii_case("ad") {
            Ok(Self::AD)
        } else {
            Err(EraError::Unknown(trimmed.to_owned()))
        }
    }
}

/// A year counted from the epoch within its era.
///
/// Conventionally in `1..=MAX_YEAR`, but no range is enforced: validation only
/// concerns the month/day structure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Year(u32);

impl Year {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the year value as u32
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this year has a February 29th
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.0)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    /// Creates a new Month, validating that it's within `1..=MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidMonth` if the value is out of range.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        match u8::try_from(value) {
            Ok(month) if (1..=MAX_MONTH).contains(&month) => Ok(Self(month)),
            _ => Err(ValidationError::InvalidMonth { month: value }),
        }
    }

    /// Builds a month the caller already knows to be in range
    pub(crate) const fn from_trusted(value: u8) -> Self {
        debug_assert!(value != 0 && value <= MAX_MONTH);
        Self(value)
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// English name of the month
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[(self.0 - 1) as usize]
    }
}

impl TryFrom<u8> for Month {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(u8);

impl Day {
    /// Creates a new Day, validating that it's within `1..=days_in_month(month, year)`
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidDay` if the value is out of range.
    pub fn new(value: i64, month: Month, year: Year) -> Result<Self, ValidationError> {
        let max = days_in_month(month, year);
        match u8::try_from(value) {
            Ok(day) if (MIN_DAY..=max).contains(&day) => Ok(Self(day)),
            _ => Err(ValidationError::InvalidDay {
                month: month.get(),
                day: value,
                max,
            }),
        }
    }

    pub(crate) const fn from_trusted(value: u8) -> Self {
        debug_assert!(value != 0 && value <= 31);
        Self(value)
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Day {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate without year/month context, so check against the longest month
        let longest = DAYS_IN_MONTH[1];
        if (MIN_DAY..=longest).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidDay {
                month: 0,
                day: i64::from(value),
                max: longest,
            })
        }
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Calendar rules. Era plays no part: BC years share the AD month structure.

/// Gregorian leap-year test
pub const fn is_leap_year(year: u32) -> bool {
    year % LEAP_YEAR_CYCLE == 0 && (year % CENTURY_CYCLE != 0 || year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` of `year`, always in `28..=31`
pub const fn days_in_month(month: Month, year: Year) -> u8 {
    if month.get() == FEBRUARY && year.is_leap() {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month.get() as usize]
    }
}

/// Name for a raw month number, `None` outside `1..=12`
pub fn month_name(month: i64) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}
