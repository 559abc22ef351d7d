mod age;
mod candidate;
mod consts;
mod prelude;
mod types;

pub use age::{Age, years_between};
pub use candidate::CandidateDate;
pub use consts::*;
pub use types::{Day, Era, EraError, Month, Year, days_in_month, is_leap_year, month_name};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A calendar date that may fall on either side of the epoch.
///
/// Month and day are always valid for the year: the only ways to obtain a
/// `Date` are [`CandidateDate::validate`], [`Date::parse`], [`Date::now`],
/// conversion from a [`NaiveDate`] and the [`Date::MIN`]/[`Date::MAX`]
/// sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDate")]
pub struct Date {
    year:  Year,
    month: Month,
    day:   Day,
    era:   Era,
}

/// Why a set of date fields does not describe a real day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid month: {month} (must be 1-12)")]
    InvalidMonth { month: i64 },
    #[error("Invalid day: {day} for month {month} (must be 1-{max})")]
    InvalidDay { month: u8, day: i64, max: u8 },
}

impl Date {
    /// December 31st, 99999 AD
    pub const MAX: Self = Self::from_parts(
        Day::from_trusted(31),
        Month::from_trusted(DECEMBER),
        Year::new(MAX_YEAR),
        Era::AD,
    );

    /// January 1st, 99999 BC. Returned by [`Date::try_parse`] on failure.
    pub const MIN: Self = Self::from_parts(
        Day::from_trusted(MIN_DAY),
        Month::from_trusted(JANUARY),
        Year::new(MAX_YEAR),
        Era::BC,
    );

    pub(crate) const fn from_parts(day: Day, month: Month, year: Year, era: Era) -> Self {
        Self {
            year,
            month,
            day,
            era,
        }
    }

    /// Today's date from the local clock, in the AD era
    pub fn now() -> Self {
        chrono::Local::now().date_naive().into()
    }

    /// Parses and validates a free-form date such as `"15/3/44 BC"`.
    ///
    /// Fields may be separated by any run of `, . - / \` or spaces. With fewer
    /// than two fields the current date is returned, so the result depends on
    /// the clock; see [`Date::parse_with_reference`] for a deterministic form.
    ///
    /// # Errors
    /// Returns `ValidationError` if the month or day is out of range.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        Self::parse_or_else(text, Self::now)
    }

    /// Like [`Date::parse`], returning `reference` instead of the current date
    /// when there is nothing to parse.
    ///
    /// # Errors
    /// Returns `ValidationError` if the month or day is out of range.
    pub fn parse_with_reference(text: &str, reference: Self) -> Result<Self, ValidationError> {
        Self::parse_or_else(text, || reference)
    }

    fn parse_or_else(text: &str, fallback: impl FnOnce() -> Self) -> Result<Self, ValidationError> {
        match CandidateDate::parse(text) {
            Some(candidate) => candidate.validate(),
            None => {
                log::debug!("fewer than two fields in {text:?}, using fallback date");
                Ok(fallback())
            }
        }
    }

    /// Non-failing form of [`Date::parse`]: `(false, Date::MIN)` when the
    /// text does not validate.
    pub fn try_parse(text: &str) -> (bool, Self) {
        match Self::parse(text) {
            Ok(date) => (true, date),
            Err(err) => {
                log::debug!("could not parse {text:?}: {err}");
                (false, Self::MIN)
            }
        }
    }

    pub const fn is_leap_year(year: u32) -> bool {
        is_leap_year(year)
    }

    /// Number of days in this date's month
    pub const fn days_in_month(&self) -> u8 {
        types::days_in_month(self.month, self.year)
    }

    /// See [`years_between`]
    pub fn years_between(start: &Self, end: &Self) -> Age {
        years_between(start, end)
    }

    /// Year on a single axis: negative for BC, positive for AD
    pub const fn signed_year(&self) -> i64 {
        let year = self.year.get() as i64;
        match self.era {
            Era::BC => -year,
            Era::AD => year,
        }
    }

    pub const fn year(&self) -> u32 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn era(&self) -> Era {
        self.era
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }
}

/// Writes `"<Month> <Day>, <Year> <Era>"`, dropping the day when it is not
/// positive and the month when it has no name.
pub(crate) fn write_date(
    f: &mut fmt::Formatter<'_>,
    day: i64,
    month: i64,
    year: impl fmt::Display,
    era: Era,
) -> fmt::Result {
    match month_name(month) {
        Some(name) if day > 0 => write!(f, "{name} {day}, {year} {era}"),
        Some(name) => write!(f, "{name} {year} {era}"),
        None => write!(f, "{year} {era}"),
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_date(
            f,
            i64::from(self.day.get()),
            i64::from(self.month.get()),
            self.year,
            self.era,
        )
    }
}

impl FromStr for Date {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    /// Maps astronomical year numbering onto eras: year 0 is 1 BC, year -1 is
    /// 2 BC and so on.
    #[allow(clippy::cast_possible_truncation)]
    fn from(date: NaiveDate) -> Self {
        let (year, era) = match u32::try_from(date.year()) {
            Ok(year) if year > 0 => (year, Era::AD),
            _ => (date.year().unsigned_abs() + 1, Era::BC),
        };
        Self::from_parts(
            Day::from_trusted(date.day() as u8),
            Month::from_trusted(date.month() as u8),
            Year::new(year),
            era,
        )
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    /// Chronological: by signed year, then month, then day
    fn cmp(&self, other: &Self) -> Ordering {
        (self.signed_year(), self.month, self.day).cmp(&(other.signed_year(), other.month, other.day))
    }
}

#[derive(Deserialize)]
struct RawDate {
    year:  u32,
    month: i64,
    day:   i64,
    era:   Era,
}

impl TryFrom<RawDate> for Date {
    type Error = ValidationError;

    fn try_from(raw: RawDate) -> Result<Self, Self::Error> {
        CandidateDate::new(raw.day, raw.month, raw.year, raw.era).validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: i64, month: i64, year: u32, era: Era) -> Date {
        CandidateDate::new(day, month, year, era).validate().unwrap()
    }

    #[test]
    fn test_try_parse_leap_day() {
        let (ok, parsed) = Date::try_parse("29/2/2020 AD");
        assert!(ok);
        assert_eq!(parsed.day(), 29);
        assert_eq!(parsed.month(), 2);
        assert_eq!(parsed.year(), 2020);
        assert_eq!(parsed.era(), Era::AD);
    }

    #[test]
    fn test_try_parse_failure_returns_min() {
        let (ok, parsed) = Date::try_parse("29/2/2019 AD");
        assert!(!ok);
        assert_eq!(parsed, Date::MIN);

        let (ok, parsed) = Date::try_parse("1/13/2019 AD");
        assert!(!ok);
        assert_eq!(parsed, Date::MIN);
    }

    #[test]
    fn test_parse_two_fields_defaults() {
        let parsed = Date::parse("2014 AD").unwrap();
        assert_eq!(parsed, date(1, 1, 2014, Era::AD));
    }

    #[test]
    fn test_parse_three_fields_defaults_day() {
        let parsed = Date::parse("3-44-bc").unwrap();
        assert_eq!(parsed, date(1, 3, 44, Era::BC));
    }

    #[test]
    fn test_parse_four_fields() {
        let parsed = "15.3.44 BC".parse::<Date>().unwrap();
        assert_eq!(parsed, date(15, 3, 44, Era::BC));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Date::parse("1/13/2019 AD"),
            Err(ValidationError::InvalidMonth { month: 13 })
        );
        assert_eq!(
            Date::parse("31/4/2019 AD"),
            Err(ValidationError::InvalidDay {
                month: 4,
                day: 31,
                max: 30
            })
        );
    }

    #[test]
    fn test_parse_single_field_uses_reference() {
        let reference = date(4, 7, 1776, Era::AD);
        assert_eq!(Date::parse_with_reference("garbage", reference), Ok(reference));
        assert_eq!(Date::parse_with_reference("", reference), Ok(reference));
    }

    #[test]
    fn test_parse_single_field_uses_clock() {
        let before = Date::now();
        let parsed = Date::parse("garbage").unwrap();
        let after = Date::now();
        assert_eq!(parsed.era(), Era::AD);
        assert!(before <= parsed && parsed <= after);
    }

    #[test]
    fn test_now_is_ad() {
        let today = Date::now();
        assert_eq!(today.era(), Era::AD);
        assert!(today.year() >= 2024);
    }

    #[test]
    fn test_is_leap_year() {
        assert!(Date::is_leap_year(2000));
        assert!(!Date::is_leap_year(1900));
        assert!(Date::is_leap_year(2004));
        assert!(!Date::is_leap_year(2001));
    }

    #[test]
    fn test_days_in_month_of_validated_dates() {
        assert_eq!(date(1, 2, 2020, Era::AD).days_in_month(), 29);
        assert_eq!(date(1, 2, 2019, Era::AD).days_in_month(), 28);
        for d in [Date::MIN, Date::MAX, date(15, 3, 44, Era::BC), Date::now()] {
            assert!((28..=31).contains(&d.days_in_month()), "{d}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(date(15, 3, 44, Era::BC).to_string(), "March 15, 44 BC");
        assert_eq!(date(1, 1, 2014, Era::AD).to_string(), "January 1, 2014 AD");
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(Date::MAX.to_string(), "December 31, 99999 AD");
        assert_eq!(Date::MIN.to_string(), "January 1, 99999 BC");
        assert_eq!(Date::MIN.signed_year(), -99999);
        assert!(Date::MIN < Date::MAX);
    }

    #[test]
    fn test_years_between() {
        let age = Date::years_between(&date(1, 1, 44, Era::BC), &date(1, 1, 44, Era::AD));
        assert_eq!(age.years(), 89);
    }

    #[test]
    fn test_signed_year() {
        assert_eq!(date(1, 1, 44, Era::BC).signed_year(), -44);
        assert_eq!(date(1, 1, 44, Era::AD).signed_year(), 44);
    }

    #[test]
    fn test_ordering() {
        let ides = date(15, 3, 44, Era::BC);
        let april = date(1, 4, 44, Era::BC);
        let later_bc = date(1, 1, 43, Era::BC);
        let ad = date(1, 1, 1, Era::AD);
        assert!(ides < april);
        assert!(april < later_bc);
        assert!(later_bc < ad);
    }

    #[test]
    fn test_from_naive_date() {
        let ad: Date = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap().into();
        assert_eq!(ad, date(29, 2, 2020, Era::AD));

        let one_bc: Date = NaiveDate::from_ymd_opt(0, 12, 31).unwrap().into();
        assert_eq!(one_bc, date(31, 12, 1, Era::BC));

        let caesar: Date = NaiveDate::from_ymd_opt(-43, 3, 15).unwrap().into();
        assert_eq!(caesar, date(15, 3, 44, Era::BC));
    }

    #[test]
    fn test_serde() {
        let original = date(15, 3, 44, Era::BC);
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, r#"{"year":44,"month":3,"day":15,"era":"BC"}"#);
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_serde_validation() {
        let json = r#"{"year":2019,"month":2,"day":29,"era":"AD"}"#;
        let result: Result<Date, _> = serde_json::from_str(json);
        assert!(result.is_err());

        let json = r#"{"year":2019,"month":13,"day":1,"era":"AD"}"#;
        let result: Result<Date, _> = serde_json::from_str(json);
        assert!(result.is_err());

        let json = r#"{"year":2020,"month":2,"day":29,"era":"AD"}"#;
        let result: Result<Date, _> = serde_json::from_str(json);
        assert!(result.is_ok());
    }
}
