use serde::{Deserialize, Serialize};

use crate::consts::{AVERAGE_YEAR_DAYS, DECEMBER, JANUARY};
use crate::prelude::*;
use crate::types::{Month, days_in_month};
use crate::Date;

/// A whole number of years between two dates. Negative when the second date
/// comes first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{years}")]
#[serde(transparent)]
pub struct Age {
    years: i64,
}

impl Age {
    pub const fn years(self) -> i64 {
        self.years
    }
}

impl From<Age> for i64 {
    fn from(age: Age) -> Self {
        age.years
    }
}

/// Years elapsed from `start` to `end`.
///
/// The count is the difference of the signed years (BC negated), plus one
/// when the days left over in `start`'s year and the days before `end` in its
/// year add up to more than an average Gregorian year. This is an
/// approximation and does not match exact calendar subtraction.
pub fn years_between(start: &Date, end: &Date) -> Age {
    let mut years = end.signed_year() - start.signed_year();

    let leftover = start_remainder(start) + end_remainder(end);
    if f64::from(leftover) > AVERAGE_YEAR_DAYS {
        years += 1;
    }

    log::trace!("{start} to {end}: {leftover} leftover days, {years} years");
    Age { years }
}

/// Days from January 1st through the end of `date`'s month, less its day.
fn start_remainder(date: &Date) -> i32 {
    month_days(date, JANUARY..=date.month()) - i32::from(date.day())
}

/// Days from the start of `date`'s month through December 31st, less its day.
fn end_remainder(date: &Date) -> i32 {
    month_days(date, date.month()..=DECEMBER) - i32::from(date.day())
}

fn month_days(date: &Date, months: std::ops::RangeInclusive<u8>) -> i32 {
    months
        .map(|m| i32::from(days_in_month(Month::from_trusted(m), date.year_typed())))
        .sum()
}
