//! Gregorian calendar arithmetic.
//!
//! Day numbers count from the proleptic Gregorian epoch, 0001-01-01 being
//! day 1 (a Monday). All functions are pure; the raw-integer entry points
//! validate their input and report malformed dates as [`DateError`].

use crate::consts::{
    CENTURY_CYCLE, DAYS_BEFORE_MONTH, DAYS_IN_MONTH, DAYS_PER_GREGORIAN_CYCLE, DAYS_PER_WEEK,
    DECEMBER, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, JANUARY, LEAP_YEAR_CYCLE, MAX_YEAR,
    WEEK_PIVOT,
};
use crate::prelude::*;
use crate::types::{Month, Weekday, Year};
use crate::{CalendarDate, DateError};
use serde::{Deserialize, Serialize};

/// Week of a week-based year, as shown in a calendar's week column.
///
/// `year` is the year the week belongs to, which differs from the calendar
/// year for days around New Year.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:04}-W{:02}", "year.get()", week)]
pub struct WeekOfYear {
    pub year: Year,
    pub week: u8,
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` of `year`.
///
/// # Errors
/// `InvalidMonth` when `month` is outside `1..=12`.
pub fn days_in_month(year: u16, month: u8) -> Result<u8, DateError> {
    Ok(length_of(year, Month::new(month)?))
}

pub(crate) const fn month_length(year: Year, month: Month) -> u8 {
    length_of(year.get(), month)
}

const fn length_of(year: u16, month: Month) -> u8 {
    let month = month.get();
    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days in the first `years` years of the era.
const fn year_to_days(years: i32) -> i32 {
    years * 365 + years / 4 - years / 100 + years / 400
}

/// Day number of an already validated date.
pub(crate) fn day_number(year: Year, month: Month, day: u8) -> i32 {
    let leap = usize::from(is_leap_year(year.get()));
    year_to_days(i32::from(year.get()) - 1)
        + i32::from(DAYS_BEFORE_MONTH[leap][usize::from(month.get())])
        + i32::from(day)
}

/// Maps a calendar date to its day number, 0001-01-01 being day 1.
///
/// # Errors
/// `InvalidYear`, `InvalidMonth` or `InvalidDay` for a malformed triple.
pub fn absolute_day_number(year: u16, month: u8, day: u8) -> Result<i32, DateError> {
    Ok(CalendarDate::new(year, month, day)?.absolute_day_number())
}

/// Inverse of [`absolute_day_number`].
///
/// # Errors
/// `InvalidDayNumber` for day numbers before 0001-01-01 or after 9999-12-31.
pub fn from_absolute_day_number(number: i32) -> Result<CalendarDate, DateError> {
    if number < 1 || number > year_to_days(i32::from(MAX_YEAR)) {
        return Err(DateError::InvalidDayNumber(number));
    }

    // Years fully elapsed before `number`; the estimate is off by at most one
    let mut elapsed = number * i32::from(GREGORIAN_CYCLE) / DAYS_PER_GREGORIAN_CYCLE;
    while year_to_days(elapsed) >= number {
        elapsed -= 1;
    }
    while year_to_days(elapsed + 1) < number {
        elapsed += 1;
    }

    let year = u16::try_from(elapsed + 1).map_err(|_| DateError::InvalidDayNumber(number))?;
    let leap = usize::from(is_leap_year(year));
    let day_of_year = number - year_to_days(elapsed);

    let table = &DAYS_BEFORE_MONTH[leap];
    let month = (JANUARY..=DECEMBER)
        .find(|&m| i32::from(table[usize::from(m) + 1]) >= day_of_year)
        .ok_or(DateError::InvalidDayNumber(number))?;
    let day = u8::try_from(day_of_year - i32::from(table[usize::from(month)]))
        .map_err(|_| DateError::InvalidDayNumber(number))?;

    CalendarDate::new(year, month, day)
}

/// Weekday of a day number; day 1 is a Monday.
pub(crate) fn weekday_of(number: i32) -> Weekday {
    let offset = (number - 1).rem_euclid(i32::from(DAYS_PER_WEEK));
    Weekday::Monday.add_days(u8::try_from(offset).unwrap_or(0))
}

/// Day of the week of a calendar date, Monday = 1 through Sunday = 7.
///
/// # Errors
/// `InvalidYear`, `InvalidMonth` or `InvalidDay` for a malformed triple.
pub fn day_of_week(year: u16, month: u8, day: u8) -> Result<Weekday, DateError> {
    Ok(CalendarDate::new(year, month, day)?.weekday())
}

/// Number of weeks in a week-based year: 53 when Jan 1 or Dec 31 falls on
/// a Thursday, 52 otherwise.
pub fn weeks_in_year(year: Year) -> u8 {
    let jan_first = weekday_of(day_number(year, Month::JANUARY, 1));
    let dec_last = weekday_of(day_number(year, Month::DECEMBER, 31));
    if jan_first == WEEK_PIVOT || dec_last == WEEK_PIVOT {
        53
    } else {
        52
    }
}

/// Week number of a calendar date.
///
/// # Errors
/// `InvalidYear`, `InvalidMonth` or `InvalidDay` for a malformed triple, and
/// `InvalidYear` when the week rolls into year 10000.
pub fn week_number(year: u16, month: u8, day: u8) -> Result<WeekOfYear, DateError> {
    CalendarDate::new(year, month, day)?.week_of_year()
}

/// No supported date rolls into year 10000: 9999-12-31 is a Friday in week
/// 52 of 9999. The grid's week column reports year 10000 on its own when a
/// row reads as January 10000.
pub(crate) fn week_of(date: CalendarDate) -> Result<WeekOfYear, DateError> {
    let year = date.year_typed();
    let jan_first = day_number(year, Month::JANUARY, 1);
    // 0 = Monday
    let first = i32::from(weekday_of(jan_first).number()) - 1;
    let week = (date.absolute_day_number() - jan_first + first) / i32::from(DAYS_PER_WEEK)
        + i32::from(first < 4);

    if week == 0 {
        let previous = year.pred().ok_or(DateError::InvalidYear(0))?;
        return Ok(WeekOfYear {
            year: previous,
            week: weeks_in_year(previous),
        });
    }

    if week > i32::from(weeks_in_year(year)) {
        let next = year
            .succ()
            .ok_or_else(|| DateError::InvalidYear(year.get().saturating_add(1)))?;
        return Ok(WeekOfYear {
            year: next,
            week: 1,
        });
    }

    // 1..=53 here
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let week = week as u8;
    Ok(WeekOfYear { year, week })
}

/// The month after `(year, month)`, or `None` past `MAX_YEAR`.
pub fn next_month(year: Year, month: Month) -> Option<(Year, Month)> {
    if month == Month::DECEMBER {
        year.succ().map(|next| (next, Month::JANUARY))
    } else {
        Month::new(month.get() + 1).ok().map(|next| (year, next))
    }
}

/// The month before `(year, month)`, or `None` before year 1.
pub fn previous_month(year: Year, month: Month) -> Option<(Year, Month)> {
    if month == Month::JANUARY {
        year.pred().map(|previous| (previous, Month::DECEMBER))
    } else {
        Month::new(month.get() - 1).ok().map(|previous| (year, previous))
    }
}
