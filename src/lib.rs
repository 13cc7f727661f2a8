mod config;
mod consts;
mod grid;
mod kernel;
mod prelude;
mod range;
mod types;
mod view;

pub use config::CalendarConfig;
pub use consts::*;
pub use grid::{CellPosition, GridCell, MonthGrid, MonthRelation};
pub use kernel::{
    WeekOfYear, absolute_day_number, day_of_week, days_in_month, from_absolute_day_number,
    is_leap_year, next_month, previous_month, week_number, weeks_in_year,
};
pub use range::{RangeError, YearRange};
pub use types::{Day, Month, Weekday, Year};
pub use view::{CalendarView, Direction, NavigationError};

use crate::prelude::*;
use std::str::FromStr;

/// A fully validated Gregorian calendar date.
///
/// The day is always within the length of its month, so every value of this
/// type names a real day between 0001-01-01 and 9999-12-31. Dates order
/// chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Day number {_0} is outside 0001-01-01..=9999-12-31")]
    InvalidDayNumber(i32),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

impl CalendarDate {
    /// Creates a date from raw components, validating each of them.
    ///
    /// # Errors
    /// `InvalidYear`, `InvalidMonth` or `InvalidDay`, checked in that order.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        Self::from_typed(year, month, day)
    }

    /// Creates a date from an already validated year and month.
    ///
    /// # Errors
    /// `InvalidDay` if `day` is not within the month.
    pub fn from_typed(year: Year, month: Month, day: u8) -> Result<Self, DateError> {
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// The first day of the given month.
    pub fn first_of_month(year: Year, month: Month) -> Self {
        Self {
            year,
            month,
            day: Day::clamped(MIN_DAY, year, month),
        }
    }

    /// `day` clamped into the given month.
    pub fn clamped(year: Year, month: Month, day: u8) -> Self {
        Self {
            year,
            month,
            day: Day::clamped(day, year, month),
        }
    }

    /// Converts a day number back into a date.
    ///
    /// # Errors
    /// `InvalidDayNumber` outside 0001-01-01..=9999-12-31.
    pub fn from_absolute_day_number(number: i32) -> Result<Self, DateError> {
        kernel::from_absolute_day_number(number)
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Month number, January = 1
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Zero-based month index, January = 0
    pub const fn month0(&self) -> u8 {
        self.month.index()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
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

    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year.get())
    }

    /// Number of days in this date's month.
    pub const fn days_in_month(&self) -> u8 {
        kernel::month_length(self.year, self.month)
    }

    /// Day number of this date, 0001-01-01 being day 1.
    pub fn absolute_day_number(&self) -> i32 {
        kernel::day_number(self.year, self.month, self.day.get())
    }

    pub fn weekday(&self) -> Weekday {
        kernel::weekday_of(self.absolute_day_number())
    }

    /// Week number of this date.
    ///
    /// # Errors
    /// `InvalidYear` if the week belongs to year 10000.
    pub fn week_of_year(&self) -> Result<WeekOfYear, DateError> {
        kernel::week_of(*self)
    }

    /// The date `days` days away, or `None` outside the supported years.
    pub fn checked_add_days(&self, days: i32) -> Option<Self> {
        let number = self.absolute_day_number().checked_add(days)?;
        Self::from_absolute_day_number(number).ok()
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: &Self) -> i32 {
        other.absolute_day_number() - self.absolute_day_number()
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    /// Parses the ISO form `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            let count = parts.len();
            let layout = format!("YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD");
            return Err(DateError::InvalidFormat(format!(
                "Expected {layout}, found {count} component(s): {trimmed}"
            )));
        }

        // Parse components - InvalidFormat if not numeric
        let year = Self::parse_u16(parts[0])?;
        let month = Self::parse_u8(parts[1])?;
        let day = Self::parse_u8(parts[2])?;

        Self::new(year, month, day)
    }
}

impl CalendarDate {
    /// Helper to parse u16 with better error messages
    fn parse_u16(s: &str) -> Result<u16, DateError> {
        s.parse::<u16>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, DateError> {
        s.parse::<u8>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = DateError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
