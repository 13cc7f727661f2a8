use crate::consts::{DAYS_PER_WEEK, MAX_MONTH, MAX_YEAR, MIN_DAY};
use crate::kernel::month_length;
use crate::DateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, DateError> {
        let non_zero = NonZeroU16::new(value).ok_or(DateError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(DateError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// The following year, or `None` past `MAX_YEAR`.
    pub fn succ(self) -> Option<Self> {
        Self::new(self.get() + 1).ok()
    }

    /// The preceding year, or `None` before year 1.
    pub fn pred(self) -> Option<Self> {
        Self::new(self.get() - 1).ok()
    }
}

impl TryFrom<u16> for Year {
    type Error = DateError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
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
pub struct Month(NonZeroU8);

impl Month {
    pub const JANUARY: Self = Self(NonZeroU8::MIN);
    pub const DECEMBER: Self = match NonZeroU8::new(MAX_MONTH) {
        Some(month) => Self(month),
        None => panic!("MAX_MONTH is non-zero"),
    };

    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateError> {
        let non_zero = NonZeroU8::new(value).ok_or(DateError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(DateError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Creates a Month from a zero-based index (January = 0).
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the index is >= 12.
    pub fn from_index(index: u8) -> Result<Self, DateError> {
        Self::new(index.saturating_add(1))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Zero-based month index, January = 0.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0.get() - 1
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the length of the given month
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, DateError> {
        let invalid = DateError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day: value,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if value > month_length(year, month) {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    /// The last day of the given month.
    pub fn last_of(year: Year, month: Month) -> Self {
        Self::clamped(u8::MAX, year, month)
    }

    /// `value` clamped into `1..=days_in_month(year, month)`.
    pub fn clamped(value: u8, year: Year, month: Month) -> Self {
        let len = month_length(year, month);
        let value = value.clamp(MIN_DAY, len);
        // value >= MIN_DAY, so the fallback is unreachable
        Self(NonZeroU8::new(value).unwrap_or(NonZeroU8::MIN))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // No month context here, so only the 1..=31 window is checked
        let non_zero = NonZeroU8::new(value).ok_or(DateError::InvalidDay {
            year: 0,
            month: 0,
            day: value,
        })?;
        if value > 31 {
            return Err(DateError::InvalidDay {
                year: 0,
                month: 0,
                day: value,
            });
        }
        Ok(Self(non_zero))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Day of the week, numbered `Monday = 1` through `Sunday = 7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Weekday for `1..=7`, Monday = 1.
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number.checked_sub(1)?)).copied()
    }

    /// Weekday number, Monday = 1 through Sunday = 7.
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Zero-based index, Monday = 0.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Days from `start` forward to `self`, in `0..7`.
    pub const fn offset_from(self, start: Self) -> u8 {
        (self.number() + DAYS_PER_WEEK - start.number()) % DAYS_PER_WEEK
    }

    /// The weekday `days` after `self`.
    pub fn add_days(self, days: u8) -> Self {
        let index = (self.index() + usize::from(days)) % Self::ALL.len();
        Self::ALL[index]
    }
}
