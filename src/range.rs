use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{DateError, MAX_YEAR, MIN_YEAR, OPEN_BOUND, RANGE_SEPARATOR, Year, prelude::*};

/// Window of years a calendar may display (inclusive).
/// Either end may be open; when both are set, `min <= max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct YearRange {
    min: Option<Year>,
    max: Option<Year>,
}

/// Formats one end of a range, `..` when open.
#[derive(Display)]
enum Bound {
    #[display(fmt = "{_0}")]
    Year(Year),
    #[display(fmt = "{}", OPEN_BOUND)]
    Open,
}

impl From<Option<Year>> for Bound {
    fn from(year: Option<Year>) -> Self {
        year.map_or(Self::Open, Self::Year)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min = Bound::from(self.min);
        let max = Bound::from(self.max);
        write!(f, "{min}{RANGE_SEPARATOR}{max}")
    }
}

/// Error type for year range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Minimum year is after maximum year.
    #[error("Invalid year range: minimum ({min}) is after maximum ({max})")]
    InvalidRange { min: Year, max: Year },

    /// Error validating a year.
    #[error(transparent)]
    DateError(#[from] DateError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl YearRange {
    /// A range with neither end set.
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Creates a new year range with validation.
    ///
    /// # Errors
    /// `RangeError::DateError` for a year outside `1..=MAX_YEAR`,
    /// `RangeError::InvalidRange` if min > max.
    pub fn new(min: Option<u16>, max: Option<u16>) -> Result<Self, RangeError> {
        let min = min.map(Year::new).transpose()?;
        let max = max.map(Year::new).transpose()?;
        Self::from_years(min, max)
    }

    /// Creates a range from validated years.
    ///
    /// # Errors
    /// `RangeError::InvalidRange` if min > max.
    pub fn from_years(min: Option<Year>, max: Option<Year>) -> Result<Self, RangeError> {
        match (min, max) {
            (Some(min), Some(max)) if min > max => Err(RangeError::InvalidRange { min, max }),
            _ => Ok(Self { min, max }),
        }
    }

    /// Returns the configured minimum year, if any
    pub const fn min(&self) -> Option<Year> {
        self.min
    }

    /// Returns the configured maximum year, if any
    pub const fn max(&self) -> Option<Year> {
        self.max
    }

    /// Effective lower bound, `MIN_YEAR` when open.
    pub fn lower(&self) -> u16 {
        self.min.map_or(MIN_YEAR, Year::get)
    }

    /// Effective upper bound, `MAX_YEAR` when open.
    pub fn upper(&self) -> u16 {
        self.max.map_or(MAX_YEAR, Year::get)
    }

    /// Checks if the range contains a year.
    /// Takes a raw value so that years just outside the supported span
    /// (0, `MAX_YEAR + 1`) can be tested too.
    pub fn contains(&self, year: u16) -> bool {
        (self.lower()..=self.upper()).contains(&year)
    }

    /// `year` moved into the range.
    pub fn clamp(&self, year: Year) -> Year {
        let year = self.min.map_or(year, |min| year.max(min));
        self.max.map_or(year, |max| year.min(max))
    }
}

impl FromStr for YearRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();
        if separator_count != 1 {
            return Err(RangeError::InvalidFormat(format!(
                "Expected exactly one '{RANGE_SEPARATOR}' separator, found {separator_count}: {s}"
            )));
        }

        let (min, max) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
            RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found: {s}"))
        })?;

        Self::new(parse_bound(min)?, parse_bound(max)?)
    }
}

fn parse_bound(s: &str) -> Result<Option<u16>, RangeError> {
    let s = s.trim();
    if s == OPEN_BOUND {
        return Ok(None);
    }
    s.parse::<u16>()
        .map(Some)
        .map_err(|_| RangeError::InvalidFormat(format!("Not a year: {s}")))
}

impl Serialize for YearRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YearRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
