use crate::types::Weekday;

/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1;

/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days elapsed in the year before the first of each month,
/// indexed by `[is_leap as usize][month]`. Index 13 is the year length.
pub const DAYS_BEFORE_MONTH: [[u16; 14]; 2] = [
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365],
    [0, 0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366],
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;
/// Days in a full 400 year Gregorian cycle
pub(crate) const DAYS_PER_GREGORIAN_CYCLE: i32 = 146_097;

pub const DAYS_PER_WEEK: u8 = 7;

/// Years with this weekday on Jan 1 or Dec 31 have 53 weeks.
pub const WEEK_PIVOT: Weekday = Weekday::Thursday;

/// Rows in a month grid
pub const GRID_ROWS: u8 = 6;
/// Columns in a month grid
pub const GRID_COLS: u8 = 7;
/// Cells in a month grid
pub const GRID_CELLS: usize = (GRID_ROWS as usize) * (GRID_COLS as usize);

/// Rows past this one may hold next-month days in the week column.
pub(crate) const LAST_FULL_ROW: u8 = 3;
/// Week-column days below this in trailing rows belong to the next month.
pub(crate) const NEXT_MONTH_DAY_LIMIT: u8 = 15;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
/// Marker for an open end of a year range
pub const OPEN_BOUND: &str = "..";
