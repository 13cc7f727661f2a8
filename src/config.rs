//! Locale and display configuration supplied by the embedding toolkit.

use serde::{Deserialize, Serialize};

use crate::consts::GRID_COLS;
use crate::types::{Month, Weekday};

/// Locale data and display options for one calendar.
///
/// Weekday names are indexed Monday first regardless of `week_start`;
/// use [`CalendarConfig::weekday_headers`] for the order shown in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Weekday shown in the first grid column
    pub week_start: Weekday,
    pub weekday_names: [String; 7],
    pub month_names: [String; 12],
    /// Show a week-number column next to the grid
    pub show_week_numbers: bool,
    /// Refuse every operation that would change the displayed month
    pub no_month_change: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Monday,
            weekday_names: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"].map(String::from),
            month_names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .map(String::from),
            show_week_numbers: false,
            no_month_change: false,
        }
    }
}

impl CalendarConfig {
    pub fn weekday_name(&self, weekday: Weekday) -> &str {
        &self.weekday_names[weekday.index()]
    }

    pub fn month_name(&self, month: Month) -> &str {
        &self.month_names[usize::from(month.index())]
    }

    /// Weekday shown in grid column `col`; columns past 6 wrap.
    pub fn weekday_at_column(&self, col: u8) -> Weekday {
        self.week_start.add_days(col % GRID_COLS)
    }

    /// Column headers in display order, starting at `week_start`.
    pub fn weekday_headers(&self) -> [&str; 7] {
        let mut col = 0;
        [(); 7].map(|()| {
            let name = self.weekday_name(self.weekday_at_column(col));
            col += 1;
            name
        })
    }
}
