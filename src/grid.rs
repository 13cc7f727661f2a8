//! Fixed 6 × 7 month layout.
//!
//! A month is shown as 42 day cells in row-major order. Cells before the
//! first of the month carry the trailing days of the previous month, cells
//! after the last day count up from 1 into the next month.

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_CELLS, GRID_COLS, GRID_ROWS, LAST_FULL_ROW, NEXT_MONTH_DAY_LIMIT};
use crate::kernel::{self, WeekOfYear, month_length};
use crate::types::{Month, Weekday, Year};
use crate::{CalendarDate, DateError};

/// Which month a grid cell's day belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonthRelation {
    Prev,
    Current,
    Next,
}

/// Position of a cell in the grid, `row` in `0..6`, `col` in `0..7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    row: u8,
    col: u8,
}

impl CellPosition {
    pub const FIRST: Self = Self { row: 0, col: 0 };
    pub const LAST: Self = Self {
        row: GRID_ROWS - 1,
        col: GRID_COLS - 1,
    };

    /// `None` if `row` or `col` is outside the grid.
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < GRID_ROWS && col < GRID_COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Position of the linear row-major `index`, `None` past the last cell.
    pub fn from_index(index: usize) -> Option<Self> {
        let index = u8::try_from(index).ok()?;
        Self::new(index / GRID_COLS, index % GRID_COLS)
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn col(self) -> u8 {
        self.col
    }

    /// Linear row-major index in `0..42`.
    pub const fn index(self) -> usize {
        self.row as usize * GRID_COLS as usize + self.col as usize
    }
}

/// One day cell of a [`MonthGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u8,
    pub col: u8,
    pub day: u8,
    pub relation: MonthRelation,
}

impl GridCell {
    pub const fn position(&self) -> CellPosition {
        CellPosition {
            row: self.row,
            col: self.col,
        }
    }

    pub fn is_current(&self) -> bool {
        self.relation == MonthRelation::Current
    }
}

/// Day layout of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: Year,
    month: Month,
    week_start: Weekday,
    first_offset: u8,
    cells: [GridCell; GRID_CELLS],
}

impl MonthGrid {
    /// Lays out `(year, month)` with `week_start` in the first column.
    pub fn build(year: Year, month: Month, week_start: Weekday) -> Self {
        let first_offset = CalendarDate::first_of_month(year, month)
            .weekday()
            .offset_from(week_start);
        let len = month_length(year, month);
        // December of year 0 still has 31 days
        let prev_len = kernel::previous_month(year, month)
            .map_or(31, |(y, m)| month_length(y, m));

        let mut cells = [GridCell {
            row: 0,
            col: 0,
            day: 0,
            relation: MonthRelation::Current,
        }; GRID_CELLS];

        // Offsets are in 0..42, so every value below fits in a u8
        for (index, offset) in (0..GRID_CELLS).zip(0u8..) {
            let (day, relation) = if offset < first_offset {
                (prev_len - first_offset + 1 + offset, MonthRelation::Prev)
            } else if offset < first_offset + len {
                (offset - first_offset + 1, MonthRelation::Current)
            } else {
                (offset - first_offset - len + 1, MonthRelation::Next)
            };
            cells[index] = GridCell {
                row: offset / GRID_COLS,
                col: offset % GRID_COLS,
                day,
                relation,
            };
        }

        log::trace!(
            "built grid for {year}-{:02}, first day in column {first_offset}",
            month.get()
        );

        Self {
            year,
            month,
            week_start,
            first_offset,
            cells,
        }
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Column of the first of the month in row 0, counted from the week start.
    pub const fn first_offset(&self) -> u8 {
        self.first_offset
    }

    /// Number of days in the displayed month.
    pub const fn days_in_month(&self) -> u8 {
        month_length(self.year, self.month)
    }

    pub const fn cells(&self) -> &[GridCell; GRID_CELLS] {
        &self.cells
    }

    pub const fn cell(&self, pos: CellPosition) -> &GridCell {
        &self.cells[pos.index()]
    }

    /// The six rows of seven cells each.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(usize::from(GRID_COLS))
    }

    /// Position of a day of the displayed month.
    pub fn position_of(&self, day: u8) -> Option<CellPosition> {
        if day == 0 || day > self.days_in_month() {
            return None;
        }
        CellPosition::from_index(usize::from(self.first_offset + day - 1))
    }

    /// Position of the first and last `Current` cell.
    pub fn current_span(&self) -> (CellPosition, CellPosition) {
        let first = usize::from(self.first_offset);
        let last = first + usize::from(self.days_in_month()) - 1;
        (
            CellPosition::from_index(first).unwrap_or(CellPosition::FIRST),
            CellPosition::from_index(last).unwrap_or(CellPosition::LAST),
        )
    }

    /// Full date of a cell, resolving previous and next month days.
    /// `None` when the adjacent month lies outside the supported years.
    pub fn date_at(&self, pos: CellPosition) -> Option<CalendarDate> {
        let cell = self.cell(pos);
        let (year, month) = match cell.relation {
            MonthRelation::Prev => kernel::previous_month(self.year, self.month)?,
            MonthRelation::Current => (self.year, self.month),
            MonthRelation::Next => kernel::next_month(self.year, self.month)?,
        };
        CalendarDate::from_typed(year, month, cell.day).ok()
    }

    /// Week number displayed beside `row`.
    ///
    /// Taken from the day in the last column. In rows 4 and 5 a day below 15
    /// is read as next month, rolling December into January of the next
    /// year. `row` saturates at the last row.
    ///
    /// # Errors
    /// `InvalidYear` when the week belongs to year 10000.
    pub fn row_week_number(&self, row: u8) -> Result<WeekOfYear, DateError> {
        let row = row.min(GRID_ROWS - 1);
        let last_col = CellPosition {
            row,
            col: GRID_COLS - 1,
        };
        let day = self.cell(last_col).day;

        let (year, month) = if row > LAST_FULL_ROW && day < NEXT_MONTH_DAY_LIMIT {
            kernel::next_month(self.year, self.month)
                .ok_or_else(|| DateError::InvalidYear(self.year.get().saturating_add(1)))?
        } else {
            (self.year, self.month)
        };

        CalendarDate::from_typed(year, month, day)?.week_of_year()
    }

    /// Week numbers of all six rows.
    ///
    /// # Errors
    /// `InvalidYear` when a week belongs to year 10000.
    pub fn week_numbers(&self) -> Result<[WeekOfYear; GRID_ROWS as usize], DateError> {
        let mut weeks = [self.row_week_number(0)?; GRID_ROWS as usize];
        for (week, row) in weeks.iter_mut().zip(0..GRID_ROWS).skip(1) {
            *week = self.row_week_number(row)?;
        }
        Ok(weeks)
    }
}
