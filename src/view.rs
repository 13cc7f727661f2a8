//! Selection and focus state of one calendar.
//!
//! [`CalendarView`] keeps the displayed month, the selected day and the
//! focused grid cell consistent across keyboard and pointer navigation.
//! Every operation either succeeds completely or returns an error with the
//! state untouched. Leaving the configured year window is reported as
//! [`NavigationError::OutOfBoundYear`], the "erroneous date" condition a
//! toolkit turns into user feedback.

use crate::config::CalendarConfig;
use crate::consts::{GRID_COLS, GRID_ROWS, MAX_YEAR, MIN_DAY};
use crate::grid::{CellPosition, GridCell, MonthGrid, MonthRelation};
use crate::kernel::{self, WeekOfYear};
use crate::range::YearRange;
use crate::types::{Day, Month, Year};
use crate::{CalendarDate, DateError};

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Error type for navigation and selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// The operation would display a year outside the allowed window.
    #[error("Erroneous date: year {year} is outside {min}..={max}")]
    OutOfBoundYear { year: u16, min: u16, max: u16 },

    /// The month would change while month changes are disabled.
    #[error("Changing the displayed month is disabled")]
    MonthChangeDisabled,

    /// Malformed date input.
    #[error(transparent)]
    InvalidDate(#[from] DateError),
}

/// Display and selection state of a month calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    config: CalendarConfig,
    range: YearRange,
    grid: MonthGrid,
    selected_day: Option<Day>,
    focus: CellPosition,
    marked: [bool; 31],
}

impl CalendarView {
    /// Shows `date`'s month with `date` selected and focused.
    pub fn new(config: CalendarConfig, date: CalendarDate) -> Self {
        let grid = MonthGrid::build(date.year_typed(), date.month_typed(), config.week_start);
        let focus = grid.position_of(date.day()).unwrap_or(CellPosition::FIRST);
        Self {
            config,
            range: YearRange::unbounded(),
            grid,
            selected_day: Some(date.day_typed()),
            focus,
            marked: [false; 31],
        }
    }

    pub fn with_range(mut self, range: YearRange) -> Self {
        self.set_range(range);
        self
    }

    /// Installs a year window, moving the displayed year into it.
    pub fn set_range(&mut self, range: YearRange) {
        self.range = range;
        let year = range.clamp(self.grid.year());
        if year != self.grid.year() {
            log::debug!("displayed year {} clamped into {range}", self.grid.year());
            self.show_month(year, self.grid.month());
            self.resolve_focus();
        }
    }

    /// Replaces the configuration, relaying out the grid for a new week
    /// start while keeping focus on the same date.
    pub fn set_config(&mut self, config: CalendarConfig) {
        let focused = self.focused_date();
        let relayout = config.week_start != self.grid.week_start();
        self.config = config;
        if !relayout {
            return;
        }

        self.grid = MonthGrid::build(self.grid.year(), self.grid.month(), self.config.week_start);
        match focused.filter(|date| self.displays_month_of(date)) {
            Some(date) => self.focus_day(date.day()),
            None => self.resolve_focus(),
        }
    }

    pub const fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub const fn range(&self) -> YearRange {
        self.range
    }

    pub const fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub const fn displayed_year(&self) -> Year {
        self.grid.year()
    }

    pub const fn displayed_month(&self) -> Month {
        self.grid.month()
    }

    pub fn selected_day(&self) -> Option<u8> {
        self.selected_day.map(Day::get)
    }

    pub fn selected_date(&self) -> Option<CalendarDate> {
        self.selected_day
            .map(|day| CalendarDate::clamped(self.grid.year(), self.grid.month(), day.get()))
    }

    pub const fn focus(&self) -> CellPosition {
        self.focus
    }

    pub const fn focused_cell(&self) -> &GridCell {
        self.grid.cell(self.focus)
    }

    /// Date under the focus, `None` only on a cell of year 0 or 10000.
    pub fn focused_date(&self) -> Option<CalendarDate> {
        self.grid.date_at(self.focus)
    }

    /// Week numbers for the six rows when the week column is shown.
    ///
    /// # Errors
    /// `InvalidYear` when a week belongs to year 10000.
    pub fn week_numbers(&self) -> Result<Option<[WeekOfYear; GRID_ROWS as usize]>, DateError> {
        self.config
            .show_week_numbers
            .then(|| self.grid.week_numbers())
            .transpose()
    }

    /// Puts the focus on a cell without selecting it, as on pointer hover.
    pub fn set_focus(&mut self, pos: CellPosition) {
        self.focus = pos;
    }

    /// Arrow-key dispatch: with `ctrl`, Left/Right change the month and
    /// Up/Down change the year; without, the focus moves.
    ///
    /// # Errors
    /// See [`Self::move_focus`] and [`Self::previous_month`].
    pub fn navigate(&mut self, direction: Direction, ctrl: bool) -> Result<(), NavigationError> {
        match (direction, ctrl) {
            (Direction::Left, true) => self.previous_month(),
            (Direction::Right, true) => self.next_month(),
            (Direction::Up, true) => self.previous_year(),
            (Direction::Down, true) => self.next_year(),
            (direction, false) => self.move_focus(direction),
        }
    }

    /// Moves the focus one cell.
    ///
    /// Left and Right wrap between rows. Left from the first cell and Right
    /// from the last cell continue into the adjacent day, rebuilding the grid
    /// for its month. Up and Down stop at the first and last row.
    ///
    /// # Errors
    /// `OutOfBoundYear` when the adjacent day lies outside the year window,
    /// `MonthChangeDisabled` when it lies in another month and month changes
    /// are disabled.
    pub fn move_focus(&mut self, direction: Direction) -> Result<(), NavigationError> {
        let pos = self.focus;
        let next = match direction {
            Direction::Left if pos == CellPosition::FIRST => return self.focus_across(-1),
            Direction::Right if pos == CellPosition::LAST => return self.focus_across(1),
            Direction::Left => pos.index().checked_sub(1).and_then(CellPosition::from_index),
            Direction::Right => CellPosition::from_index(pos.index() + 1),
            Direction::Up => pos
                .row()
                .checked_sub(1)
                .and_then(|row| CellPosition::new(row, pos.col())),
            Direction::Down => CellPosition::new(pos.row() + 1, pos.col()),
        };
        self.focus = next.unwrap_or(pos);
        Ok(())
    }

    /// Like [`Self::move_focus`], but Up from the first row and Down from
    /// the last row move a week into the adjacent month.
    ///
    /// # Errors
    /// As [`Self::move_focus`].
    pub fn move_focus_across(&mut self, direction: Direction) -> Result<(), NavigationError> {
        let week = i32::from(GRID_COLS);
        match direction {
            Direction::Up if self.focus.row() == 0 => self.focus_across(-week),
            Direction::Down if self.focus.row() == GRID_ROWS - 1 => self.focus_across(week),
            direction => self.move_focus(direction),
        }
    }

    /// Shows the previous month.
    ///
    /// # Errors
    /// `OutOfBoundYear` or `MonthChangeDisabled`.
    pub fn previous_month(&mut self) -> Result<(), NavigationError> {
        let (year, month) = kernel::previous_month(self.grid.year(), self.grid.month())
            .ok_or_else(|| self.out_of_bound(0))?;
        self.change_month(year, month)
    }

    /// Shows the next month.
    ///
    /// # Errors
    /// `OutOfBoundYear` or `MonthChangeDisabled`.
    pub fn next_month(&mut self) -> Result<(), NavigationError> {
        let (year, month) = kernel::next_month(self.grid.year(), self.grid.month())
            .ok_or_else(|| self.out_of_bound(MAX_YEAR + 1))?;
        self.change_month(year, month)
    }

    /// Shows the same month one year earlier.
    ///
    /// # Errors
    /// `OutOfBoundYear` or `MonthChangeDisabled`.
    pub fn previous_year(&mut self) -> Result<(), NavigationError> {
        let year = self.grid.year().pred().ok_or_else(|| self.out_of_bound(0))?;
        self.change_month(year, self.grid.month())
    }

    /// Shows the same month one year later.
    ///
    /// # Errors
    /// `OutOfBoundYear` or `MonthChangeDisabled`.
    pub fn next_year(&mut self) -> Result<(), NavigationError> {
        let year = self
            .grid
            .year()
            .succ()
            .ok_or_else(|| self.out_of_bound(MAX_YEAR + 1))?;
        self.change_month(year, self.grid.month())
    }

    /// Jumps to a month, keeping the selected day where the month allows.
    /// Unlike the navigation operations this is not blocked by
    /// `no_month_change`.
    ///
    /// # Errors
    /// `InvalidDate` for a malformed year or month, `OutOfBoundYear` outside
    /// the year window.
    pub fn select_month(&mut self, year: u16, month: u8) -> Result<(), NavigationError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        self.check_year(year.get())?;
        self.show_month(year, month);
        self.resolve_focus();
        Ok(())
    }

    /// Shows and selects `date`.
    ///
    /// # Errors
    /// `OutOfBoundYear` outside the year window.
    pub fn select_date(&mut self, date: CalendarDate) -> Result<(), NavigationError> {
        self.check_year(date.year())?;
        self.show_month(date.year_typed(), date.month_typed());
        self.select(date.day_typed());
        Ok(())
    }

    /// Selects a day of the displayed month.
    ///
    /// # Errors
    /// `InvalidDate` if the month has no such day.
    pub fn select_day(&mut self, day: u8) -> Result<(), NavigationError> {
        let day = Day::new(day, self.grid.year(), self.grid.month())?;
        self.select(day);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_day = None;
    }

    /// Selects the day in a cell. Days of the previous or next month switch
    /// the display to that month first.
    ///
    /// # Errors
    /// `OutOfBoundYear` or `MonthChangeDisabled` for a cell outside the
    /// displayed month that cannot be shown.
    pub fn select_cell(&mut self, pos: CellPosition) -> Result<(), NavigationError> {
        let cell = *self.grid.cell(pos);
        if cell.relation != MonthRelation::Current {
            let beyond = if cell.relation == MonthRelation::Prev {
                0
            } else {
                MAX_YEAR + 1
            };
            let date = self.grid.date_at(pos).ok_or_else(|| self.out_of_bound(beyond))?;
            self.enter_month(date.year_typed(), date.month_typed())?;
        }
        self.select(Day::clamped(cell.day, self.grid.year(), self.grid.month()));
        Ok(())
    }

    /// Selects the focused cell.
    ///
    /// # Errors
    /// As [`Self::select_cell`].
    pub fn select_focused(&mut self) -> Result<(), NavigationError> {
        self.select_cell(self.focus)
    }

    /// Moves the selection by `days`, starting from the selected date or,
    /// with nothing selected, from the focused date. The display follows
    /// into other months and years.
    ///
    /// # Errors
    /// `OutOfBoundYear` or `MonthChangeDisabled` when the target cannot be
    /// shown.
    pub fn step_day(&mut self, days: i32) -> Result<(), NavigationError> {
        let beyond = if days < 0 { 0 } else { MAX_YEAR + 1 };
        let target = self
            .selected_date()
            .or_else(|| self.focused_date())
            .and_then(|date| date.checked_add_days(days))
            .ok_or_else(|| self.out_of_bound(beyond))?;
        self.enter_month(target.year_typed(), target.month_typed())?;
        self.select(target.day_typed());
        Ok(())
    }

    /// # Errors
    /// As [`Self::step_day`].
    pub fn next_day(&mut self) -> Result<(), NavigationError> {
        self.step_day(1)
    }

    /// # Errors
    /// As [`Self::step_day`].
    pub fn previous_day(&mut self) -> Result<(), NavigationError> {
        self.step_day(-1)
    }

    /// Marks a day of month. Marks are kept across month changes.
    /// Returns `true` if the day was not marked before.
    ///
    /// # Errors
    /// `InvalidDay` outside `1..=31`.
    pub fn mark_day(&mut self, day: u8) -> Result<bool, DateError> {
        let slot = &mut self.marked[mark_index(day)?];
        Ok(!std::mem::replace(slot, true))
    }

    /// Removes a mark. Returns `true` if the day was marked.
    ///
    /// # Errors
    /// `InvalidDay` outside `1..=31`.
    pub fn unmark_day(&mut self, day: u8) -> Result<bool, DateError> {
        let slot = &mut self.marked[mark_index(day)?];
        Ok(std::mem::replace(slot, false))
    }

    pub fn clear_marks(&mut self) {
        self.marked = [false; 31];
    }

    pub fn is_marked(&self, day: u8) -> bool {
        mark_index(day).is_ok_and(|index| self.marked[index])
    }

    /// Marks only show on days of the displayed month.
    pub fn is_cell_marked(&self, pos: CellPosition) -> bool {
        let cell = self.grid.cell(pos);
        cell.is_current() && self.is_marked(cell.day)
    }

    pub fn marked_days(&self) -> impl Iterator<Item = u8> + '_ {
        (MIN_DAY..).zip(&self.marked).filter(|&(_, &marked)| marked).map(|(day, _)| day)
    }

    fn select(&mut self, day: Day) {
        self.selected_day = Some(day);
        self.focus_day(day.get());
    }

    fn focus_day(&mut self, day: u8) {
        if let Some(pos) = self.grid.position_of(day) {
            self.focus = pos;
        }
    }

    fn displays_month_of(&self, date: &CalendarDate) -> bool {
        date.year_typed() == self.grid.year() && date.month_typed() == self.grid.month()
    }

    /// Focuses the day `days` away from the focused cell, switching months.
    fn focus_across(&mut self, days: i32) -> Result<(), NavigationError> {
        let beyond = if days < 0 { 0 } else { MAX_YEAR + 1 };
        let target = self
            .focused_date()
            .and_then(|date| date.checked_add_days(days))
            .ok_or_else(|| self.out_of_bound(beyond))?;
        self.enter_month(target.year_typed(), target.month_typed())?;
        self.focus_day(target.day());
        Ok(())
    }

    fn change_month(&mut self, year: Year, month: Month) -> Result<(), NavigationError> {
        self.enter_month(year, month)?;
        self.resolve_focus();
        Ok(())
    }

    /// Displays `(year, month)` after checking the year window and the
    /// month change option. A no-op for the displayed month.
    fn enter_month(&mut self, year: Year, month: Month) -> Result<(), NavigationError> {
        if year == self.grid.year() && month == self.grid.month() {
            return Ok(());
        }
        self.check_year(year.get())?;
        if self.config.no_month_change {
            log::debug!("refusing month change to {year}-{:02}", month.get());
            return Err(NavigationError::MonthChangeDisabled);
        }
        self.show_month(year, month);
        Ok(())
    }

    /// Rebuilds the grid, clamping the selected day into the new month.
    fn show_month(&mut self, year: Year, month: Month) {
        self.grid = MonthGrid::build(year, month, self.config.week_start);
        self.selected_day = self
            .selected_day
            .map(|day| Day::clamped(day.get(), year, month));
    }

    /// Focus follows the selected day; without one it stays on its cell if
    /// that cell is in the displayed month, else moves to the nearest day of
    /// the month.
    fn resolve_focus(&mut self) {
        if let Some(day) = self.selected_day {
            self.focus_day(day.get());
            return;
        }
        if self.focused_cell().is_current() {
            return;
        }
        let (first, last) = self.grid.current_span();
        self.focus = if self.focus < first { first } else { last };
    }

    fn check_year(&self, year: u16) -> Result<(), NavigationError> {
        if self.range.contains(year) {
            Ok(())
        } else {
            Err(self.out_of_bound(year))
        }
    }

    fn out_of_bound(&self, year: u16) -> NavigationError {
        log::debug!("erroneous date: year {year} is outside {}", self.range);
        NavigationError::OutOfBoundYear {
            year,
            min: self.range.lower(),
            max: self.range.upper(),
        }
    }
}

fn mark_index(day: u8) -> Result<usize, DateError> {
    let day = Day::try_from(day)?;
    Ok(usize::from(day.get() - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Weekday;

    fn date(y: u16, m: u8, d: u8) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn view(y: u16, m: u8, d: u8) -> CalendarView {
        CalendarView::new(CalendarConfig::default(), date(y, m, d))
    }

    fn pos(row: u8, col: u8) -> CellPosition {
        CellPosition::new(row, col).unwrap()
    }

    fn range(min: Option<u16>, max: Option<u16>) -> YearRange {
        YearRange::new(min, max).unwrap()
    }

    fn displayed(v: &CalendarView) -> (u16, u8) {
        (v.displayed_year().get(), v.displayed_month().get())
    }

    fn assert_consistent(v: &CalendarView) {
        if let Some(day) = v.selected_day() {
            assert!(day <= v.grid().days_in_month());
            let cell = v.grid().cell(v.grid().position_of(day).unwrap());
            assert!(cell.is_current());
        }
        let current = v.grid().cells().iter().filter(|c| c.is_current()).count();
        assert_eq!(current, usize::from(v.grid().days_in_month()));
    }

    #[test]
    fn test_new_selects_and_focuses_date() {
        let v = view(2000, 1, 15);
        assert_eq!(displayed(&v), (2000, 1));
        assert_eq!(v.selected_day(), Some(15));
        assert_eq!(v.selected_date(), Some(date(2000, 1, 15)));
        // Jan 1 sits in column 5, so the 15th is index 19
        assert_eq!(v.focus(), pos(2, 5));
        assert_eq!(v.focused_date(), Some(date(2000, 1, 15)));
    }

    #[test]
    fn test_left_right_wrap_between_rows() {
        let mut v = view(2000, 1, 15);
        v.set_focus(pos(0, 6));
        v.move_focus(Direction::Right).unwrap();
        assert_eq!(v.focus(), pos(1, 0));
        v.move_focus(Direction::Left).unwrap();
        assert_eq!(v.focus(), pos(0, 6));
        assert_eq!(displayed(&v), (2000, 1));
    }

    #[test]
    fn test_up_down_saturate() {
        let mut v = view(2000, 1, 15);
        v.set_focus(pos(0, 3));
        v.move_focus(Direction::Up).unwrap();
        assert_eq!(v.focus(), pos(0, 3));

        v.set_focus(pos(5, 3));
        v.move_focus(Direction::Down).unwrap();
        assert_eq!(v.focus(), pos(5, 3));

        v.move_focus(Direction::Up).unwrap();
        assert_eq!(v.focus(), pos(4, 3));
        assert_eq!(displayed(&v), (2000, 1));
    }

    #[test]
    fn test_left_from_first_cell_at_min_year_is_refused() {
        let mut v = view(2000, 1, 15).with_range(range(Some(2000), None));
        v.set_focus(CellPosition::FIRST);
        let before = v.clone();

        let err = v.move_focus(Direction::Left).unwrap_err();
        assert_eq!(
            err,
            NavigationError::OutOfBoundYear {
                year: 1999,
                min: 2000,
                max: 9999
            }
        );
        assert_eq!(v, before);
        assert_eq!(v.focus(), CellPosition::FIRST);
    }

    #[test]
    fn test_left_from_first_cell_enters_previous_month() {
        let mut v = view(2000, 2, 10).with_range(range(Some(2000), None));
        // Feb 1 2000 is a Tuesday, so the first cell is Jan 31
        v.set_focus(CellPosition::FIRST);
        v.move_focus(Direction::Left).unwrap();

        assert_eq!(displayed(&v), (2000, 1));
        assert_eq!(v.focused_date(), Some(date(2000, 1, 30)));
        assert_eq!(v.selected_day(), Some(10));
        assert_consistent(&v);

        // January's first cell already belongs to 1999
        v.set_focus(CellPosition::FIRST);
        assert!(matches!(
            v.move_focus(Direction::Left),
            Err(NavigationError::OutOfBoundYear { year: 1999, .. })
        ));
    }

    #[test]
    fn test_left_from_first_cell_crosses_year() {
        let mut v = view(2000, 1, 15);
        v.set_focus(CellPosition::FIRST);
        v.move_focus(Direction::Left).unwrap();
        assert_eq!(displayed(&v), (1999, 12));
        assert_eq!(v.focused_date(), Some(date(1999, 12, 26)));
        assert_eq!(v.focus(), pos(3, 6));
    }

    #[test]
    fn test_right_from_last_cell_enters_next_month() {
        let mut v = view(2000, 1, 15);
        v.set_focus(CellPosition::LAST);
        assert_eq!(v.focused_date(), Some(date(2000, 2, 6)));

        v.move_focus(Direction::Right).unwrap();
        assert_eq!(displayed(&v), (2000, 2));
        assert_eq!(v.focused_date(), Some(date(2000, 2, 7)));
        assert_eq!(v.focus(), pos(1, 0));
    }

    #[test]
    fn test_right_from_last_cell_at_max_year_is_refused() {
        let mut v = view(2010, 12, 1).with_range(range(None, Some(2010)));
        v.set_focus(CellPosition::LAST);
        let before = v.clone();
        assert!(matches!(
            v.move_focus(Direction::Right),
            Err(NavigationError::OutOfBoundYear {
                year: 2011,
                min: 1,
                max: 2010
            })
        ));
        assert_eq!(v, before);
    }

    #[test]
    fn test_move_focus_across_rows() {
        let mut v = view(2000, 1, 15);
        // Jan 1
        v.set_focus(pos(0, 5));
        v.move_focus_across(Direction::Up).unwrap();
        assert_eq!(displayed(&v), (1999, 12));
        assert_eq!(v.focused_date(), Some(date(1999, 12, 25)));

        let mut v = view(2000, 1, 15);
        // Jan 31
        v.set_focus(pos(5, 0));
        v.move_focus_across(Direction::Down).unwrap();
        assert_eq!(displayed(&v), (2000, 2));
        assert_eq!(v.focused_date(), Some(date(2000, 2, 7)));

        let mut v = view(2000, 1, 15);
        v.set_focus(pos(2, 2));
        v.move_focus_across(Direction::Up).unwrap();
        assert_eq!(v.focus(), pos(1, 2));
        assert_eq!(displayed(&v), (2000, 1));
    }

    #[test]
    fn test_month_navigation_clamps_selection() {
        let mut v = view(2000, 1, 31);
        v.next_month().unwrap();
        assert_eq!(displayed(&v), (2000, 2));
        assert_eq!(v.selected_day(), Some(29));
        assert_eq!(v.focus(), pos(4, 1));
        assert_consistent(&v);

        let mut v = view(2000, 1, 31);
        v.previous_month().unwrap();
        assert_eq!(displayed(&v), (1999, 12));
        assert_eq!(v.selected_day(), Some(31));
        assert_eq!(v.focused_date(), Some(date(1999, 12, 31)));
    }

    #[test]
    fn test_year_navigation_clamps_leap_day() {
        let mut v = view(2000, 2, 29);
        v.next_year().unwrap();
        assert_eq!(displayed(&v), (2001, 2));
        assert_eq!(v.selected_date(), Some(date(2001, 2, 28)));

        v.previous_year().unwrap();
        assert_eq!(displayed(&v), (2000, 2));
        // the clamp is not undone
        assert_eq!(v.selected_day(), Some(28));
    }

    #[test]
    fn test_month_navigation_respects_range() {
        let mut v = view(2000, 1, 5).with_range(range(Some(2000), Some(2000)));
        let before = v.clone();
        assert!(matches!(
            v.previous_month(),
            Err(NavigationError::OutOfBoundYear { year: 1999, .. })
        ));
        assert!(matches!(
            v.previous_year(),
            Err(NavigationError::OutOfBoundYear { year: 1999, .. })
        ));
        assert_eq!(v, before);

        let mut v = view(2000, 12, 5).with_range(range(Some(2000), Some(2000)));
        assert!(matches!(
            v.next_month(),
            Err(NavigationError::OutOfBoundYear { year: 2001, .. })
        ));
        assert!(matches!(
            v.next_year(),
            Err(NavigationError::OutOfBoundYear { year: 2001, .. })
        ));
        assert_eq!(displayed(&v), (2000, 12));
    }

    #[test]
    fn test_navigation_at_supported_limits() {
        let mut v = view(1, 1, 1);
        assert!(matches!(
            v.previous_month(),
            Err(NavigationError::OutOfBoundYear { year: 0, .. })
        ));
        let mut v = view(9999, 12, 31);
        assert!(matches!(
            v.next_day(),
            Err(NavigationError::OutOfBoundYear { year: 10000, .. })
        ));
        assert_eq!(v.selected_date(), Some(date(9999, 12, 31)));
    }

    #[test]
    fn test_navigate_dispatch() {
        let mut v = view(2000, 1, 15);
        v.navigate(Direction::Left, true).unwrap();
        assert_eq!(displayed(&v), (1999, 12));
        v.navigate(Direction::Right, true).unwrap();
        assert_eq!(displayed(&v), (2000, 1));
        v.navigate(Direction::Down, true).unwrap();
        assert_eq!(displayed(&v), (2001, 1));
        v.navigate(Direction::Up, true).unwrap();
        assert_eq!(displayed(&v), (2000, 1));

        let focus = v.focus();
        v.navigate(Direction::Right, false).unwrap();
        assert_eq!(v.focus().index(), focus.index() + 1);
        assert_eq!(v.selected_day(), Some(15));
    }

    #[test]
    fn test_select_prev_cell_changes_month() {
        let mut v = view(2000, 1, 15);
        v.select_cell(CellPosition::FIRST).unwrap();
        assert_eq!(displayed(&v), (1999, 12));
        assert_eq!(v.selected_date(), Some(date(1999, 12, 27)));
        assert_eq!(v.focus(), pos(4, 0));
        assert_consistent(&v);
    }

    #[test]
    fn test_select_next_cell_changes_month() {
        let mut v = view(2000, 1, 15);
        v.set_focus(CellPosition::LAST);
        v.select_focused().unwrap();
        assert_eq!(displayed(&v), (2000, 2));
        assert_eq!(v.selected_date(), Some(date(2000, 2, 6)));
        assert_eq!(v.focused_date(), Some(date(2000, 2, 6)));
    }

    #[test]
    fn test_select_current_cell() {
        let mut v = view(2000, 1, 15);
        v.select_cell(pos(1, 0)).unwrap();
        assert_eq!(v.selected_date(), Some(date(2000, 1, 3)));
        assert_eq!(v.focus(), pos(1, 0));
    }

    #[test]
    fn test_select_cell_out_of_range_is_refused() {
        let mut v = view(2000, 1, 15).with_range(range(Some(2000), None));
        let before = v.clone();
        assert!(matches!(
            v.select_cell(CellPosition::FIRST),
            Err(NavigationError::OutOfBoundYear { year: 1999, .. })
        ));
        assert_eq!(v, before);
    }

    #[test]
    fn test_select_day() {
        let mut v = view(2001, 2, 1);
        v.select_day(28).unwrap();
        assert_eq!(v.selected_day(), Some(28));
        assert_eq!(
            v.select_day(29),
            Err(NavigationError::InvalidDate(DateError::InvalidDay {
                year: 2001,
                month: 2,
                day: 29
            }))
        );
        assert_eq!(v.selected_day(), Some(28));
    }

    #[test]
    fn test_select_month() {
        let mut v = view(2000, 1, 31).with_range(range(Some(1990), Some(2030)));
        v.select_month(2024, 2).unwrap();
        assert_eq!(displayed(&v), (2024, 2));
        assert_eq!(v.selected_day(), Some(29));

        assert_eq!(
            v.select_month(2024, 13),
            Err(NavigationError::InvalidDate(DateError::InvalidMonth(13)))
        );
        assert!(matches!(
            v.select_month(2031, 1),
            Err(NavigationError::OutOfBoundYear { year: 2031, .. })
        ));
        assert_eq!(displayed(&v), (2024, 2));
    }

    #[test]
    fn test_select_date() {
        let mut v = view(2000, 1, 1);
        v.select_date(date(2024, 7, 4)).unwrap();
        assert_eq!(v.selected_date(), Some(date(2024, 7, 4)));
        assert_eq!(v.focused_date(), Some(date(2024, 7, 4)));
    }

    #[test]
    fn test_next_day_from_month_end() {
        let mut v = view(2000, 1, 31);
        v.next_day().unwrap();
        assert_eq!(displayed(&v), (2000, 2));
        assert_eq!(v.selected_date(), Some(date(2000, 2, 1)));
        assert_eq!(v.focused_date(), Some(date(2000, 2, 1)));
    }

    #[test]
    fn test_next_day_from_december_wraps_year() {
        let mut v = view(1999, 12, 31);
        v.next_day().unwrap();
        assert_eq!(displayed(&v), (2000, 1));
        assert_eq!(v.selected_date(), Some(date(2000, 1, 1)));

        v.previous_day().unwrap();
        assert_eq!(displayed(&v), (1999, 12));
        assert_eq!(v.selected_date(), Some(date(1999, 12, 31)));
    }

    #[test]
    fn test_step_day_by_week() {
        let mut v = view(2024, 2, 26);
        v.step_day(7).unwrap();
        assert_eq!(v.selected_date(), Some(date(2024, 3, 4)));
        v.step_day(-14).unwrap();
        assert_eq!(v.selected_date(), Some(date(2024, 2, 19)));
    }

    #[test]
    fn test_step_day_without_selection_starts_at_focus() {
        let mut v = view(2000, 1, 15);
        v.clear_selection();
        v.set_focus(CellPosition::FIRST);
        v.next_day().unwrap();
        assert_eq!(displayed(&v), (1999, 12));
        assert_eq!(v.selected_date(), Some(date(1999, 12, 28)));
    }

    #[test]
    fn test_next_day_at_max_year_is_refused() {
        let mut v = view(2010, 12, 31).with_range(range(None, Some(2010)));
        let before = v.clone();
        assert!(matches!(
            v.next_day(),
            Err(NavigationError::OutOfBoundYear { year: 2011, .. })
        ));
        assert_eq!(v, before);
    }

    #[test]
    fn test_long_walk_keeps_invariants() {
        let start = date(1999, 11, 20);
        let mut v = CalendarView::new(
            CalendarConfig {
                week_start: Weekday::Sunday,
                ..CalendarConfig::default()
            },
            start,
        );
        for step in 1..=800 {
            v.next_day().unwrap();
            let selected = v.selected_date().unwrap();
            assert_eq!(start.days_until(&selected), step);
            assert!(v.displays_month_of(&selected));
            assert_eq!(v.focused_date(), Some(selected));
            assert_consistent(&v);
        }
    }

    #[test]
    fn test_no_month_change() {
        let config = CalendarConfig {
            no_month_change: true,
            ..CalendarConfig::default()
        };
        let mut v = CalendarView::new(config, date(2000, 1, 30));
        let before = v.clone();

        assert_eq!(v.next_month(), Err(NavigationError::MonthChangeDisabled));
        assert_eq!(
            v.select_cell(CellPosition::FIRST),
            Err(NavigationError::MonthChangeDisabled)
        );
        v.set_focus(CellPosition::FIRST);
        assert_eq!(
            v.move_focus(Direction::Left),
            Err(NavigationError::MonthChangeDisabled)
        );
        v.set_focus(before.focus());
        assert_eq!(v, before);

        v.next_day().unwrap();
        assert_eq!(v.selected_day(), Some(31));
        assert_eq!(v.next_day(), Err(NavigationError::MonthChangeDisabled));
        assert_eq!(v.selected_day(), Some(31));

        // programmatic jumps still work
        v.select_month(2000, 3).unwrap();
        assert_eq!(displayed(&v), (2000, 3));
    }

    #[test]
    fn test_set_range_clamps_displayed_year() {
        let mut v = view(1990, 6, 15);
        v.set_range(range(Some(2000), Some(2010)));
        assert_eq!(displayed(&v), (2000, 6));
        assert_eq!(v.selected_date(), Some(date(2000, 6, 15)));

        v.set_range(range(Some(1980), Some(1985)));
        assert_eq!(displayed(&v), (1985, 6));
        assert_eq!(v.range().to_string(), "1980/1985");
    }

    #[test]
    fn test_focus_without_selection_after_month_change() {
        let mut v = view(2000, 1, 15);
        v.clear_selection();

        // Prev cell in February's grid too: moves to Feb 1
        v.set_focus(CellPosition::FIRST);
        v.next_month().unwrap();
        assert_eq!(v.focus(), pos(0, 1));
        assert_eq!(v.focused_date(), Some(date(2000, 2, 1)));

        // Next cell: moves to the last day
        v.set_focus(CellPosition::LAST);
        v.previous_month().unwrap();
        v.next_month().unwrap();
        assert_eq!(v.focused_date(), Some(date(2000, 2, 29)));

        // Current cell stays put
        v.set_focus(pos(2, 2));
        v.next_month().unwrap();
        assert_eq!(v.focus(), pos(2, 2));
        assert_eq!(v.selected_day(), None);
    }

    #[test]
    fn test_marks() {
        let mut v = view(2000, 1, 15);
        assert_eq!(v.mark_day(5), Ok(true));
        assert_eq!(v.mark_day(5), Ok(false));
        assert!(v.mark_day(31).unwrap());
        assert!(v.mark_day(0).is_err());
        assert!(v.mark_day(32).is_err());
        assert!(v.is_marked(5));
        assert!(!v.is_marked(6));
        assert!(!v.is_marked(40));

        v.next_month().unwrap();
        assert_eq!(v.marked_days().collect::<Vec<_>>(), vec![5, 31]);
        // Feb 2000 has no 31st: the Next cell showing "5" is not marked
        assert!(v.is_cell_marked(v.grid().position_of(5).unwrap()));
        let next_five = v
            .grid()
            .cells()
            .iter()
            .find(|c| c.relation == MonthRelation::Next && c.day == 5)
            .unwrap()
            .position();
        assert!(!v.is_cell_marked(next_five));

        assert_eq!(v.unmark_day(5), Ok(true));
        assert_eq!(v.unmark_day(5), Ok(false));
        v.clear_marks();
        assert_eq!(v.marked_days().count(), 0);
    }

    #[test]
    fn test_week_numbers_follow_config() {
        let mut v = view(2020, 12, 1);
        assert_eq!(v.week_numbers(), Ok(None));

        v.set_config(CalendarConfig {
            show_week_numbers: true,
            ..CalendarConfig::default()
        });
        let weeks = v.week_numbers().unwrap().unwrap();
        assert_eq!(weeks[0].week, 49);
        assert_eq!(weeks[5].to_string(), "2021-W01");
    }

    #[test]
    fn test_set_config_week_start_keeps_focused_date() {
        let mut v = view(2000, 1, 15);
        v.set_config(CalendarConfig {
            week_start: Weekday::Sunday,
            ..CalendarConfig::default()
        });
        assert_eq!(v.grid().first_offset(), 6);
        assert_eq!(v.focused_date(), Some(date(2000, 1, 15)));
        assert_eq!(v.focus(), pos(2, 6));
    }

    #[test]
    fn test_error_display() {
        let err = NavigationError::OutOfBoundYear {
            year: 1999,
            min: 2000,
            max: 2010,
        };
        assert_eq!(err.to_string(), "Erroneous date: year 1999 is outside 2000..=2010");
        let err: NavigationError = DateError::InvalidMonth(13).into();
        assert_eq!(err.to_string(), "Invalid month: 13 (must be 1-12)");
    }
}
