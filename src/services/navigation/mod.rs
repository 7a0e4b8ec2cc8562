//! Month and day cursor movement.
//!
//! Every operation mutates the cursor it is handed and reports which derived
//! views must be rebuilt.

use chrono::NaiveDate;

use crate::error::CalendarError;
use crate::models::cursor::CalendarCursor;
use crate::utils::date::{shift_day, shift_month_index};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn delta(self) -> i32 {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildScope {
    Grid,
    Timeline,
    Both,
}

impl RebuildScope {
    pub fn includes_grid(self) -> bool {
        matches!(self, Self::Grid | Self::Both)
    }

    pub fn includes_timeline(self) -> bool {
        matches!(self, Self::Timeline | Self::Both)
    }
}

pub struct NavigationController;

impl NavigationController {
    /// Step the displayed month. The selected date stays where it is.
    pub fn advance_month(cursor: &mut CalendarCursor, direction: Direction) -> RebuildScope {
        let (year, month) =
            shift_month_index(cursor.displayed_year, cursor.displayed_month, direction.delta());
        log::debug!(
            "Month {:?}: {}-{:02} -> {}-{:02}",
            direction,
            cursor.displayed_year,
            cursor.displayed_month + 1,
            year,
            month + 1
        );
        cursor.displayed_year = year;
        cursor.displayed_month = month;
        RebuildScope::Grid
    }

    /// Step the selected date by one day, following it into the next or
    /// previous month when it leaves the displayed one.
    pub fn advance_day(
        cursor: &mut CalendarCursor,
        direction: Direction,
    ) -> Result<RebuildScope, CalendarError> {
        let next = shift_day(cursor.selected_date, i64::from(direction.delta())).ok_or_else(|| {
            CalendarError::InvalidDate(format!("{} {:?}", cursor.selected_date, direction))
        })?;
        log::debug!("Day {:?}: {} -> {}", direction, cursor.selected_date, next);
        Ok(Self::select_date(cursor, next))
    }

    pub fn select_date(cursor: &mut CalendarCursor, date: NaiveDate) -> RebuildScope {
        cursor.selected_date = date;
        if cursor.sync_to_selected() {
            RebuildScope::Both
        } else {
            RebuildScope::Timeline
        }
    }

    pub fn jump_to_today(cursor: &mut CalendarCursor, today: NaiveDate) -> RebuildScope {
        Self::select_date(cursor, today)
    }
}
