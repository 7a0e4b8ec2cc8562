//! Month grid derivation.
//!
//! A month is always laid out as 6 rows of 7 days (Sunday first): leading
//! days of the previous month, every day of the month, then trailing days
//! of the next month. Cells are pure data; the renderer decides how they look.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::CalendarError;
use crate::models::event::Event;
use crate::utils::date::{
    date_from_month_index, days_in_month, days_in_previous_month, first_weekday, month_title,
    weekday_index,
};

pub const GRID_COLUMNS: usize = 7;
pub const GRID_ROWS: usize = 6;
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;

/// Column headers, Sunday first
pub const WEEKDAY_HEADERS: [&str; GRID_COLUMNS] = ["日", "月", "火", "水", "木", "金", "土"];

/// Titles listed inside a cell before collapsing into "+n"
pub const PREVIEW_LIMIT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day_number: u32,
    /// Set for in-month cells only
    pub date: Option<NaiveDate>,
    pub is_out_of_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_weekend_saturday: bool,
    pub is_weekend_sunday: bool,
    pub has_events: bool,
    pub event_count: usize,
}

impl DayCell {
    fn out_of_month(day_number: u32) -> Self {
        Self {
            day_number,
            date: None,
            is_out_of_month: true,
            is_today: false,
            is_selected: false,
            is_weekend_saturday: false,
            is_weekend_sunday: false,
            has_events: false,
            event_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    /// Zero-based month (0 = January)
    pub month: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn title(&self) -> String {
        month_title(self.year, self.month)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(GRID_COLUMNS)
    }

    pub fn cell_for(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date == Some(date))
    }

    /// Move the selection marker without re-deriving the rest of the grid.
    pub fn mark_selected(&mut self, date: NaiveDate) {
        for cell in &mut self.cells {
            cell.is_selected = cell.date == Some(date);
        }
    }
}

/// Build the 42-cell grid for `month` (zero-based) of `year`.
pub fn build_month_grid<'a, I>(
    year: i32,
    month: u32,
    selected: NaiveDate,
    today: NaiveDate,
    events: I,
) -> Result<MonthGrid, CalendarError>
where
    I: IntoIterator<Item = &'a Event>,
{
    let invalid = || CalendarError::InvalidDate(format!("{}-{:02}", year, month + 1));
    if month > 11 {
        return Err(invalid());
    }

    let first = first_weekday(year, month + 1).ok_or_else(invalid)?;
    let month_days = days_in_month(year, month + 1).ok_or_else(invalid)?;
    let prev_month_days = days_in_previous_month(year, month + 1).ok_or_else(invalid)?;

    let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
    for event in events {
        *counts.entry(event.date).or_default() += 1;
    }

    let mut cells = Vec::with_capacity(GRID_CELLS);

    for day_number in (prev_month_days - first + 1)..=prev_month_days {
        cells.push(DayCell::out_of_month(day_number));
    }

    for day_number in 1..=month_days {
        let date = date_from_month_index(year, month, day_number).ok_or_else(invalid)?;
        let weekday = weekday_index(date);
        let event_count = counts.get(&date).copied().unwrap_or(0);
        cells.push(DayCell {
            day_number,
            date: Some(date),
            is_out_of_month: false,
            is_today: date == today,
            is_selected: date == selected,
            is_weekend_saturday: weekday == 6,
            is_weekend_sunday: weekday == 0,
            has_events: event_count > 0,
            event_count,
        });
    }

    let trailing = GRID_CELLS.saturating_sub(cells.len());
    for day_number in 1..=trailing as u32 {
        cells.push(DayCell::out_of_month(day_number));
    }

    Ok(MonthGrid { year, month, cells })
}

/// Titles shown inside a day cell plus the count hidden behind "+n"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPreview {
    pub titles: Vec<String>,
    pub overflow: usize,
}

pub fn day_preview<'a, I>(events: I, date: NaiveDate, limit: usize) -> DayPreview
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut preview = DayPreview::default();
    for event in events.into_iter().filter(|e| e.date == date) {
        if preview.titles.len() < limit {
            preview.titles.push(event.title.clone());
        } else {
            preview.overflow += 1;
        }
    }
    preview
}
