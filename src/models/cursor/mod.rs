// Cursor module
// Displayed month plus selected day, the state every view is derived from

use chrono::{Datelike, NaiveDate};

/// `displayed_month` is zero-based (0 = January). The selected date may sit
/// outside the displayed month after month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    pub displayed_year: i32,
    pub displayed_month: u32,
    pub selected_date: NaiveDate,
}

impl CalendarCursor {
    /// Cursor showing the month of `date` with `date` selected
    pub fn at(date: NaiveDate) -> Self {
        Self {
            displayed_year: date.year(),
            displayed_month: date.month0(),
            selected_date: date,
        }
    }

    /// Whether `date` falls inside the displayed month
    pub fn displays(&self, date: NaiveDate) -> bool {
        date.year() == self.displayed_year && date.month0() == self.displayed_month
    }

    /// Move the displayed month onto the selected date's month.
    /// Returns true when the displayed month changed.
    pub fn sync_to_selected(&mut self) -> bool {
        if self.displays(self.selected_date) {
            return false;
        }
        self.displayed_year = self.selected_date.year();
        self.displayed_month = self.selected_date.month0();
        true
    }
}
