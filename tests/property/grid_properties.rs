// Property-based tests for month grid and day timeline layout
// Checks structural invariants over random months and time ranges

use chrono::{Datelike, NaiveDate};
use planvista_calendar::models::event::{Event, EventKind};
use planvista_calendar::services::day_timeline::{build_day_timeline, COMPACT_THRESHOLD_MINUTES};
use planvista_calendar::services::month_grid::{build_month_grid, GRID_CELLS};
use planvista_calendar::utils::date::{days_in_month, first_weekday, shift_month_index};
use proptest::prelude::*;

const NO_EVENTS: &[Event] = &[];

proptest! {
    /// Property: every grid has 42 cells and exactly one per day of the month
    #[test]
    fn prop_grid_covers_month(year in 1970..2100i32, month in 0..12u32) {
        let today = NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap();
        let grid = build_month_grid(year, month, today, today, NO_EVENTS).unwrap();

        prop_assert_eq!(grid.cells.len(), GRID_CELLS);
        let in_month = grid.cells.iter().filter(|cell| !cell.is_out_of_month).count() as u32;
        prop_assert_eq!(in_month, days_in_month(year, month + 1).unwrap());

        let leading = grid.cells.iter().take_while(|cell| cell.is_out_of_month).count() as u32;
        prop_assert_eq!(leading, first_weekday(year, month + 1).unwrap());
    }

    /// Property: in-month cells carry consecutive dates starting on the 1st
    #[test]
    fn prop_grid_dates_consecutive(year in 1970..2100i32, month in 0..12u32) {
        let today = NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap();
        let grid = build_month_grid(year, month, today, today, NO_EVENTS).unwrap();

        for (offset, cell) in grid.cells.iter().filter(|cell| !cell.is_out_of_month).enumerate() {
            let date = cell.date.unwrap();
            prop_assert_eq!(date.day() as usize, offset + 1);
            prop_assert_eq!(date.month0(), month);
        }
    }

    /// Property: deriving twice from the same input gives the same grid
    #[test]
    fn prop_grid_is_idempotent(year in 1970..2100i32, month in 0..12u32, day in 1..=28u32) {
        let selected = NaiveDate::from_ymd_opt(year, month + 1, day).unwrap();
        let events = vec![
            Event::builder(EventKind::Schedule)
                .id("1")
                .date(selected)
                .start(9, 0)
                .end(10, 0)
                .build()
                .unwrap(),
        ];

        let first = build_month_grid(year, month, selected, selected, &events).unwrap();
        let second = build_month_grid(year, month, selected, selected, &events).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: twelve month steps forward land on the same month next year
    #[test]
    fn prop_twelve_steps_is_one_year(year in 1970..2100i32, month in 0..12u32) {
        prop_assert_eq!(shift_month_index(year, month, 12), (year + 1, month));
        prop_assert_eq!(shift_month_index(year, month, -12), (year - 1, month));
    }

    /// Property: a block spans exactly its duration at one pixel per minute
    #[test]
    fn prop_block_geometry(start in 0..(24 * 60u32), length in 0..(24 * 60u32)) {
        let end = (start + length).min(23 * 60 + 59);
        let date = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        let events = vec![
            Event::builder(EventKind::Schedule)
                .id("p")
                .date(date)
                .start(start / 60, start % 60)
                .end(end / 60, end % 60)
                .build()
                .unwrap(),
        ];

        let timeline = build_day_timeline(date, &events);
        let block = &timeline.schedule_lane[0];
        prop_assert_eq!(block.top_offset_minutes, i64::from(start));
        prop_assert_eq!(block.height_minutes, i64::from(end - start));
        prop_assert_eq!(block.is_compact, block.height_minutes < COMPACT_THRESHOLD_MINUTES);
    }
}
