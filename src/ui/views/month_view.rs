use std::fmt::Write;

use crate::models::cursor::CalendarCursor;
use crate::services::event_store::EventStore;
use crate::services::month_grid::{day_preview, DayCell, MonthGrid, PREVIEW_LIMIT, WEEKDAY_HEADERS};
use crate::utils::date::{month_title, selected_date_label};

/// Width of one day column, markers included
const CELL_WIDTH: usize = 6;

pub fn render_header(out: &mut String, cursor: &CalendarCursor) {
    let _ = writeln!(
        out,
        "{}    selected: {}",
        month_title(cursor.displayed_year, cursor.displayed_month),
        selected_date_label(cursor.selected_date)
    );
}

/// One cell: `[14]•` selected with events, `<3>` today, `(28)` other month
pub fn format_cell(cell: &DayCell) -> String {
    let (open, close) = if cell.is_out_of_month {
        ('(', ')')
    } else if cell.is_selected {
        ('[', ']')
    } else if cell.is_today {
        ('<', '>')
    } else {
        (' ', ' ')
    };
    let mark = if cell.has_events { '•' } else { ' ' };
    format!("{}{:>2}{}{}", open, cell.day_number, close, mark)
}

pub fn render_month(out: &mut String, grid: &MonthGrid, events: &EventStore, previews: bool) {
    let _ = writeln!(out, "{}", grid.title());
    for header in WEEKDAY_HEADERS {
        // Full-width weekday glyphs take two columns
        let _ = write!(out, " {:<width$}", header, width = CELL_WIDTH - 2);
    }
    out.push('\n');

    for row in grid.rows() {
        let line: String = row
            .iter()
            .map(|cell| format!("{:<width$}", format_cell(cell), width = CELL_WIDTH))
            .collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }

    if previews {
        for cell in grid.cells.iter().filter(|cell| cell.has_events) {
            let Some(date) = cell.date else { continue };
            let preview = day_preview(events.events_on(date), date, PREVIEW_LIMIT);
            let _ = write!(out, "{:>2}: {}", cell.day_number, preview.titles.join(", "));
            if preview.overflow > 0 {
                let _ = write!(out, " +{}件", preview.overflow);
            }
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{Event, EventKind};
    use crate::services::month_grid::build_month_grid;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn schedule(id: &str, on: NaiveDate) -> Event {
        Event::builder(EventKind::Schedule)
            .id(id)
            .title(format!("T{}", id))
            .date(on)
            .start(9, 0)
            .end(10, 0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_format_cell_markers() {
        let events = vec![schedule("1", date(14))];
        let grid = build_month_grid(2024, 1, date(14), date(13), &events).unwrap();

        assert_eq!(format_cell(grid.cell_for(date(14)).unwrap()), "[14]•");
        assert_eq!(format_cell(grid.cell_for(date(13)).unwrap()), "<13> ");
        assert_eq!(format_cell(grid.cell_for(date(2)).unwrap()), "  2  ");
        assert_eq!(format_cell(&grid.cells[0]), "(28) ");
    }

    #[test]
    fn test_render_month_has_six_week_rows() {
        let store = EventStore::new();
        let grid = build_month_grid(2024, 1, date(1), date(1), store.iter()).unwrap();
        let mut out = String::new();
        render_month(&mut out, &grid, &store, false);

        // title + weekday header + 6 week rows
        assert_eq!(out.lines().count(), 8);
        assert!(out.starts_with("2024年 2月"));
    }

    #[test]
    fn test_render_month_previews() {
        let store = EventStore::with_events(vec![
            schedule("1", date(5)),
            schedule("2", date(5)),
            schedule("3", date(5)),
        ]);
        let grid = build_month_grid(2024, 1, date(1), date(1), store.iter()).unwrap();
        let mut out = String::new();
        render_month(&mut out, &grid, &store, true);

        assert!(out.contains(" 5: T1, T2 +1件"));
    }
}
