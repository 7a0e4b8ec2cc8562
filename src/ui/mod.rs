//! Terminal rendering adapter.
//!
//! Walks the derived month grid and day timeline and draws them as text into
//! the panes of a [`RenderSurface`]. Holds no calendar state of its own.

pub mod surface;
pub mod views;

pub use surface::{Pane, RenderSurface};

use chrono::NaiveTime;

use crate::models::settings::{DataSource, Settings};
use crate::services::calendar::{CalendarController, NoticeLevel};
use crate::services::detail::EventDetail;

pub struct TerminalRenderer {
    pub show_record_lane: bool,
    /// List event titles under the grid (members calendar style)
    pub show_previews: bool,
}

impl TerminalRenderer {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            show_record_lane: settings.calendar.show_record_lane,
            show_previews: settings.calendar.data_source == DataSource::Remote,
        }
    }

    /// Draw the month grid and the selected day into `surface`
    pub fn render(&self, controller: &CalendarController, surface: &mut RenderSurface, now: Option<NaiveTime>) {
        let cursor = controller.cursor();
        surface.draw(Pane::Header, |out| views::month_view::render_header(out, cursor));

        if let Some(grid) = controller.grid() {
            let events = controller.month_events();
            let previews = self.show_previews;
            surface.draw(Pane::MonthGrid, |out| {
                views::month_view::render_month(out, grid, events, previews)
            });
        }

        if let Some(timeline) = controller.timeline() {
            let now = now.filter(|_| timeline.date == controller.today());
            let records = self.show_record_lane;
            surface.draw(Pane::Timeline, |out| {
                views::day_view::render_timeline(out, timeline, records, now)
            });
        }
    }

    pub fn render_detail(&self, detail: &EventDetail, surface: &mut RenderSurface) {
        surface.draw(Pane::Detail, |out| views::detail_view::render_detail(out, detail));
    }

    /// Flush queued notices into the notice pane
    pub fn render_notices(&self, controller: &mut CalendarController, surface: &mut RenderSurface) {
        let notices = controller.take_notices();
        if notices.is_empty() {
            return;
        }
        surface.draw(Pane::Notices, |out| {
            for notice in &notices {
                let tag = match notice.level {
                    NoticeLevel::Info => "info",
                    NoticeLevel::Error => "error",
                };
                out.push_str(&format!("[{}] {}\n", tag, notice.message));
            }
        });
    }
}
