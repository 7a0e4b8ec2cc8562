// Integration tests for settings persistence and the calendar flows
mod fixtures;

use chrono::NaiveDate;
use fixtures::{dates, payloads};
use mockall::mock;
use planvista_calendar::models::settings::{CalendarMode, DataSource, Settings};
use planvista_calendar::services::calendar::CalendarController;
use planvista_calendar::services::navigation::{Direction, RebuildScope};
use planvista_calendar::services::remote::EventSource;
use planvista_calendar::services::settings::SettingsService;
use planvista_calendar::ui::{RenderSurface, TerminalRenderer};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

mock! {
    Listing {}
    impl EventSource for Listing {
        fn month_events(&self, year: i32, month: u32) -> anyhow::Result<Vec<Value>>;
        fn day_events(&self, date: NaiveDate) -> anyhow::Result<Vec<Value>>;
    }
}

#[test]
fn test_settings_persistence() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let service = SettingsService::new(dir.path().join("config.toml"));

    let mut settings = service.get().expect("Failed to get settings");
    assert_eq!(settings, Settings::default());

    settings.calendar.data_source = DataSource::Remote;
    settings.calendar.editable = false;
    settings.remote.user_id = 17;
    service.update(&settings).expect("Failed to update settings");

    // Simulate a second launch
    let reloaded = SettingsService::new(dir.path().join("config.toml"))
        .get()
        .expect("Failed to load settings");
    assert_eq!(reloaded.mode(), CalendarMode::members());
    assert_eq!(reloaded.remote.user_id, 17);
}

#[test]
fn test_embedded_calendar_flow() {
    let mut controller = CalendarController::embedded(dates::valentine_2024(), true, Vec::new());
    let skipped = controller.load_embedded(payloads::embedded_february());
    assert_eq!(skipped, 2);

    let grid = controller.grid().expect("grid is built");
    assert_eq!(grid.cell_for(dates::valentine_2024()).unwrap().event_count, 2);
    assert!(grid.cell_for(dates::leap_day_2024()).unwrap().has_events);

    let timeline = controller.timeline().expect("timeline is built");
    assert_eq!(timeline.schedule_lane.len(), 1);
    assert_eq!(timeline.record_lane.len(), 1);
    assert!(timeline.schedule_lane[0].is_compact);

    let outcome = controller.select_date(dates::leap_day_2024());
    assert_eq!(outcome.scope, RebuildScope::Timeline);
    let timeline = controller.timeline().unwrap();
    assert_eq!(timeline.schedule_lane[0].event.title, "Offsite");
    assert!(controller.grid().unwrap().cell_for(dates::leap_day_2024()).unwrap().is_selected);

    // Crossing into March re-derives the grid
    let outcome = controller.advance_day(Direction::Next).unwrap();
    assert_eq!(outcome.scope, RebuildScope::Both);
    assert_eq!(controller.grid().unwrap().month, 2);
    assert!(controller.timeline().unwrap().is_empty());
}

#[test]
fn test_members_calendar_flow() {
    let mut listing = MockListing::new();
    listing
        .expect_month_events()
        .withf(|year, month| *year == 2024 && *month == 1)
        .returning(|_, _| Ok(payloads::embedded_february()));
    listing
        .expect_day_events()
        .returning(|date| Ok(payloads::members_day(&date.format("%Y-%m-%d").to_string())));

    let mut controller = CalendarController::new(CalendarMode::members(), dates::valentine_2024());
    let fetches = controller.refresh(RebuildScope::Both);
    assert_eq!(fetches.len(), 2);
    controller.run_fetches(&listing, fetches);

    let grid = controller.grid().unwrap();
    assert!(grid.cell_for(dates::leap_day_2024()).unwrap().has_events);

    let selected = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
    let outcome = controller.select_date(selected);
    assert_eq!(outcome.fetches.len(), 1);
    controller.run_fetches(&listing, outcome.fetches);

    let timeline = controller.timeline().unwrap();
    assert_eq!(timeline.date, selected);
    assert_eq!(timeline.schedule_lane.len(), 1);
    let block = &timeline.schedule_lane[0];
    assert_eq!((block.top_offset_minutes, block.height_minutes), (900, 20));
    assert!(block.is_compact);
}

#[test]
fn test_rendered_calendar_text() {
    let mut controller = CalendarController::embedded(dates::valentine_2024(), true, fixtures::events::february());
    let renderer = TerminalRenderer {
        show_record_lane: true,
        show_previews: true,
    };
    let mut surface = RenderSurface::full();
    renderer.render(&controller, &mut surface, None);
    renderer.render_notices(&mut controller, &mut surface);

    let text = surface.compose();
    assert!(text.contains("2024年 2月"));
    assert!(text.contains("[14]•"));
    assert!(text.contains("2/14 Wed"));
    assert!(text.contains("Standup"));
    assert!(text.contains("Focus time"));
}
