// Test fixtures - reusable test data
// Shared dates, events and raw payloads for the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use planvista_calendar::models::event::{Event, EventKind};
use serde_json::{json, Value};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Feb 14, 2024 (leap year, month starts on Thursday)
    pub fn valentine_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 14).unwrap()
    }

    /// Feb 29, 2024
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    /// Dec 31, 2024
    pub fn new_years_eve_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    fn event(kind: EventKind, id: &str, title: &str, date: NaiveDate, start: (u32, u32), end: (u32, u32)) -> Event {
        Event::builder(kind)
            .id(id)
            .title(title)
            .date(date)
            .start(start.0, start.1)
            .end(end.0, end.1)
            .build()
            .unwrap()
    }

    /// 15 minute standup, rendered compact
    pub fn standup() -> Event {
        event(EventKind::Schedule, "1", "Standup", dates::valentine_2024(), (9, 0), (9, 15))
    }

    pub fn design_review() -> Event {
        event(EventKind::Schedule, "2", "Design review", dates::valentine_2024(), (13, 0), (14, 30))
    }

    pub fn google_offsite() -> Event {
        event(EventKind::GoogleSynced, "g1", "Offsite", dates::leap_day_2024(), (10, 0), (16, 0))
    }

    pub fn focus_record() -> Event {
        event(EventKind::Record, "r1", "Focus time", dates::valentine_2024(), (10, 0), (12, 0))
    }

    pub fn february() -> Vec<Event> {
        vec![standup(), design_review(), google_offsite(), focus_record()]
    }
}

/// Raw records as delivered with the page or by the listing endpoints
pub mod payloads {
    use super::*;

    pub fn embedded_february() -> Vec<Value> {
        vec![
            json!({"id": 1, "title": "Standup", "date": "2024-02-14", "startHour": 9, "startMinute": 0,
                   "endHour": 9, "endMinute": 15, "task": "Meetings", "type": "schedule"}),
            json!({"id": 2, "title": "Focus time", "date": "2024-02-14", "startHour": 10, "startMinute": 0,
                   "endHour": 12, "endMinute": 0, "type": "record"}),
            json!({"id": 3, "title": "Offsite", "date": "2024-02-29", "startHour": 10, "startMinute": 0,
                   "endHour": 16, "endMinute": 0, "isSyncedFromGoogle": true}),
            // ends before it starts
            json!({"id": 4, "title": "Late", "date": "2024-02-14", "startHour": 23, "startMinute": 0,
                   "endHour": 22, "endMinute": 0, "type": "schedule"}),
            // no date
            json!({"id": 5, "title": "Lost", "startHour": 8, "endHour": 9}),
        ]
    }

    pub fn members_day(date: &str) -> Vec<Value> {
        vec![json!({
            "id": "m1",
            "title": "Client call",
            "startTime": format!("{}T15:00:00", date),
            "endTime": format!("{}T15:20:00", date),
            "memo": "dial-in in invite",
            "isSyncedFromGoogle": false
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_fixture_dates_are_valid() {
        assert_eq!(dates::valentine_2024().month(), 2);
        assert_eq!(dates::leap_day_2024().day(), 29);
        assert_eq!(dates::new_years_eve_2024().day(), 31);
    }

    #[test]
    fn test_fixture_events_are_valid() {
        let events = events::february();
        assert_eq!(events.len(), 4);
        assert_eq!(events::standup().duration_minutes(), 15);
    }
}
