// Raw event records as delivered by the page payload or the listing endpoints

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::{Event, EventKind};
use crate::error::CalendarError;
use crate::utils::date::{parse_date, parse_local_datetime};

/// Record identifiers arrive as numbers from the page payload and as
/// strings from some endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One unvalidated record. Accepts both the embedded shape (`date` plus
/// hour/minute fields) and the API shape (`startTime`/`endTime`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventRecord {
    pub id: Option<RawId>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub start_hour: Option<u32>,
    pub start_minute: Option<u32>,
    pub end_hour: Option<u32>,
    pub end_minute: Option<u32>,
    pub memo: Option<String>,
    pub task: Option<String>,
    pub is_synced_from_google: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub editable: Option<bool>,
    pub deletable: Option<bool>,
}

/// Members listing response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleEnvelope {
    #[serde(default)]
    pub schedules: Vec<serde_json::Value>,
}

impl RawEventRecord {
    fn id_string(&self) -> String {
        self.id.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    fn resolve_kind(&self) -> Result<EventKind, CalendarError> {
        match self.kind.as_deref() {
            Some(tag) => EventKind::from_type_tag(tag).ok_or_else(|| {
                CalendarError::malformed(self.id_string(), format!("unknown type `{}`", tag))
            }),
            None if self.is_synced_from_google.unwrap_or(false) => Ok(EventKind::GoogleSynced),
            None => Ok(EventKind::Schedule),
        }
    }

    fn timestamp(&self, text: Option<&str>, field: &str) -> Result<Option<NaiveDateTime>, CalendarError> {
        match text {
            None => Ok(None),
            Some(text) => parse_local_datetime(text).map(Some).ok_or_else(|| {
                CalendarError::malformed(self.id_string(), format!("unparsable {}", field))
            }),
        }
    }

    /// Validate and convert into an [`Event`].
    pub fn normalize(&self) -> Result<Event, CalendarError> {
        let id = self.id_string();
        if id.is_empty() {
            return Err(CalendarError::malformed(id, "missing id"));
        }

        let kind = self.resolve_kind()?;
        let start_stamp = self.timestamp(self.start_time.as_deref(), "startTime")?;
        let end_stamp = self.timestamp(self.end_time.as_deref(), "endTime")?;

        let date = match self.date.as_deref() {
            Some(text) => parse_date(text)
                .ok_or_else(|| CalendarError::malformed(&id, format!("unparsable date `{}`", text)))?,
            None => start_stamp
                .map(|stamp| stamp.date())
                .ok_or_else(|| CalendarError::malformed(&id, "missing date"))?,
        };

        let start = match self.start_hour {
            Some(hour) => {
                let minute = self
                    .start_minute
                    .ok_or_else(|| CalendarError::malformed(&id, "missing start minute"))?;
                (hour, minute)
            }
            None => start_stamp
                .map(|stamp| (stamp.hour(), stamp.minute()))
                .ok_or_else(|| CalendarError::malformed(&id, "missing start time"))?,
        };
        let end = match self.end_hour {
            Some(hour) => {
                let minute = self
                    .end_minute
                    .ok_or_else(|| CalendarError::malformed(&id, "missing end minute"))?;
                (hour, minute)
            }
            None => end_stamp
                .map(|stamp| (stamp.hour(), stamp.minute()))
                .ok_or_else(|| CalendarError::malformed(&id, "missing end time"))?,
        };

        let mut builder = Event::builder(kind)
            .id(id)
            .title(self.title.clone().unwrap_or_default())
            .date(date)
            .start(start.0, start.1)
            .end(end.0, end.1)
            .memo(self.memo.clone().unwrap_or_default())
            .task(self.task.clone().unwrap_or_default());
        if let Some(editable) = self.editable {
            builder = builder.editable(editable);
        }
        if let Some(deletable) = self.deletable {
            builder = builder.deletable(deletable);
        }
        builder.build()
    }
}

/// Best-effort id of a record that may not deserialize
fn record_id(value: &serde_json::Value) -> String {
    match value.get("id") {
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
        _ => "?".to_string(),
    }
}

/// Result of normalizing a whole payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub events: Vec<Event>,
    pub skipped: Vec<CalendarError>,
}

/// Normalize every record independently. Records that fail are reported in
/// `skipped` and never abort the batch.
pub fn normalize_batch<I>(records: I) -> NormalizedBatch
where
    I: IntoIterator<Item = serde_json::Value>,
{
    let mut batch = NormalizedBatch::default();

    for value in records {
        let id = record_id(&value);
        let outcome = serde_json::from_value::<RawEventRecord>(value)
            .map_err(|err| CalendarError::malformed(id, err.to_string()))
            .and_then(|record| record.normalize());

        match outcome {
            Ok(event) => batch.events.push(event),
            Err(err) => {
                log::warn!("Skipping event record: {}", err);
                batch.skipped.push(err);
            }
        }
    }

    log::debug!(
        "Normalized {} events ({} skipped)",
        batch.events.len(),
        batch.skipped.len()
    );
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_embedded_shape() {
        let record: RawEventRecord = serde_json::from_value(json!({
            "id": 12,
            "title": "Weekly sync",
            "date": "2024-02-14",
            "startHour": 9,
            "startMinute": 0,
            "endHour": 9,
            "endMinute": 15,
            "memo": null,
            "task": "Meetings",
            "isSyncedFromGoogle": false,
            "type": "schedule",
            "editable": true,
            "deletable": true
        }))
        .unwrap();

        let event = record.normalize().unwrap();
        assert_eq!(event.id, "12");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
        assert_eq!(event.kind, EventKind::Schedule);
        assert_eq!(event.memo, "");
        assert_eq!(event.task, "Meetings");
        assert_eq!(event.duration_minutes(), 15);
    }

    #[test]
    fn test_api_shape_takes_date_from_start_time() {
        let record: RawEventRecord = serde_json::from_value(json!({
            "id": "abc",
            "title": "Dentist",
            "startTime": "2024-03-01T14:30:00",
            "endTime": "2024-03-01T15:00:00",
            "isSyncedFromGoogle": true
        }))
        .unwrap();

        let event = record.normalize().unwrap();
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(event.kind, EventKind::GoogleSynced);
        assert_eq!((event.start_hour, event.start_minute), (14, 30));
        assert!(!event.editable);
    }

    #[test]
    fn test_unknown_type_is_malformed() {
        let record = RawEventRecord {
            id: Some(RawId::Number(1)),
            date: Some("2024-02-14".into()),
            start_hour: Some(9),
            start_minute: Some(0),
            end_hour: Some(10),
            end_minute: Some(0),
            kind: Some("holiday".into()),
            ..Default::default()
        };
        assert!(matches!(
            record.normalize(),
            Err(CalendarError::MalformedEvent { .. })
        ));
    }

    #[test]
    fn test_batch_skips_bad_records() {
        let batch = normalize_batch(vec![
            json!({"id": 1, "date": "2024-02-14", "startHour": 9, "startMinute": 0, "endHour": 10, "endMinute": 0, "type": "schedule"}),
            json!({"id": 2, "startHour": 9, "endHour": 10, "type": "record"}),
            json!({"id": 3, "date": "2024-02-14", "startHour": 23, "startMinute": 0, "endHour": 0, "endMinute": 0, "type": "google"}),
            json!({"id": 4, "date": "2024-02-14", "startHour": -1, "endHour": 10}),
            json!({"id": 5, "date": "2024-02-14", "startHour": 7, "startMinute": 0, "endHour": 8, "endMinute": 0, "type": "record"}),
        ]);

        let ids: Vec<_> = batch.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);
        assert_eq!(batch.skipped.len(), 3);
        assert!(matches!(
            batch.skipped[1],
            CalendarError::InvertedTimeRange { .. }
        ));
    }

    #[test]
    fn test_missing_minutes_skip_the_record() {
        let batch = normalize_batch(vec![
            json!({"id": 6, "date": "2024-02-14", "startHour": 9, "endHour": 10, "endMinute": 0}),
            json!({"id": 7, "date": "2024-02-14", "startHour": 9, "startMinute": 30, "endHour": 10}),
            json!({"id": 8, "date": "2024-02-14", "startHour": 9, "startMinute": 30, "endHour": 10, "endMinute": 0}),
        ]);

        let ids: Vec<_> = batch.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["8"]);
        assert_eq!(
            batch.skipped,
            vec![
                CalendarError::malformed("6", "missing start minute"),
                CalendarError::malformed("7", "missing end minute"),
            ]
        );
    }

    #[test]
    fn test_undecodable_record_keeps_its_id() {
        let batch = normalize_batch(vec![json!({"id": 9, "startHour": "nine"})]);
        assert!(matches!(
            &batch.skipped[0],
            CalendarError::MalformedEvent { id, .. } if id == "9"
        ));
    }
}
