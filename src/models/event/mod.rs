// Event module
// Normalized calendar entry shown in the month grid and the day timeline

pub mod raw;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::utils::date::format_hm;

pub use raw::{normalize_batch, NormalizedBatch, RawEventRecord, RawId, ScheduleEnvelope};

/// Origin of an entry. Schedule and GoogleSynced share the schedule lane,
/// Record has its own lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Schedule,
    Record,
    #[serde(rename = "google")]
    GoogleSynced,
}

impl EventKind {
    /// Parse the `type` field of a raw record.
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "schedule" => Some(Self::Schedule),
            "record" => Some(Self::Record),
            "google" => Some(Self::GoogleSynced),
            _ => None,
        }
    }

    pub fn lane(self) -> Lane {
        match self {
            Self::Schedule | Self::GoogleSynced => Lane::Schedule,
            Self::Record => Lane::Record,
        }
    }

    /// Only manually created schedules may be edited or deleted.
    pub fn default_mutable(self) -> bool {
        matches!(self, Self::Schedule)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Schedule,
    Record,
}

/// Normalized calendar entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
    pub memo: String,
    pub task: String,
    pub kind: EventKind,
    pub editable: bool,
    pub deletable: bool,
}

impl Event {
    /// Create a builder for an entry of the given kind
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use planvista_calendar::models::event::{Event, EventKind};
    ///
    /// let event = Event::builder(EventKind::Schedule)
    ///     .id("42")
    ///     .title("Standup")
    ///     .date(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap())
    ///     .start(9, 0)
    ///     .end(9, 15)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(event.duration_minutes(), 15);
    /// ```
    pub fn builder(kind: EventKind) -> EventBuilder {
        EventBuilder::new(kind)
    }

    pub fn start_minutes(&self) -> i64 {
        i64::from(self.start_hour) * 60 + i64::from(self.start_minute)
    }

    pub fn end_minutes(&self) -> i64 {
        i64::from(self.end_hour) * 60 + i64::from(self.end_minute)
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end_minutes() - self.start_minutes()
    }

    pub fn start_label(&self) -> String {
        format_hm(self.start_hour, self.start_minute)
    }

    pub fn end_label(&self) -> String {
        format_hm(self.end_hour, self.end_minute)
    }

    /// `HH:MM ~ HH:MM`
    pub fn time_range_label(&self) -> String {
        format!("{} ~ {}", self.start_label(), self.end_label())
    }

    pub fn is_google_synced(&self) -> bool {
        self.kind == EventKind::GoogleSynced
    }

    pub fn lane(&self) -> Lane {
        self.kind.lane()
    }

    /// Validate field ranges and the time ordering
    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.start_hour > 23 || self.end_hour > 23 {
            return Err(CalendarError::malformed(&self.id, "hour out of range"));
        }
        if self.start_minute > 59 || self.end_minute > 59 {
            return Err(CalendarError::malformed(&self.id, "minute out of range"));
        }
        if self.end_minutes() < self.start_minutes() {
            return Err(CalendarError::InvertedTimeRange {
                id: self.id.clone(),
                start: self.start_label(),
                end: self.end_label(),
            });
        }
        Ok(())
    }
}

/// Builder for events with optional display fields
#[derive(Debug, Clone)]
pub struct EventBuilder {
    kind: EventKind,
    id: Option<String>,
    title: String,
    date: Option<NaiveDate>,
    start: Option<(u32, u32)>,
    end: Option<(u32, u32)>,
    memo: String,
    task: String,
    editable: Option<bool>,
    deletable: Option<bool>,
}

impl EventBuilder {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            id: None,
            title: String::new(),
            date: None,
            start: None,
            end: None,
            memo: String::new(),
            task: String::new(),
            editable: None,
            deletable: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn start(mut self, hour: u32, minute: u32) -> Self {
        self.start = Some((hour, minute));
        self
    }

    pub fn end(mut self, hour: u32, minute: u32) -> Self {
        self.end = Some((hour, minute));
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    /// Override the kind default. Ignored for read-only kinds.
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    /// Override the kind default. Ignored for read-only kinds.
    pub fn deletable(mut self, deletable: bool) -> Self {
        self.deletable = Some(deletable);
        self
    }

    pub fn build(self) -> Result<Event, CalendarError> {
        let id = self.id.unwrap_or_default();
        let date = self
            .date
            .ok_or_else(|| CalendarError::malformed(&id, "missing date"))?;
        let (start_hour, start_minute) = self
            .start
            .ok_or_else(|| CalendarError::malformed(&id, "missing start time"))?;
        let (end_hour, end_minute) = self
            .end
            .ok_or_else(|| CalendarError::malformed(&id, "missing end time"))?;

        let mutable = self.kind.default_mutable();
        let event = Event {
            id,
            title: self.title,
            date,
            start_hour,
            start_minute,
            end_hour,
            end_minute,
            memo: self.memo,
            task: self.task,
            kind: self.kind,
            editable: mutable && self.editable.unwrap_or(true),
            deletable: mutable && self.deletable.unwrap_or(true),
        };

        event.validate()?;
        Ok(event)
    }
}
