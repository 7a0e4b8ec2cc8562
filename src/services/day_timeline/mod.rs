//! Day timeline derivation.
//!
//! One pixel-unit per minute: a block's top offset is its start in minutes
//! since midnight and its height is its duration. Overlapping blocks are not
//! laid out side by side; they stack at the same horizontal position in input
//! order. Schedules (including Google-synced ones) and records are built into
//! two independent lanes that share the hour gridlines.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::error::CalendarError;
use crate::models::event::{Event, Lane};
use crate::utils::date::format_hm;

pub const MINUTES_PER_HOUR: i64 = 60;
pub const HOURS_PER_DAY: u32 = 24;
pub const DAY_HEIGHT_MINUTES: i64 = MINUTES_PER_HOUR * HOURS_PER_DAY as i64;

/// Blocks shorter than this render in the compact style
pub const COMPACT_THRESHOLD_MINUTES: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineBlock {
    pub top_offset_minutes: i64,
    pub height_minutes: i64,
    pub event: Event,
    pub is_compact: bool,
}

impl TimelineBlock {
    /// Position an event. Inverted ranges are rejected.
    pub fn from_event(event: &Event) -> Result<Self, CalendarError> {
        let top = event.start_minutes();
        let height = event.end_minutes() - top;
        if height < 0 {
            return Err(CalendarError::InvertedTimeRange {
                id: event.id.clone(),
                start: event.start_label(),
                end: event.end_label(),
            });
        }

        Ok(Self {
            top_offset_minutes: top,
            height_minutes: height,
            event: event.clone(),
            is_compact: height < COMPACT_THRESHOLD_MINUTES,
        })
    }

    pub fn bottom_offset_minutes(&self) -> i64 {
        self.top_offset_minutes + self.height_minutes
    }

    pub fn time_range_label(&self) -> String {
        self.event.time_range_label()
    }

    /// Title, range, then task and memo when present
    pub fn tooltip_lines(&self) -> Vec<String> {
        let mut lines = vec![self.event.title.clone(), self.time_range_label()];
        if !self.event.task.is_empty() {
            lines.push(self.event.task.clone());
        }
        if !self.event.memo.is_empty() {
            lines.push(self.event.memo.clone());
        }
        lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gridline {
    pub hour: u32,
    pub offset_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTimeline {
    pub date: NaiveDate,
    pub schedule_lane: Vec<TimelineBlock>,
    pub record_lane: Vec<TimelineBlock>,
    pub gridlines: Vec<Gridline>,
    pub hour_labels: Vec<String>,
}

impl DayTimeline {
    pub fn lane(&self, lane: Lane) -> &[TimelineBlock] {
        match lane {
            Lane::Schedule => &self.schedule_lane,
            Lane::Record => &self.record_lane,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.schedule_lane.is_empty() && self.record_lane.is_empty()
    }
}

/// 25 lines, one per hour boundary including the closing midnight
pub fn gridlines() -> Vec<Gridline> {
    (0..=HOURS_PER_DAY)
        .map(|hour| Gridline {
            hour,
            offset_minutes: i64::from(hour) * MINUTES_PER_HOUR,
        })
        .collect()
}

/// `00:00` .. `23:00`
pub fn hour_labels() -> Vec<String> {
    (0..HOURS_PER_DAY).map(|hour| format_hm(hour, 0)).collect()
}

/// Offset of the now-indicator
pub fn current_time_offset(now: NaiveTime) -> i64 {
    i64::from(now.hour()) * MINUTES_PER_HOUR + i64::from(now.minute())
}

/// Position every event of one lane, keeping input order. Events with an
/// inverted range are left out.
pub fn build_lane<'a, I>(events: I) -> Vec<TimelineBlock>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter_map(|event| match TimelineBlock::from_event(event) {
            Ok(block) => Some(block),
            Err(err) => {
                log::warn!("Leaving event off the timeline: {}", err);
                None
            }
        })
        .collect()
}

/// Build both lanes for `date`. Events dated elsewhere are ignored.
pub fn build_day_timeline<'a, I>(date: NaiveDate, events: I) -> DayTimeline
where
    I: IntoIterator<Item = &'a Event>,
{
    let (schedules, records): (Vec<&Event>, Vec<&Event>) = events
        .into_iter()
        .filter(|event| event.date == date)
        .partition(|event| event.lane() == Lane::Schedule);

    DayTimeline {
        date,
        schedule_lane: build_lane(schedules),
        record_lane: build_lane(records),
        gridlines: gridlines(),
        hour_labels: hour_labels(),
    }
}
