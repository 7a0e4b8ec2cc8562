// Detail views shown when a timeline block is opened

use crate::models::event::{Event, EventKind};
use crate::models::settings::CalendarMode;
use crate::utils::date::format_date;

const NONE_LABEL: &str = "なし";
const NO_MEMO_LABEL: &str = "メモなし";
const GOOGLE_MARKER: &str = " 📅";
const GOOGLE_SYNC_NOTE: &str =
    "このスケジュールはGoogleカレンダーから同期されています。編集・削除はGoogleカレンダーで行ってください。";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDetail {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time_range: String,
    pub task: String,
    pub memo: String,
    pub can_edit: bool,
    pub can_delete: bool,
    pub sync_note: Option<&'static str>,
}

impl ScheduleDetail {
    /// Edit and delete additionally require an editable calendar mode.
    pub fn new(event: &Event, mode: CalendarMode) -> Self {
        let google = event.is_google_synced();
        let title = if google {
            format!("{}{}", event.title, GOOGLE_MARKER)
        } else {
            event.title.clone()
        };

        Self {
            id: event.id.clone(),
            title,
            date: format_date(event.date),
            time_range: event.time_range_label(),
            task: fallback(&event.task, NONE_LABEL),
            memo: fallback(&event.memo, NONE_LABEL),
            can_edit: mode.editable && event.editable,
            can_delete: mode.editable && event.deletable,
            sync_note: google.then_some(GOOGLE_SYNC_NOTE),
        }
    }

    /// Page that edits this schedule, `None` when editing is not allowed
    pub fn edit_target(&self) -> Option<String> {
        self.can_edit
            .then(|| format!("/schedule_update?id={}", urlencoding::encode(&self.id)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDetail {
    pub date: String,
    pub time_range: String,
    pub task: String,
    pub memo: String,
}

impl RecordDetail {
    pub fn new(event: &Event) -> Self {
        Self {
            date: format_date(event.date),
            time_range: event.time_range_label(),
            task: event.task.clone(),
            memo: fallback(&event.memo, NO_MEMO_LABEL),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDetail {
    Schedule(ScheduleDetail),
    Record(RecordDetail),
}

impl EventDetail {
    pub fn new(event: &Event, mode: CalendarMode) -> Self {
        match event.kind {
            EventKind::Record => Self::Record(RecordDetail::new(event)),
            EventKind::Schedule | EventKind::GoogleSynced => {
                Self::Schedule(ScheduleDetail::new(event, mode))
            }
        }
    }
}

fn fallback(value: &str, empty: &str) -> String {
    if value.trim().is_empty() {
        empty.to_string()
    } else {
        value.to_string()
    }
}
