//! Calendar controller: the one parameterized core behind every calendar page.
//!
//! Owns the cursor, the event stores and the last successfully derived month
//! grid and day timeline. In embedded mode navigation re-derives from the
//! store. In remote mode navigation dispatches listing fetches; each fetch is
//! a [`PendingFetch`] whose response is handed back through
//! [`CalendarController::complete`], where superseded responses are dropped.
//! Failures leave the last good grid and timeline in place and queue a notice.

mod notice;

pub use notice::{Notice, NoticeLevel};

use anyhow::Result as AnyResult;
use chrono::NaiveDate;

use crate::error::CalendarError;
use crate::models::cursor::CalendarCursor;
use crate::models::event::{normalize_batch, Event};
use crate::models::settings::{CalendarMode, DataSource};
use crate::services::day_timeline::{build_day_timeline, DayTimeline};
use crate::services::detail::EventDetail;
use crate::services::event_store::{EventStore, FetchTicket};
use crate::services::month_grid::{build_month_grid, MonthGrid};
use crate::services::navigation::{Direction, NavigationController, RebuildScope};
use crate::services::remote::{EventSource, RemoteOutcome, ScheduleActions, NO_ESTIMATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    /// Zero-based month
    Month { year: i32, month: u32 },
    Day { date: NaiveDate },
}

/// A listing request that has been dispatched but not yet applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFetch {
    pub ticket: FetchTicket,
    pub target: FetchTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOutcome {
    pub scope: RebuildScope,
    pub fetches: Vec<PendingFetch>,
}

pub struct CalendarController {
    mode: CalendarMode,
    cursor: CalendarCursor,
    today: NaiveDate,
    month_store: EventStore,
    day_store: EventStore,
    grid: Option<MonthGrid>,
    timeline: Option<DayTimeline>,
    notices: Vec<Notice>,
}

impl CalendarController {
    pub fn new(mode: CalendarMode, today: NaiveDate) -> Self {
        let mut controller = Self {
            mode,
            cursor: CalendarCursor::at(today),
            today,
            month_store: EventStore::new(),
            day_store: EventStore::new(),
            grid: None,
            timeline: None,
            notices: Vec::new(),
        };
        controller.rebuild(RebuildScope::Both);
        controller
    }

    /// Controller over events delivered with the page
    pub fn embedded(today: NaiveDate, editable: bool, events: Vec<Event>) -> Self {
        let mut controller = Self::new(
            CalendarMode {
                data_source: DataSource::Embedded,
                editable,
            },
            today,
        );
        controller.month_store.replace_all(events);
        controller.rebuild(RebuildScope::Both);
        controller
    }

    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    pub fn cursor(&self) -> &CalendarCursor {
        &self.cursor
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn grid(&self) -> Option<&MonthGrid> {
        self.grid.as_ref()
    }

    pub fn timeline(&self) -> Option<&DayTimeline> {
        self.timeline.as_ref()
    }

    /// Events behind the month grid
    pub fn month_events(&self) -> &EventStore {
        &self.month_store
    }

    /// Events behind the day timeline
    pub fn day_events(&self) -> &EventStore {
        match self.mode.data_source {
            DataSource::Embedded => &self.month_store,
            DataSource::Remote => &self.day_store,
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => log::info!("{}", notice.message),
            NoticeLevel::Error => log::error!("{}", notice.message),
        }
        self.notices.push(notice);
    }

    /// Replace the embedded event set with a freshly delivered payload.
    /// Returns the number of skipped records.
    pub fn load_embedded<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = serde_json::Value>,
    {
        let batch = normalize_batch(records);
        log::info!(
            "Loaded {} events ({} skipped)",
            batch.events.len(),
            batch.skipped.len()
        );
        self.month_store.replace_all(batch.events);
        self.rebuild(RebuildScope::Both);
        batch.skipped.len()
    }

    // ----- navigation -----

    pub fn advance_month(&mut self, direction: Direction) -> NavigationOutcome {
        let scope = NavigationController::advance_month(&mut self.cursor, direction);
        self.after_navigation(scope)
    }

    pub fn advance_day(&mut self, direction: Direction) -> Result<NavigationOutcome, CalendarError> {
        let scope = NavigationController::advance_day(&mut self.cursor, direction)?;
        Ok(self.after_navigation(scope))
    }

    pub fn select_date(&mut self, date: NaiveDate) -> NavigationOutcome {
        let scope = NavigationController::select_date(&mut self.cursor, date);
        self.after_navigation(scope)
    }

    pub fn jump_to_today(&mut self) -> NavigationOutcome {
        let scope = NavigationController::jump_to_today(&mut self.cursor, self.today);
        self.after_navigation(scope)
    }

    fn after_navigation(&mut self, scope: RebuildScope) -> NavigationOutcome {
        if !scope.includes_grid() {
            let selected = self.cursor.selected_date;
            if let Some(grid) = self.grid.as_mut() {
                grid.mark_selected(selected);
            }
        }
        let fetches = self.refresh(scope);
        NavigationOutcome { scope, fetches }
    }

    /// Rebuild what `scope` names. In remote mode this dispatches fetches
    /// instead, and the views are rebuilt when their responses complete.
    pub fn refresh(&mut self, scope: RebuildScope) -> Vec<PendingFetch> {
        match self.mode.data_source {
            DataSource::Embedded => {
                self.rebuild(scope);
                Vec::new()
            }
            DataSource::Remote => {
                let mut fetches = Vec::new();
                if scope.includes_grid() {
                    fetches.push(PendingFetch {
                        ticket: self.month_store.begin_fetch(),
                        target: FetchTarget::Month {
                            year: self.cursor.displayed_year,
                            month: self.cursor.displayed_month,
                        },
                    });
                }
                if scope.includes_timeline() {
                    fetches.push(PendingFetch {
                        ticket: self.day_store.begin_fetch(),
                        target: FetchTarget::Day {
                            date: self.cursor.selected_date,
                        },
                    });
                }
                fetches
            }
        }
    }

    fn target_is_current(&self, target: FetchTarget) -> bool {
        match target {
            FetchTarget::Month { year, month } => {
                year == self.cursor.displayed_year && month == self.cursor.displayed_month
            }
            FetchTarget::Day { date } => date == self.cursor.selected_date,
        }
    }

    /// Apply the response of a dispatched fetch.
    pub fn complete(
        &mut self,
        pending: PendingFetch,
        response: AnyResult<Vec<serde_json::Value>>,
    ) -> Result<(), CalendarError> {
        // Superseded responses are dropped quietly, failed or not
        if !self.target_is_current(pending.target) {
            let last_applied = match pending.target {
                FetchTarget::Month { .. } => self.month_store.last_applied(),
                FetchTarget::Day { .. } => self.day_store.last_applied(),
            };
            log::info!(
                "Discarding {} response #{} for {:?}: cursor moved on",
                if response.is_ok() { "listing" } else { "failed" },
                pending.ticket.sequence(),
                pending.target
            );
            return Err(CalendarError::StaleResponse {
                received: pending.ticket.sequence(),
                last_applied,
            });
        }

        let records = match response {
            Ok(records) => records,
            Err(err) => {
                let message = format!("予定の取得に失敗しました: {:#}", err);
                self.notify(Notice::error(message.clone()));
                return Err(CalendarError::Remote(message));
            }
        };

        let store = match pending.target {
            FetchTarget::Month { .. } => &mut self.month_store,
            FetchTarget::Day { .. } => &mut self.day_store,
        };
        let batch = normalize_batch(records);
        store.apply(pending.ticket, batch.events)?;

        match pending.target {
            FetchTarget::Month { .. } => self.rebuild(RebuildScope::Grid),
            FetchTarget::Day { .. } => self.rebuild(RebuildScope::Timeline),
        }
        Ok(())
    }

    /// Run dispatched fetches against `source` one after another.
    pub fn run_fetches(&mut self, source: &dyn EventSource, fetches: Vec<PendingFetch>) {
        for pending in fetches {
            let response = match pending.target {
                FetchTarget::Month { year, month } => source.month_events(year, month),
                FetchTarget::Day { date } => source.day_events(date),
            };
            if let Err(err) = self.complete(pending, response) {
                log::debug!("Fetch #{} not applied: {}", pending.ticket.sequence(), err);
            }
        }
    }

    fn rebuild(&mut self, scope: RebuildScope) {
        if scope.includes_grid() {
            let built = build_month_grid(
                self.cursor.displayed_year,
                self.cursor.displayed_month,
                self.cursor.selected_date,
                self.today,
                self.month_store.iter(),
            );
            match built {
                Ok(grid) => self.grid = Some(grid),
                Err(err) => self.notify(Notice::error(format!("カレンダーを表示できません: {}", err))),
            }
        }

        if scope.includes_timeline() {
            let selected = self.cursor.selected_date;
            let timeline = build_day_timeline(selected, self.day_events().events_on(selected));
            self.timeline = Some(timeline);
        }
    }

    // ----- entry actions -----

    fn find_event(&self, id: &str) -> Option<&Event> {
        self.day_events()
            .find(id)
            .or_else(|| self.month_store.find(id))
    }

    pub fn detail(&self, id: &str) -> Option<EventDetail> {
        self.find_event(id)
            .map(|event| EventDetail::new(event, self.mode))
    }

    /// Delete a schedule through the server, then drop it locally.
    pub fn delete_schedule(
        &mut self,
        id: &str,
        actions: &dyn ScheduleActions,
    ) -> Result<RemoteOutcome, CalendarError> {
        let deletable = self.find_event(id).map(|event| event.deletable);
        match deletable {
            None => {
                let outcome = RemoteOutcome::failed(format!("Schedule {} not found", id));
                self.notify(Notice::error(outcome.message.clone()));
                return Ok(outcome);
            }
            Some(false) => {
                let outcome = RemoteOutcome::failed("このスケジュールは削除できません");
                self.notify(Notice::error(outcome.message.clone()));
                return Ok(outcome);
            }
            Some(true) if !self.mode.editable => {
                let outcome = RemoteOutcome::failed("閲覧専用のカレンダーです");
                self.notify(Notice::error(outcome.message.clone()));
                return Ok(outcome);
            }
            Some(true) => {}
        }

        let outcome = match actions.delete_schedule(id) {
            Ok(outcome) => outcome,
            Err(err) => {
                let message = format!("削除に失敗しました: {:#}", err);
                self.notify(Notice::error(message.clone()));
                return Err(CalendarError::Remote(message));
            }
        };

        if outcome.success {
            for store in [&mut self.month_store, &mut self.day_store] {
                let remaining: Vec<Event> = store.iter().filter(|e| e.id != id).cloned().collect();
                store.replace_all(remaining);
            }
            self.rebuild(RebuildScope::Both);
            self.notify(Notice::info(outcome.message.clone()));
        } else {
            self.notify(Notice::error(outcome.message.clone()));
        }
        Ok(outcome)
    }

    /// Estimated duration for a task, or the placeholder when unknown.
    pub fn estimate(&mut self, task_name: &str, actions: &dyn ScheduleActions) -> String {
        match actions.estimated_time(task_name) {
            Ok(Some(estimate)) => estimate,
            Ok(None) => NO_ESTIMATE.to_string(),
            Err(err) => {
                self.notify(Notice::error(format!("推定時間の取得に失敗しました: {:#}", err)));
                NO_ESTIMATE.to_string()
            }
        }
    }

    pub fn add_task(&mut self, task_name: &str, actions: &dyn ScheduleActions) -> RemoteOutcome {
        let outcome = actions
            .add_task(task_name)
            .unwrap_or_else(|err| RemoteOutcome::failed(format!("タスクの追加に失敗しました: {:#}", err)));
        if outcome.success {
            self.notify(Notice::info(outcome.message.clone()));
        } else {
            self.notify(Notice::error(outcome.message.clone()));
        }
        outcome
    }
}
