//! In-memory event collections, replaced wholesale on every data refresh.
//!
//! Listing responses are applied through a request-generation guard: each
//! fetch takes a [`FetchTicket`] when it is dispatched, and a response whose
//! ticket is older than the last applied one is discarded.

use chrono::NaiveDate;

use crate::error::CalendarError;
use crate::models::event::{Event, Lane};

/// Sequence number taken at dispatch time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    schedules: Vec<Event>,
    records: Vec<Event>,
    next_sequence: u64,
    last_applied: u64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        let mut store = Self::new();
        store.replace_all(events);
        store
    }

    /// Overwrite both collections. Input order is kept within each lane.
    pub fn replace_all(&mut self, events: Vec<Event>) {
        let (schedules, records): (Vec<_>, Vec<_>) = events
            .into_iter()
            .partition(|event| event.lane() == Lane::Schedule);
        log::debug!(
            "Event store replaced: {} schedules, {} records",
            schedules.len(),
            records.len()
        );
        self.schedules = schedules;
        self.records = records;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_sequence += 1;
        FetchTicket(self.next_sequence)
    }

    pub fn last_applied(&self) -> u64 {
        self.last_applied
    }

    /// Apply a listing response unless a newer one was already applied
    pub fn apply(&mut self, ticket: FetchTicket, events: Vec<Event>) -> Result<(), CalendarError> {
        if ticket.0 < self.last_applied {
            log::info!(
                "Discarding stale response #{} (last applied #{})",
                ticket.0,
                self.last_applied
            );
            return Err(CalendarError::StaleResponse {
                received: ticket.0,
                last_applied: self.last_applied,
            });
        }

        self.replace_all(events);
        self.last_applied = ticket.0;
        Ok(())
    }

    pub fn schedules(&self) -> &[Event] {
        &self.schedules
    }

    pub fn records(&self) -> &[Event] {
        &self.records
    }

    /// Every event, schedules first
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.schedules.iter().chain(self.records.iter())
    }

    pub fn len(&self) -> usize {
        self.schedules.len() + self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, id: &str) -> Option<&Event> {
        self.iter().find(|event| event.id == id)
    }

    /// Events dated `date`, schedules first, each lane in input order
    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &Event> {
        self.iter().filter(move |e| e.date == date)
    }
}
