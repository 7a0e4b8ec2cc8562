// Domain errors for the calendar core

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// A raw record lacks a usable date or time field. The record is skipped,
    /// the rest of the batch is kept.
    #[error("malformed event record {id}: {reason}")]
    MalformedEvent { id: String, reason: String },

    /// End time lies before start time. Such events are rejected.
    #[error("event {id} ends at {end} before it starts at {start}")]
    InvertedTimeRange {
        id: String,
        start: String,
        end: String,
    },

    /// A listing response was dispatched before one that has already been applied.
    #[error("stale response #{received} discarded (last applied #{last_applied})")]
    StaleResponse { received: u64, last_applied: u64 },

    #[error("render target `{0}` is not available")]
    MissingRenderTarget(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("remote call failed: {0}")]
    Remote(String),
}

impl CalendarError {
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEvent {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
