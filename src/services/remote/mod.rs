//! Collaborating server endpoints.
//!
//! The listing endpoints feed the members calendar; delete, task estimation
//! and task creation are opaque procedures that report success plus a
//! message. [`EventSource`] and [`ScheduleActions`] are the seams the
//! calendar controller talks to, [`RemoteClient`] implements both over HTTP.

mod client;

pub use client::RemoteClient;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Deserialize;

/// Raw listing records for a month or a single day
#[cfg_attr(test, mockall::automock)]
pub trait EventSource {
    /// `month` is zero-based
    fn month_events(&self, year: i32, month: u32) -> Result<Vec<serde_json::Value>>;
    fn day_events(&self, date: NaiveDate) -> Result<Vec<serde_json::Value>>;
}

#[cfg_attr(test, mockall::automock)]
pub trait ScheduleActions {
    fn delete_schedule(&self, id: &str) -> Result<RemoteOutcome>;
    fn estimated_time(&self, task_name: &str) -> Result<Option<String>>;
    fn add_task(&self, task_name: &str) -> Result<RemoteOutcome>;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl RemoteOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Placeholder shown while no estimate is known
pub const NO_ESTIMATE: &str = "--:--";

/// Reject blank task names before any request is made
pub fn validate_task_name(task_name: &str) -> Result<&str, RemoteOutcome> {
    let trimmed = task_name.trim();
    if trimmed.is_empty() {
        Err(RemoteOutcome::failed("タスク名を入力してください"))
    } else {
        Ok(trimmed)
    }
}
