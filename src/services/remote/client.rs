use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::{validate_task_name, EventSource, RemoteOutcome, ScheduleActions};
use crate::models::event::ScheduleEnvelope;
use crate::models::settings::RemoteSettings;
use crate::utils::date::{format_date, format_year_month};

pub struct RemoteClient {
    client: Client,
    base_url: String,
    user_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EstimateResponse {
    estimated_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedTask {
    task_name: String,
}

#[derive(Debug, Deserialize)]
struct AddTaskResponse {
    success: bool,
    #[serde(default)]
    message: String,
    task: Option<CreatedTask>,
}

impl RemoteClient {
    pub fn new(settings: &RemoteSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build calendar HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            user_id: settings.user_id,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn month_url(&self, year: i32, month: u32) -> String {
        self.url(&format!(
            "/api/members_calendar/{}/schedules?yearMonth={}",
            self.user_id,
            format_year_month(year, month)
        ))
    }

    fn day_url(&self, date: NaiveDate) -> String {
        self.url(&format!(
            "/api/members_calendar/{}/schedules/day?date={}",
            self.user_id,
            format_date(date)
        ))
    }

    fn delete_url(&self, id: &str) -> String {
        self.url(&format!("/schedule_delete/{}", urlencoding::encode(id)))
    }

    fn estimate_url(&self, task_name: &str) -> String {
        self.url(&format!(
            "/api/estimated_time?taskName={}",
            urlencoding::encode(task_name)
        ))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Network error requesting {}", url))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(anyhow!("Request to {} failed with HTTP status {}", url, status));
        }

        response
            .json::<T>()
            .with_context(|| format!("Unexpected response body from {}", url))
    }

    fn listing(&self, url: &str) -> Result<Vec<serde_json::Value>> {
        let envelope: ScheduleEnvelope = self.get_json(url)?;
        log::debug!("Fetched {} records from {}", envelope.schedules.len(), url);
        Ok(envelope.schedules)
    }
}

impl EventSource for RemoteClient {
    fn month_events(&self, year: i32, month: u32) -> Result<Vec<serde_json::Value>> {
        self.listing(&self.month_url(year, month))
    }

    fn day_events(&self, date: NaiveDate) -> Result<Vec<serde_json::Value>> {
        self.listing(&self.day_url(date))
    }
}

impl ScheduleActions for RemoteClient {
    /// Uses the JSON endpoint: the form endpoint redirects to the calendar
    /// page whether or not the delete succeeded.
    fn delete_schedule(&self, id: &str) -> Result<RemoteOutcome> {
        let url = self.delete_url(id);
        let response = self
            .client
            .post(&url)
            .send()
            .with_context(|| format!("Network error requesting {}", url))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(RemoteOutcome::failed(format!(
                "Deleting schedule {} failed with HTTP status {}",
                id, status
            )));
        }

        response
            .json::<RemoteOutcome>()
            .with_context(|| format!("Unexpected response body from {}", url))
    }

    fn estimated_time(&self, task_name: &str) -> Result<Option<String>> {
        let Ok(task_name) = validate_task_name(task_name) else {
            return Ok(None);
        };
        let response: EstimateResponse = self.get_json(&self.estimate_url(task_name))?;
        Ok(response.estimated_time.filter(|value| !value.is_empty()))
    }

    fn add_task(&self, task_name: &str) -> Result<RemoteOutcome> {
        let task_name = match validate_task_name(task_name) {
            Ok(name) => name,
            Err(outcome) => return Ok(outcome),
        };

        let url = self.url("/task_add");
        let response = self
            .client
            .post(&url)
            .form(&[("taskName", task_name)])
            .send()
            .with_context(|| format!("Network error requesting {}", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Request to {} failed with HTTP status {}", url, status));
        }

        let body: AddTaskResponse = response
            .json()
            .with_context(|| format!("Unexpected response body from {}", url))?;
        if let Some(task) = &body.task {
            log::info!("Task created: {}", task.task_name);
        }

        Ok(RemoteOutcome {
            success: body.success,
            message: body.message,
        })
    }
}
