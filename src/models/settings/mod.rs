// Settings module
// User configuration read from config.toml

use serde::{Deserialize, Serialize};

/// Where events come from: the page payload or the listing endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    Embedded,
    Remote,
}

/// Parameters of the one calendar core that replaces the local, members and
/// form page variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMode {
    pub data_source: DataSource,
    pub editable: bool,
}

impl CalendarMode {
    /// The personal calendar fed by the page payload
    pub fn local() -> Self {
        Self {
            data_source: DataSource::Embedded,
            editable: true,
        }
    }

    /// Read-only calendar of another team member, fed by the API
    pub fn members() -> Self {
        Self {
            data_source: DataSource::Remote,
            editable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub data_source: DataSource,
    pub editable: bool,
    pub show_record_lane: bool,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            data_source: DataSource::Embedded,
            editable: true,
            show_record_lane: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    pub base_url: String,
    pub user_id: i64,
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            user_id: 0,
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// env_logger filter used when RUST_LOG is unset
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub calendar: CalendarSettings,
    pub remote: RemoteSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn mode(&self) -> CalendarMode {
        CalendarMode {
            data_source: self.calendar.data_source,
            editable: self.calendar.editable,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.calendar.data_source == DataSource::Remote
            && self.remote.base_url.trim().is_empty()
        {
            return Err("remote.base_url is required when data_source = \"remote\"".to_string());
        }

        if self.remote.timeout_secs == 0 {
            return Err("remote.timeout_secs must be greater than zero".to_string());
        }

        Ok(())
    }
}
