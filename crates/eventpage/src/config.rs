// File: src/config.rs
// Purpose: Page configuration parsed from page.toml

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Format of `countdown.event_start` (local wall-clock time)
pub const EVENT_START_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Page configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageConfig {
    #[serde(default)]
    pub countdown: CountdownConfig,

    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Countdown timer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Event start in local time, e.g. "2026-02-10T10:00:00"
    #[serde(default = "default_event_start")]
    pub event_start: String,

    /// Refresh cadence in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u32,
}

/// Registration hand-off configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Whether submitted snapshots are posted to `endpoint`
    #[serde(default = "default_false")]
    pub enabled: bool,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

/// Page switching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Page shown at start-up when the markup marks none active
    #[serde(default = "default_page")]
    pub default_page: String,
}

// Default values
fn default_event_start() -> String {
    "2026-02-10T10:00:00".to_string()
}

fn default_tick_ms() -> u32 {
    1000
}

fn default_endpoint() -> String {
    "/api/register".to_string()
}

fn default_false() -> bool {
    false
}

fn default_page() -> String {
    "home".to_string()
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            event_start: default_event_start(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            default_page: default_page(),
        }
    }
}

impl CountdownConfig {
    /// Parse `event_start` as a naive local date-time
    pub fn event_start(&self) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.event_start, EVENT_START_FORMAT)
            .with_context(|| format!("Invalid countdown.event_start: {:?}", self.event_start))
    }

    /// Event start as epoch milliseconds in the local time zone
    pub fn event_start_millis(&self) -> Result<i64> {
        let naive = self.event_start()?;
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .with_context(|| format!("Event start {} does not exist in local time", naive))?;
        Ok(local.timestamp_millis())
    }
}

impl PageConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // Blank text means all defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: PageConfig =
            toml::from_str(content).context("Failed to parse page configuration")?;

        // Surface a bad date here rather than at the first tick
        config.countdown.event_start()?;

        if config.countdown.tick_ms == 0 {
            anyhow::bail!("countdown.tick_ms must be greater than zero");
        }

        Ok(config)
    }
}
