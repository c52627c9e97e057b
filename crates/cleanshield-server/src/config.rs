// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Clean Shield.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use cleanshield_core::openweather::{DEFAULT_BASE_URL, DEFAULT_CACHE_TTL, DEFAULT_TIMEOUT};
use cleanshield_core::pipeline::DEFAULT_HISTORY_DAYS;
use cleanshield_core::reading_log::DEFAULT_LOG_PATH;
use cleanshield_core::sensor_inbox::DEFAULT_INBOX_CAPACITY;

/// Environment variable consulted when `provider.api_key` is not set.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const MAX_HISTORY_DAYS: u32 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShieldConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub location: LocationSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[serde(default)]
    pub log: LogSettings,
    #[serde(default)]
    pub sensor: SensorSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationSettings {
    #[serde(default = "default_city")]
    pub city: String,
    /// ISO 3166 country code the geocoding query is constrained to.
    #[serde(default = "default_country")]
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshSettings {
    #[serde(default)]
    pub interval: RefreshInterval,
    #[serde(default = "default_history_days")]
    pub history_days: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_path")]
    pub path: String,
    /// How many readings the dashboard shows.
    #[serde(default = "default_tail")]
    pub tail: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SensorSettings {
    #[serde(default = "default_sensor_capacity")]
    pub capacity: usize,
}

/// Supported refresh periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshInterval {
    #[serde(rename = "10s")]
    TenSeconds,
    #[serde(rename = "60s")]
    OneMinute,
    #[default]
    #[serde(rename = "300s")]
    FiveMinutes,
    #[serde(rename = "600s")]
    TenMinutes,
}

impl RefreshInterval {
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(match self {
            Self::TenSeconds => 10,
            Self::OneMinute => 60,
            Self::FiveMinutes => 300,
            Self::TenMinutes => 600,
        })
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    8100
}

fn default_city() -> String {
    "Durban".to_owned()
}

fn default_country() -> String {
    "ZA".to_owned()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL.as_secs()
}

fn default_history_days() -> u32 {
    DEFAULT_HISTORY_DAYS
}

fn default_log_path() -> String {
    DEFAULT_LOG_PATH.to_owned()
}

fn default_tail() -> usize {
    10
}

fn default_sensor_capacity() -> usize {
    DEFAULT_INBOX_CAPACITY
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            city: default_city(),
            country: default_country(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval: RefreshInterval::default(),
            history_days: default_history_days(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            path: default_log_path(),
            tail: default_tail(),
        }
    }
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            capacity: default_sensor_capacity(),
        }
    }
}

impl ProviderSettings {
    /// Configured key, falling back to the environment.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl ShieldConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.location.city.trim().is_empty() {
            bail!("location.city must be set");
        }
        if self.location.country.trim().is_empty() {
            bail!("location.country must be set");
        }
        if self.provider.api_key().is_none() {
            bail!("provider.api_key must be set (or export {API_KEY_ENV})");
        }
        if self.provider.timeout_secs == 0 {
            bail!("provider.timeout_secs must be at least 1");
        }
        if self.refresh.history_days == 0 || self.refresh.history_days > MAX_HISTORY_DAYS {
            bail!("refresh.history_days must be between 1 and {MAX_HISTORY_DAYS}");
        }
        if self.log.tail == 0 {
            bail!("log.tail must be at least 1");
        }
        if self.sensor.capacity == 0 {
            bail!("sensor.capacity must be at least 1");
        }
        Ok(())
    }
}
