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

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use cleanshield_core::{CycleError, OpenWeatherClient, ReadingLog, RefreshPipeline, SensorInbox};
use cleanshield_types::DashboardSnapshot;

use crate::config::ShieldConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotFound,
    Fetch,
}

/// A cycle that ended without a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CycleFailure {
    pub kind: FailureKind,
    pub error: String,
    pub failed_at: DateTime<Utc>,
}

impl From<&CycleError> for CycleFailure {
    fn from(err: &CycleError) -> Self {
        let kind = match err {
            CycleError::NotFound(_) => FailureKind::NotFound,
            CycleError::Fetch(_) => FailureKind::Fetch,
        };
        Self {
            kind,
            error: err.to_string(),
            failed_at: Utc::now(),
        }
    }
}

pub type CycleOutcome = Result<DashboardSnapshot, CycleFailure>;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pipeline: Arc<RefreshPipeline>,
    city: Arc<str>,
    tail: usize,
    latest: Arc<RwLock<Option<CycleOutcome>>>,
    cycle: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(pipeline: RefreshPipeline, city: impl Into<Arc<str>>, tail: usize) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            city: city.into(),
            tail,
            latest: Arc::new(RwLock::new(None)),
            cycle: Arc::new(Mutex::new(())),
        }
    }

    /// Wire the provider client, reading log and sensor inbox from config.
    pub fn from_config(config: &ShieldConfig, city_override: Option<String>) -> Result<Self> {
        let city = match city_override {
            Some(city) if city.trim().is_empty() => bail!("--city must not be blank"),
            Some(city) => city.trim().to_owned(),
            None => config.location.city.clone(),
        };

        let api_key = config.provider.api_key().unwrap_or_default();
        let client = Arc::new(
            OpenWeatherClient::new(&config.provider.base_url, api_key, config.provider.timeout())?
                .with_cache_ttl(config.provider.cache_ttl()),
        );

        let log = Arc::new(ReadingLog::new(&config.log.path));
        let inbox = Arc::new(SensorInbox::new(config.sensor.capacity));
        let pipeline = RefreshPipeline::new(
            client.clone(),
            client,
            &config.location.country,
            log,
            inbox,
        )
        .with_history_days(config.refresh.history_days);

        info!(
            city = %city,
            country = %config.location.country,
            base_url = %config.provider.base_url,
            log_path = %config.log.path,
            "dashboard state initialized"
        );

        Ok(Self::new(pipeline, city, config.log.tail))
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Default number of log rows shown.
    pub fn tail(&self) -> usize {
        self.tail
    }

    pub fn inbox(&self) -> &SensorInbox {
        self.pipeline.inbox()
    }

    pub fn log(&self) -> &Arc<ReadingLog> {
        self.pipeline.log()
    }

    /// Outcome of the last finished cycle, with the sensor slot refreshed
    /// from the inbox.
    pub fn latest(&self) -> Option<CycleOutcome> {
        let outcome = self.latest.read().clone()?;
        Some(outcome.map(|mut snapshot| {
            snapshot.sensor = self.inbox().latest();
            snapshot
        }))
    }

    /// Run a cycle now. Waits for any cycle already in flight.
    pub async fn refresh(&self) -> CycleOutcome {
        let _cycle = self.cycle.lock().await;

        let outcome = self
            .pipeline
            .run(&self.city)
            .await
            .map_err(|e| CycleFailure::from(&e));
        if let Err(failure) = &outcome {
            warn!(city = %self.city, kind = ?failure.kind, error = %failure.error, "refresh cycle failed");
        }

        *self.latest.write() = Some(outcome.clone());
        outcome
    }
}
