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

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::conditions::ConditionsFetcher;
use crate::errors::CycleError;
use crate::geo::GeoResolver;
use crate::history::HistoryFetcher;
use crate::reading_log::ReadingLog;
use crate::sensor_inbox::SensorInbox;
use crate::traits::{Geocoder, WeatherProvider};
use cleanshield_types::{DashboardSnapshot, LogRecord, alerts_for, classify};

pub const DEFAULT_HISTORY_DAYS: u32 = 7;

/// One full refresh: resolve, fetch, classify, log, collect sensor data.
#[derive(Debug, Clone)]
pub struct RefreshPipeline {
    geo: GeoResolver,
    conditions: ConditionsFetcher,
    history: HistoryFetcher,
    log: Arc<ReadingLog>,
    inbox: Arc<SensorInbox>,
    history_days: u32,
}

impl RefreshPipeline {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        geocoder: Arc<dyn Geocoder>,
        country: impl Into<String>,
        log: Arc<ReadingLog>,
        inbox: Arc<SensorInbox>,
    ) -> Self {
        Self {
            geo: GeoResolver::new(geocoder, country),
            conditions: ConditionsFetcher::new(Arc::clone(&provider)),
            history: HistoryFetcher::new(provider),
            log,
            inbox,
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }

    #[must_use]
    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days;
        self
    }

    pub fn log(&self) -> &Arc<ReadingLog> {
        &self.log
    }

    pub fn inbox(&self) -> &SensorInbox {
        &self.inbox
    }

    /// Run one cycle for `city`.
    ///
    /// Geocoding and current-conditions failures abort the cycle. History
    /// failures only leave gaps. A reading log failure becomes a notice on the
    /// snapshot.
    pub async fn run(&self, city: &str) -> Result<DashboardSnapshot, CycleError> {
        let refreshed_at = Utc::now();
        info!(city, "refresh cycle started");

        let location = self.geo.resolve(city).await?;
        let conditions = self.conditions.fetch_current(&location).await?;
        let history = self
            .history
            .fetch_history_at(&location, self.history_days, refreshed_at)
            .await;
        let risk = classify(conditions.pm25);
        let alerts = alerts_for(&conditions, risk);

        let mut notices = Vec::new();
        let record = LogRecord::summarize(refreshed_at, &location, &conditions, risk);
        if let Err(e) = self.log.append_async(record).await {
            warn!(error = %e, path = %self.log.path().display(), "reading not persisted");
            notices.push(format!("Reading was not saved to the log: {e}"));
        }

        let sensor = self.inbox.latest();

        info!(
            city = %location.name,
            pm25 = conditions.pm25,
            %risk,
            history_points = history.points.len(),
            "refresh cycle finished"
        );

        Ok(DashboardSnapshot {
            refreshed_at,
            location,
            conditions,
            risk,
            alerts,
            history,
            sensor,
            notices,
        })
    }
}
