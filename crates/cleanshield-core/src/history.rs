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

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::traits::WeatherProvider;
use cleanshield_types::{GapReason, HistoryGap, HistoryPoint, HistorySeries, Location};

/// Width of the window queried for each day.
const SAMPLE_WINDOW_HOURS: i64 = 1;

/// Daily PM2.5 series, one provider call per day.
///
/// Calls are made sequentially, oldest day first, exactly once each. A failed
/// or empty day is recorded as a gap and the walk continues.
#[derive(Debug, Clone)]
pub struct HistoryFetcher {
    provider: Arc<dyn WeatherProvider>,
}

impl HistoryFetcher {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Series for `[now - window_days, now]`, both ends inclusive.
    pub async fn fetch_history(&self, location: &Location, window_days: u32) -> HistorySeries {
        self.fetch_history_at(location, window_days, Utc::now()).await
    }

    pub async fn fetch_history_at(
        &self,
        location: &Location,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> HistorySeries {
        let mut series = HistorySeries::default();

        for offset in (0..=i64::from(window_days)).rev() {
            let start = now - Duration::days(offset);
            let end = start + Duration::hours(SAMPLE_WINDOW_HOURS);
            let date = start.date_naive();

            match self
                .provider
                .air_quality_history(location, start, end)
                .await
            {
                Ok(Some(sample)) => series.points.push(HistoryPoint {
                    date,
                    pm25: sample.pm25,
                }),
                Ok(None) => {
                    debug!(%date, "no history sample");
                    series.gaps.push(HistoryGap {
                        date,
                        reason: GapReason::NoData,
                    });
                }
                Err(e) => {
                    warn!(%date, error = %e, "history request failed, skipping day");
                    series.gaps.push(HistoryGap {
                        date,
                        reason: GapReason::RequestFailed,
                    });
                }
            }
        }

        info!(
            points = series.points.len(),
            gaps = series.gaps.len(),
            "fetched {window_days}-day history"
        );
        series
    }
}
