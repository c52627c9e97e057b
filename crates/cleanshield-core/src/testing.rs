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

//! In-memory providers for unit tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::{FetchError, FetchResult};
use crate::traits::{AirQualitySample, Geocoder, WeatherObservation, WeatherProvider};
use cleanshield_types::Location;

fn unavailable(endpoint: &'static str) -> FetchError {
    FetchError::Status {
        endpoint,
        status: 503,
        message: "unavailable".to_owned(),
    }
}

#[derive(Debug, Default)]
pub struct FakeProvider {
    pub weather: Option<WeatherObservation>,
    pub air: Option<AirQualitySample>,
    pub history_pm25: f64,
    /// Zero-based history call indices that fail.
    pub failing_history_calls: Vec<usize>,
    /// Zero-based history call indices that return no sample.
    pub empty_history_calls: Vec<usize>,
    pub history_calls: AtomicUsize,
    pub history_windows: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
}

impl FakeProvider {
    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current_weather(&self, _location: &Location) -> FetchResult<WeatherObservation> {
        self.weather.clone().ok_or_else(|| unavailable("weather"))
    }

    async fn current_air_quality(&self, _location: &Location) -> FetchResult<AirQualitySample> {
        self.air.clone().ok_or_else(|| unavailable("air_pollution"))
    }

    async fn air_quality_history(
        &self,
        _location: &Location,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FetchResult<Option<AirQualitySample>> {
        let call = self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.history_windows.lock().push((start, end));
        if self.failing_history_calls.contains(&call) {
            return Err(unavailable("air_pollution/history"));
        }
        if self.empty_history_calls.contains(&call) {
            return Ok(None);
        }
        Ok(Some(AirQualitySample {
            pm25: self.history_pm25,
            observed_at: start,
        }))
    }
}

#[derive(Debug, Default)]
pub struct FakeGeocoder {
    pub location: Option<Location>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, _city: &str, _country: &str) -> FetchResult<Option<Location>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(unavailable("geo/direct"));
        }
        Ok(self.location.clone())
    }
}
