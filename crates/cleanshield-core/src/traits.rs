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

//! Seams between the pipeline and the outside world.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

use crate::errors::FetchResult;
use cleanshield_types::Location;

/// Current weather at a coordinate, in provider units.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub humidity_pct: u8,
    /// Wind speed in m/s.
    pub wind_speed_ms: f64,
}

/// One PM2.5 sample.
#[derive(Debug, Clone, PartialEq)]
pub struct AirQualitySample {
    pub pm25: f64,
    pub observed_at: DateTime<Utc>,
}

/// Source of weather and air-quality readings.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, location: &Location) -> FetchResult<WeatherObservation>;

    async fn current_air_quality(&self, location: &Location) -> FetchResult<AirQualitySample>;

    /// First sample in `[start, end)`, or `None` when the provider has none.
    async fn air_quality_history(
        &self,
        location: &Location,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FetchResult<Option<AirQualitySample>>;
}

/// Free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` when the provider has no match.
    async fn geocode(&self, city: &str, country: &str) -> FetchResult<Option<Location>>;
}
