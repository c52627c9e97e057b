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

use std::sync::Arc;
use tracing::debug;

use crate::errors::FetchResult;
use crate::traits::WeatherProvider;
use cleanshield_types::{CurrentConditions, Location, kmh};

/// Current weather plus current PM2.5 for one location.
#[derive(Debug, Clone)]
pub struct ConditionsFetcher {
    provider: Arc<dyn WeatherProvider>,
}

impl ConditionsFetcher {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Both calls must succeed; there is no partial result.
    pub async fn fetch_current(&self, location: &Location) -> FetchResult<CurrentConditions> {
        let weather = self.provider.current_weather(location).await?;
        let air = self.provider.current_air_quality(location).await?;

        let conditions = CurrentConditions {
            temperature_c: weather.temperature_c,
            humidity_pct: weather.humidity_pct,
            wind_kmh: kmh(weather.wind_speed_ms),
            pm25: air.pm25,
            observed_at: air.observed_at,
        };
        debug!(?conditions, "fetched current conditions");
        Ok(conditions)
    }
}
