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

//! OpenWeather REST client.
//!
//! Covers the four endpoints the dashboard needs:
//!
//! - `/data/2.5/weather` for temperature, humidity and wind
//! - `/data/2.5/air_pollution` for the current PM2.5 sample
//! - `/data/2.5/air_pollution/history` for past samples in a time window
//! - `/geo/1.0/direct` for name to coordinates
//!
//! Every GET goes through a [`ResponseCache`] keyed by URL. The API key is part
//! of the URL, so URLs are never logged; only the endpoint name is.

pub mod cache;
pub mod types;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, trace, warn};

pub use cache::{DEFAULT_CACHE_TTL, ResponseCache};
use types::{AirPollutionResponse, GeoEntry, WeatherResponse};

use crate::errors::{FetchError, FetchResult};
use crate::traits::{AirQualitySample, Geocoder, WeatherObservation, WeatherProvider};
use cleanshield_types::Location;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const WEATHER: &str = "weather";
const AIR_POLLUTION: &str = "air_pollution";
const AIR_POLLUTION_HISTORY: &str = "air_pollution/history";
const GEOCODING: &str = "geo/direct";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    api_key: String,
    client: Client,
    cache: Arc<ResponseCache>,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> FetchResult<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(FetchError::Config("API key is empty".to_owned()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key,
            client,
            cache: Arc::new(ResponseCache::default()),
        })
    }

    /// Replace the response cache TTL. Zero disables caching.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = Arc::new(ResponseCache::new(ttl));
        self
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    fn weather_url(&self, location: &Location) -> String {
        format!(
            "{}/data/2.5/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, location.latitude, location.longitude, self.api_key
        )
    }

    fn air_pollution_url(&self, location: &Location) -> String {
        format!(
            "{}/data/2.5/air_pollution?lat={}&lon={}&appid={}",
            self.base_url, location.latitude, location.longitude, self.api_key
        )
    }

    fn air_pollution_history_url(
        &self,
        location: &Location,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> String {
        format!(
            "{}/data/2.5/air_pollution/history?lat={}&lon={}&start={}&end={}&appid={}",
            self.base_url,
            location.latitude,
            location.longitude,
            start.timestamp(),
            end.timestamp(),
            self.api_key
        )
    }

    fn geocoding_url(&self, city: &str, country: &str) -> String {
        let query = format!("{city},{country}");
        format!(
            "{}/geo/1.0/direct?q={}&limit=1&appid={}",
            self.base_url,
            urlencoding::encode(&query),
            self.api_key
        )
    }

    /// GET `url` and decode it as `T`, consulting the cache first.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
    ) -> FetchResult<T> {
        if let Some(body) = self.cache.get(url) {
            trace!(endpoint, "cache hit");
            return decode(endpoint, body);
        }

        debug!(endpoint, "requesting");
        let response = self.client.get(url).send().await.map_err(|e| {
            // reqwest embeds the URL in its error; strip it so the key stays out of logs
            let e = e.without_url();
            error!(endpoint, error = %e, "request failed");
            FetchError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(endpoint, status = status.as_u16(), "provider returned an error status");
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Http(e.without_url()))?;
        let body: Value = serde_json::from_slice(&bytes).map_err(|e| FetchError::Malformed {
            endpoint,
            reason: e.to_string(),
        })?;

        let parsed = decode(endpoint, body.clone())?;
        self.cache.insert(url, body);
        Ok(parsed)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &'static str, body: Value) -> FetchResult<T> {
    serde_json::from_value(body).map_err(|e| FetchError::Malformed {
        endpoint,
        reason: e.to_string(),
    })
}

fn sample_from(
    endpoint: &'static str,
    response: AirPollutionResponse,
) -> FetchResult<Option<AirQualitySample>> {
    let Some(entry) = response.list.into_iter().next() else {
        return Ok(None);
    };
    let observed_at =
        DateTime::<Utc>::from_timestamp(entry.dt, 0).ok_or_else(|| FetchError::Malformed {
            endpoint,
            reason: format!("timestamp {} out of range", entry.dt),
        })?;
    Ok(Some(AirQualitySample {
        pm25: entry.components.pm2_5,
        observed_at,
    }))
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is rounded and clamped to 0..=100 first"
)]
fn humidity_pct(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, location: &Location) -> FetchResult<WeatherObservation> {
        let response: WeatherResponse = self.get_json(WEATHER, &self.weather_url(location)).await?;
        Ok(WeatherObservation {
            temperature_c: response.main.temp,
            humidity_pct: humidity_pct(response.main.humidity),
            wind_speed_ms: response.wind.speed,
        })
    }

    async fn current_air_quality(&self, location: &Location) -> FetchResult<AirQualitySample> {
        let response: AirPollutionResponse = self
            .get_json(AIR_POLLUTION, &self.air_pollution_url(location))
            .await?;
        sample_from(AIR_POLLUTION, response)?.ok_or(FetchError::MissingField {
            endpoint: AIR_POLLUTION,
            field: "list[0]",
        })
    }

    async fn air_quality_history(
        &self,
        location: &Location,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FetchResult<Option<AirQualitySample>> {
        let url = self.air_pollution_history_url(location, start, end);
        let response: AirPollutionResponse = self.get_json(AIR_POLLUTION_HISTORY, &url).await?;
        sample_from(AIR_POLLUTION_HISTORY, response)
    }
}

#[async_trait]
impl Geocoder for OpenWeatherClient {
    async fn geocode(&self, city: &str, country: &str) -> FetchResult<Option<Location>> {
        let entries: Vec<GeoEntry> = self
            .get_json(GEOCODING, &self.geocoding_url(city, country))
            .await?;
        Ok(entries.into_iter().next().map(|entry| {
            trace!(provider_name = ?entry.name, "geocoding match");
            Location::new(city, entry.lat, entry.lon)
        }))
    }
}
