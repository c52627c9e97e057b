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

//! Refresh pipeline for the Clean Shield dashboard.
//!
//! One cycle runs [`GeoResolver`] → [`ConditionsFetcher`] → [`HistoryFetcher`] →
//! [`classify`](cleanshield_types::classify) → [`ReadingLog::append`] →
//! [`SensorInbox::latest`], in that order, and yields a
//! [`DashboardSnapshot`](cleanshield_types::DashboardSnapshot).

pub mod conditions;
pub mod errors;
pub mod geo;
pub mod history;
pub mod openweather;
pub mod pipeline;
pub mod reading_log;
pub mod sensor_inbox;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use conditions::ConditionsFetcher;
pub use errors::{CycleError, FetchError, FetchResult, LogError};
pub use geo::GeoResolver;
pub use history::HistoryFetcher;
pub use openweather::OpenWeatherClient;
pub use pipeline::RefreshPipeline;
pub use reading_log::ReadingLog;
pub use sensor_inbox::SensorInbox;
pub use traits::{AirQualitySample, Geocoder, WeatherObservation, WeatherProvider};
