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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Meters per second to kilometers per hour.
#[must_use]
pub fn kmh(meters_per_second: f64) -> f64 {
    meters_per_second * 3.6
}

/// Current weather and air quality at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Relative humidity, 0-100.
    pub humidity_pct: u8,
    /// Wind speed, already converted to km/h.
    pub wind_kmh: f64,
    /// PM2.5 concentration in µg/m³.
    pub pm25: f64,
    /// When the provider observed the air-quality sample.
    pub observed_at: DateTime<Utc>,
}
