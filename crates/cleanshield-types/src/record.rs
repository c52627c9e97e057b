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

use crate::{CurrentConditions, Location, RiskTier};

/// One row of the reading log. Field order is the column order on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    pub temp_c: f64,
    pub humidity_pct: u8,
    pub wind_kmh: f64,
    pub pm25: f64,
    pub risk: RiskTier,
}

impl LogRecord {
    /// Summarize one refresh cycle.
    pub fn summarize(
        timestamp: DateTime<Utc>,
        location: &Location,
        conditions: &CurrentConditions,
        risk: RiskTier,
    ) -> Self {
        Self {
            timestamp,
            city: location.name.clone(),
            lat: location.latitude,
            lon: location.longitude,
            temp_c: conditions.temperature_c,
            humidity_pct: conditions.humidity_pct,
            wind_kmh: conditions.wind_kmh,
            pm25: conditions.pm25,
            risk,
        }
    }
}
