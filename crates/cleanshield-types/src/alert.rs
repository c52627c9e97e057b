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

//! Alerts raised from the current conditions, and the fixed risk-zone legend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::risk::LOW_MAX_PM25;
use crate::{CurrentConditions, RiskTier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub tier: RiskTier,
    pub message: String,
    pub observed_at: DateTime<Utc>,
}

/// Alerts for one cycle: always the glacier melt tier, plus a black carbon
/// alert once PM2.5 leaves the Low band.
pub fn alerts_for(conditions: &CurrentConditions, risk: RiskTier) -> Vec<Alert> {
    let mut alerts = vec![Alert {
        tier: risk,
        message: format!("{risk} glacier melt risk"),
        observed_at: conditions.observed_at,
    }];
    if conditions.pm25 > LOW_MAX_PM25 {
        alerts.push(Alert {
            tier: RiskTier::Moderate,
            message: "Moderate black carbon levels".to_owned(),
            observed_at: conditions.observed_at,
        });
    }
    alerts
}

/// A marked monitoring zone with its threshold label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskZone {
    pub tier: RiskTier,
    pub label: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Legend for the KwaZulu-Natal monitoring zones, highest risk first.
pub fn risk_zones() -> [RiskZone; 3] {
    [
        RiskZone {
            tier: RiskTier::High,
            label: "High Risk Zone (Black Carbon > 25 µg/m³)",
            latitude: -29.9,
            longitude: 30.9,
        },
        RiskZone {
            tier: RiskTier::Moderate,
            label: "Moderate Risk Zone (Black Carbon 10–25 µg/m³)",
            latitude: -30.2,
            longitude: 30.7,
        },
        RiskZone {
            tier: RiskTier::Low,
            label: "Low Risk Zone (Black Carbon ≤ 10 µg/m³)",
            latitude: -30.5,
            longitude: 30.5,
        },
    ]
}
