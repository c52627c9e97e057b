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

use crate::{Alert, CurrentConditions, HistorySeries, Location, RiskTier, SensorPayload};

/// Everything one refresh cycle hands to the presenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub refreshed_at: DateTime<Utc>,
    pub location: Location,
    pub conditions: CurrentConditions,
    pub risk: RiskTier,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    pub history: HistorySeries,
    pub sensor: Option<SensorPayload>,
    /// Secondary, non-blocking problems (e.g. the reading log could not be written).
    #[serde(default)]
    pub notices: Vec<String>,
}
