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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound (inclusive) of the Low tier, µg/m³.
pub const LOW_MAX_PM25: f64 = 10.0;
/// Upper bound (inclusive) of the Moderate tier, µg/m³.
pub const MODERATE_MAX_PM25: f64 = 25.0;

/// Three-tier particulate risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

/// Classify a PM2.5 concentration. Each tier's lower bound is exclusive.
#[must_use]
pub fn classify(pm25: f64) -> RiskTier {
    if pm25 > MODERATE_MAX_PM25 {
        RiskTier::High
    } else if pm25 > LOW_MAX_PM25 {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    }
}

impl RiskTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    /// Short advisory shown next to the tier.
    pub fn advisory(self) -> &'static str {
        match self {
            Self::Low => "Stable",
            Self::Moderate => "Be cautious",
            Self::High => "Warning",
        }
    }

    /// PM2.5 band covered by the tier, in µg/m³.
    pub fn threshold_label(self) -> String {
        match self {
            Self::Low => format!("≤ {LOW_MAX_PM25}"),
            Self::Moderate => format!("{LOW_MAX_PM25}–{MODERATE_MAX_PM25}"),
            Self::High => format!("> {MODERATE_MAX_PM25}"),
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "moderate" => Ok(Self::Moderate),
            "high" => Ok(Self::High),
            other => Err(format!("Unknown risk tier: '{other}'")),
        }
    }
}
