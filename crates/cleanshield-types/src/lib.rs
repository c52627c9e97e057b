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

//! Plain data shared by the refresh pipeline, the reading log and the server.
//!
//! Nothing in this crate performs I/O. Every type is recomputed per refresh
//! cycle except [`LogRecord`] (persisted) and [`SensorPayload`] (retained by
//! the inbox for the lifetime of the process).

pub mod alert;
pub mod conditions;
pub mod history;
pub mod location;
pub mod record;
pub mod risk;
pub mod sensor;
pub mod snapshot;

pub use alert::{Alert, RiskZone, alerts_for, risk_zones};
pub use conditions::{CurrentConditions, kmh};
pub use history::{GapReason, HistoryGap, HistoryPoint, HistorySeries};
pub use location::Location;
pub use record::LogRecord;
pub use risk::{RiskTier, classify};
pub use sensor::SensorPayload;
pub use snapshot::DashboardSnapshot;
