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

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's PM2.5 reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub pm25: f64,
}

/// Why a day is missing from a [`HistorySeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapReason {
    /// The provider answered but had no sample for the window.
    NoData,
    /// The request failed or the body could not be decoded.
    RequestFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryGap {
    pub date: NaiveDate,
    pub reason: GapReason,
}

/// Daily PM2.5 series over a window, ascending by date.
///
/// `points` never contains placeholders: a missing day only shows up in `gaps`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub points: Vec<HistoryPoint>,
    pub gaps: Vec<HistoryGap>,
}

impl HistorySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn failed_days(&self) -> usize {
        self.gaps
            .iter()
            .filter(|g| g.reason == GapReason::RequestFailed)
            .count()
    }
}
