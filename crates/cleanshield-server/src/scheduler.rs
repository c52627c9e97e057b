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

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::state::AppState;

/// Run a cycle now and then once per `period`, for the life of the process.
pub fn spawn_refresh_loop(state: AppState, period: Duration) -> JoinHandle<()> {
    info!(period_secs = period.as_secs(), city = %state.city(), "starting refresh loop");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // A slow cycle pushes the next one back instead of bunching ticks.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Ok(snapshot) = state.refresh().await {
                debug!(
                    pm25 = snapshot.conditions.pm25,
                    risk = %snapshot.risk,
                    history_days = snapshot.history.len(),
                    "scheduled refresh finished"
                );
            }
        }
    })
}
