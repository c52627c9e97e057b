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

pub mod api;
pub mod config;
pub mod dashboard;
pub mod scheduler;
pub mod sensor;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

pub use config::ShieldConfig;
pub use state::AppState;

/// All dashboard routes over a shared [`AppState`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::dashboard_handler))
        .route("/refresh", post(dashboard::refresh_and_redirect))
        .route("/health", get(api::health_handler))
        .route("/api/dashboard", get(api::dashboard_json_handler))
        .route("/api/refresh", post(api::refresh_handler))
        .route("/api/readings", get(api::readings_handler))
        .route("/api/zones", get(api::zones_handler))
        .route("/api/sensor", post(sensor::ingest_handler))
        .route("/api/sensor/latest", get(sensor::latest_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
