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

//! JSON endpoints over the refresh cycle and the reading log.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use cleanshield_types::risk_zones;

use crate::state::{AppState, FailureKind};

#[derive(Debug, Deserialize)]
pub struct ReadingsQuery {
    pub n: Option<usize>,
}

#[expect(clippy::unused_async, reason = "axum handler must be async")]
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Latest snapshot, or 503 while none is available.
#[expect(clippy::unused_async, reason = "axum handler must be async")]
pub async fn dashboard_json_handler(State(state): State<AppState>) -> Response {
    match state.latest() {
        Some(Ok(snapshot)) => Json(snapshot).into_response(),
        Some(Err(failure)) => (StatusCode::SERVICE_UNAVAILABLE, Json(failure)).into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "no refresh cycle has completed yet" })),
        )
            .into_response(),
    }
}

pub async fn refresh_handler(State(state): State<AppState>) -> Response {
    info!(city = %state.city(), "manual refresh requested");

    match state.refresh().await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(failure) => {
            let status = match failure.kind {
                FailureKind::NotFound => StatusCode::NOT_FOUND,
                FailureKind::Fetch => StatusCode::BAD_GATEWAY,
            };
            (status, Json(failure)).into_response()
        }
    }
}

pub async fn readings_handler(
    State(state): State<AppState>,
    Query(query): Query<ReadingsQuery>,
) -> Response {
    let n = query.n.unwrap_or_else(|| state.tail());

    match state.log().tail_async(n).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to read reading log");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Static risk-zone legend.
#[expect(clippy::unused_async, reason = "axum handler must be async")]
pub async fn zones_handler() -> impl IntoResponse {
    Json(risk_zones())
}
