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

//! Ingestion endpoint for the field sensor board.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{debug, warn};

use cleanshield_types::SensorPayload;

use crate::state::AppState;

#[expect(clippy::unused_async, reason = "axum handler must be async")]
pub async fn ingest_handler(
    State(state): State<AppState>,
    Json(payload): Json<SensorPayload>,
) -> Response {
    if !payload.has_readings() {
        warn!("Rejected sensor payload without readings");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "payload contains no sensor readings" })),
        )
            .into_response();
    }

    debug!(
        readings = payload.readings().len(),
        timestamp = payload.timestamp.as_deref().unwrap_or("-"),
        "sensor payload received"
    );
    state.inbox().push(payload);

    (
        StatusCode::ACCEPTED,
        Json(json!({
            "accepted": true,
            "retained": state.inbox().len(),
        })),
    )
        .into_response()
}

#[expect(clippy::unused_async, reason = "axum handler must be async")]
pub async fn latest_handler(State(state): State<AppState>) -> Response {
    match state.inbox().latest() {
        Some(payload) => Json(payload).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
