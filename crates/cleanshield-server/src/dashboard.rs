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

use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect};
use chrono::Utc;
use tracing::{error, info, warn};

use cleanshield_types::{
    Alert, DashboardSnapshot, GapReason, LogRecord, RiskTier, RiskZone, SensorPayload, risk_zones,
};

use crate::state::AppState;

#[derive(Debug, Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub city: String,
    pub snapshot: Option<SnapshotView>,
    /// Set when the last cycle failed; the page shows only this.
    pub failure: Option<String>,
    pub sensor: Option<SensorView>,
    pub readings: Vec<ReadingRow>,
    pub zones: Vec<ZoneRow>,
    pub server_time: String,
}

#[derive(Debug)]
pub struct SnapshotView {
    pub location: String,
    pub coordinates: String,
    pub refreshed_at: String,
    pub observed_at: String,
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
    pub pm25: String,
    pub risk: String,
    pub advisory: String,
    pub risk_class: &'static str,
    pub alerts: Vec<AlertRow>,
    pub history: Vec<HistoryRow>,
    pub notices: Vec<String>,
}

#[derive(Debug)]
pub struct AlertRow {
    pub risk_class: &'static str,
    pub message: String,
    pub at: String,
}

#[derive(Debug)]
pub struct ZoneRow {
    pub risk_class: &'static str,
    pub label: &'static str,
    pub thresholds: String,
    pub coordinates: String,
}

#[derive(Debug)]
pub struct HistoryRow {
    pub date: String,
    pub value: String,
}

#[derive(Debug)]
pub struct SensorView {
    pub received: String,
    pub rows: Vec<(String, String)>,
}

#[derive(Debug)]
pub struct ReadingRow {
    pub timestamp: String,
    pub city: String,
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
    pub pm25: String,
    pub risk: String,
}

fn risk_class(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Low => "risk-low",
        RiskTier::Moderate => "risk-moderate",
        RiskTier::High => "risk-high",
    }
}

impl From<&DashboardSnapshot> for SnapshotView {
    fn from(snapshot: &DashboardSnapshot) -> Self {
        let conditions = &snapshot.conditions;

        // Points and gaps merged back into one ascending list of days.
        let mut history: Vec<_> = snapshot
            .history
            .points
            .iter()
            .map(|p| (p.date, format!("{:.1}", p.pm25)))
            .chain(snapshot.history.gaps.iter().map(|g| {
                let label = match g.reason {
                    GapReason::NoData => "no data",
                    GapReason::RequestFailed => "unavailable",
                };
                (g.date, label.to_owned())
            }))
            .collect();
        history.sort_by_key(|(date, _)| *date);

        Self {
            location: snapshot.location.name.clone(),
            coordinates: format!(
                "{:.4}, {:.4}",
                snapshot.location.latitude, snapshot.location.longitude
            ),
            refreshed_at: snapshot
                .refreshed_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            observed_at: conditions
                .observed_at
                .format("%Y-%m-%d %H:%M UTC")
                .to_string(),
            temperature: format!("{:.1} °C", conditions.temperature_c),
            humidity: format!("{} %", conditions.humidity_pct),
            wind: format!("{:.1} km/h", conditions.wind_kmh),
            pm25: format!("{:.1} µg/m³", conditions.pm25),
            risk: snapshot.risk.to_string(),
            advisory: snapshot.risk.advisory().to_owned(),
            risk_class: risk_class(snapshot.risk),
            alerts: snapshot.alerts.iter().map(AlertRow::from).collect(),
            history: history
                .into_iter()
                .map(|(date, value)| HistoryRow {
                    date: date.format("%Y-%m-%d").to_string(),
                    value,
                })
                .collect(),
            notices: snapshot.notices.clone(),
        }
    }
}

impl From<&Alert> for AlertRow {
    fn from(alert: &Alert) -> Self {
        Self {
            risk_class: risk_class(alert.tier),
            message: alert.message.clone(),
            at: alert.observed_at.format("%b %d, %I:%M %p UTC").to_string(),
        }
    }
}

impl From<&RiskZone> for ZoneRow {
    fn from(zone: &RiskZone) -> Self {
        Self {
            risk_class: risk_class(zone.tier),
            label: zone.label,
            thresholds: format!("{} µg/m³", zone.tier.threshold_label()),
            coordinates: format!("{:.1}, {:.1}", zone.latitude, zone.longitude),
        }
    }
}

impl From<&SensorPayload> for SensorView {
    fn from(payload: &SensorPayload) -> Self {
        Self {
            received: payload
                .timestamp
                .clone()
                .unwrap_or_else(|| "unknown".to_owned()),
            rows: payload
                .readings()
                .into_iter()
                .map(|(label, value)| (label.to_owned(), format!("{value:.2}")))
                .collect(),
        }
    }
}

impl From<&LogRecord> for ReadingRow {
    fn from(record: &LogRecord) -> Self {
        Self {
            timestamp: record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            city: record.city.clone(),
            temperature: format!("{:.1}", record.temp_c),
            humidity: record.humidity_pct.to_string(),
            wind: format!("{:.1}", record.wind_kmh),
            pm25: format!("{:.1}", record.pm25),
            risk: record.risk.to_string(),
        }
    }
}

pub async fn dashboard_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (status, snapshot, failure) = match state.latest() {
        Some(Ok(snapshot)) => (StatusCode::OK, Some(SnapshotView::from(&snapshot)), None),
        Some(Err(failure)) => (StatusCode::SERVICE_UNAVAILABLE, None, Some(failure.error)),
        None => (StatusCode::OK, None, None),
    };

    let readings = match state.log().tail_async(state.tail()).await {
        Ok(records) => records.iter().map(ReadingRow::from).collect(),
        Err(e) => {
            warn!(error = %e, path = %state.log().path().display(), "Failed to read reading log");
            Vec::new()
        }
    };

    let template = DashboardTemplate {
        city: state.city().to_owned(),
        snapshot,
        failure,
        sensor: state.inbox().latest().as_ref().map(SensorView::from),
        readings,
        zones: risk_zones().iter().map(ZoneRow::from).collect(),
        server_time: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    };

    match template.render() {
        Ok(html) => (status, Html(html)),
        Err(e) => {
            error!(error = %e, "Template render error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("<h1>Error rendering dashboard: {e}</h1>")),
            )
        }
    }
}

/// Form-facing refresh: run a cycle and send the browser back to the page.
pub async fn refresh_and_redirect(State(state): State<AppState>) -> Redirect {
    info!(city = %state.city(), "refresh requested from dashboard");
    // The outcome is stored in state; the dashboard renders either result.
    let _outcome = state.refresh().await;
    Redirect::to("/")
}
