#![allow(clippy::float_cmp)]
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

use mockito::{Matcher, Mock, ServerGuard};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tempfile::TempDir;

use cleanshield_server::config::{
    LocationSettings, LogSettings, ProviderSettings, RefreshSettings, SensorSettings,
    ServerSettings, ShieldConfig,
};
use cleanshield_server::{AppState, router};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn test_config(provider_url: String, log_dir: &TempDir) -> ShieldConfig {
    ShieldConfig {
        server: ServerSettings {
            bind_address: "127.0.0.1".to_owned(),
            port: 0,
        },
        location: LocationSettings::default(),
        provider: ProviderSettings {
            base_url: provider_url,
            api_key: Some("test-key".to_owned()),
            timeout_secs: 5,
            cache_ttl_secs: 0,
        },
        refresh: RefreshSettings {
            history_days: 1,
            ..RefreshSettings::default()
        },
        log: LogSettings {
            path: log_dir
                .path()
                .join("readings.csv")
                .to_string_lossy()
                .into_owned(),
            tail: 10,
        },
        sensor: SensorSettings { capacity: 2 },
    }
}

async fn mock_geocoding(provider: &mut ServerGuard, body: Value) -> Mock {
    provider
        .mock("GET", "/geo/1.0/direct")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

async fn mock_healthy_provider(provider: &mut ServerGuard) -> Vec<Mock> {
    vec![
        mock_geocoding(
            provider,
            json!([{"name": "Durban", "lat": -29.8587, "lon": 31.0218, "country": "ZA"}]),
        )
        .await,
        provider
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_body(
                json!({"main": {"temp": 22.5, "humidity": 60}, "wind": {"speed": 5.0}})
                    .to_string(),
            )
            .create_async()
            .await,
        provider
            .mock("GET", "/data/2.5/air_pollution")
            .match_query(Matcher::Any)
            .with_body(
                json!({"list": [{"dt": 1717416000, "components": {"pm2_5": 30.0}}]}).to_string(),
            )
            .create_async()
            .await,
        provider
            .mock("GET", "/data/2.5/air_pollution/history")
            .match_query(Matcher::Any)
            .with_body(
                json!({"list": [{"dt": 1717329600, "components": {"pm2_5": 12.0}}]}).to_string(),
            )
            .create_async()
            .await,
    ]
}

struct TestServer {
    port: u16,
    client: reqwest::Client,
    _log_dir: TempDir,
}

impl TestServer {
    async fn start(provider_url: String, city: Option<&str>) -> Self {
        let log_dir = TempDir::new().expect("Failed to create temp dir");
        let config = test_config(provider_url, &log_dir);
        let state = AppState::from_config(&config, city.map(str::to_owned))
            .expect("Failed to build app state");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });

        Self {
            port,
            client: reqwest::Client::new(),
            _log_dir: log_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    async fn refresh(&self) -> reqwest::Response {
        self.client
            .post(self.url("/api/refresh"))
            .send()
            .await
            .unwrap()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok() {
    let provider = mockito::Server::new_async().await;
    let server = TestServer::start(provider.url(), None).await;

    let resp = server.get("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn dashboard_is_unavailable_before_first_cycle() {
    let provider = mockito::Server::new_async().await;
    let server = TestServer::start(provider.url(), None).await;

    let resp = server.get("/api/dashboard").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());

    let resp = server.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Waiting for the first refresh"));
}

#[tokio::test]
async fn refresh_builds_snapshot_and_logs_reading() {
    let mut provider = mockito::Server::new_async().await;
    let _mocks = mock_healthy_provider(&mut provider).await;
    let server = TestServer::start(provider.url(), None).await;

    let resp = server.refresh().await;
    assert_eq!(resp.status(), StatusCode::OK);
    let snapshot: Value = resp.json().await.unwrap();
    assert_eq!(snapshot["location"]["name"], "Durban");
    assert_eq!(snapshot["conditions"]["wind_kmh"], 18.0);
    assert_eq!(snapshot["conditions"]["humidity_pct"], 60);
    assert_eq!(snapshot["risk"], "High");
    assert_eq!(snapshot["history"]["points"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["notices"], json!([]));
    assert_eq!(snapshot["alerts"][0]["message"], "High glacier melt risk");
    assert_eq!(snapshot["alerts"][1]["message"], "Moderate black carbon levels");

    let resp = server.get("/api/dashboard").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let latest: Value = resp.json().await.unwrap();
    assert_eq!(latest["refreshed_at"], snapshot["refreshed_at"]);

    let resp = server.get("/api/readings?n=5").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let readings: Value = resp.json().await.unwrap();
    let readings = readings.as_array().unwrap();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0]["city"], "Durban");
    assert_eq!(readings[0]["pm25"], 30.0);
    assert_eq!(readings[0]["risk"], "High");

    let html = server.get("/").await.text().await.unwrap();
    assert!(html.contains("Durban"));
    assert!(html.contains("High - Warning"));
    assert!(html.contains("PM2.5 history"));
}

#[tokio::test]
async fn repeated_refreshes_append_to_the_log() {
    let mut provider = mockito::Server::new_async().await;
    let _mocks = mock_healthy_provider(&mut provider).await;
    let server = TestServer::start(provider.url(), None).await;

    for _ in 0..3 {
        assert_eq!(server.refresh().await.status(), StatusCode::OK);
    }

    let readings: Value = server.get("/api/readings").await.json().await.unwrap();
    assert_eq!(readings.as_array().unwrap().len(), 3);

    let readings: Value = server.get("/api/readings?n=2").await.json().await.unwrap();
    assert_eq!(readings.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_city_is_not_found() {
    let mut provider = mockito::Server::new_async().await;
    let _geo = mock_geocoding(&mut provider, json!([])).await;
    let server = TestServer::start(provider.url(), Some("Atlantis")).await;

    let resp = server.refresh().await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "not_found");
    assert!(body["error"].as_str().unwrap().contains("Atlantis"));

    let resp = server.get("/api/dashboard").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let resp = server.get("/").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Dashboard unavailable"));
    assert!(!html.contains("PM2.5 history"));

    let readings: Value = server.get("/api/readings").await.json().await.unwrap();
    assert_eq!(readings, json!([]));
}

#[tokio::test]
async fn provider_failure_is_bad_gateway() {
    let mut provider = mockito::Server::new_async().await;
    let _geo = mock_geocoding(
        &mut provider,
        json!([{"name": "Durban", "lat": -29.8587, "lon": 31.0218}]),
    )
    .await;
    let _weather = provider
        .mock("GET", "/data/2.5/weather")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(r#"{"message": "internal error"}"#)
        .create_async()
        .await;
    let server = TestServer::start(provider.url(), None).await;

    let resp = server.refresh().await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "fetch");
    assert!(body["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn sensor_ingestion_keeps_latest_payloads() {
    let provider = mockito::Server::new_async().await;
    let server = TestServer::start(provider.url(), None).await;

    let resp = server.get("/api/sensor/latest").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = server
        .post_json("/api/sensor", &json!({"timestamp": 1700000000}))
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Capacity is 2 in the test config.
    let mut retained = Vec::new();
    for mq7 in [1.0, 2.0, 3.0] {
        let resp = server
            .post_json("/api/sensor", &json!({"mq7": mq7, "timestamp": "t"}))
            .await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        let body: Value = resp.json().await.unwrap();
        retained.push(body["retained"].as_u64().unwrap());
    }
    assert_eq!(retained, [1, 2, 2]);

    let latest: Value = server.get("/api/sensor/latest").await.json().await.unwrap();
    assert_eq!(latest["mq7"], 3.0);
    assert_eq!(latest["timestamp"], "t");
}

#[tokio::test]
async fn malformed_sensor_payload_is_rejected() {
    let provider = mockito::Server::new_async().await;
    let server = TestServer::start(provider.url(), None).await;

    let resp = server
        .client
        .post(server.url("/api/sensor"))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());

    let resp = server.get("/api/sensor/latest").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn sensor_push_shows_without_another_refresh() {
    let mut provider = mockito::Server::new_async().await;
    let _mocks = mock_healthy_provider(&mut provider).await;
    let server = TestServer::start(provider.url(), None).await;

    assert_eq!(server.refresh().await.status(), StatusCode::OK);
    let snapshot: Value = server.get("/api/dashboard").await.json().await.unwrap();
    assert!(snapshot["sensor"].is_null());

    let resp = server
        .post_json("/api/sensor", &json!({"soil": 41.5, "humidity_kyo15": 70}))
        .await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let snapshot: Value = server.get("/api/dashboard").await.json().await.unwrap();
    assert_eq!(snapshot["sensor"]["soil"], 41.5);

    let html = server.get("/").await.text().await.unwrap();
    assert!(html.contains("Soil moisture"));
    assert!(html.contains("41.50"));
}

#[tokio::test]
async fn dashboard_refresh_form_redirects_to_page() {
    let mut provider = mockito::Server::new_async().await;
    let _mocks = mock_healthy_provider(&mut provider).await;
    let server = TestServer::start(provider.url(), None).await;

    let no_redirect = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let resp = no_redirect
        .post(server.url("/refresh"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/");

    let html = server.get("/").await.text().await.unwrap();
    assert!(html.contains("High glacier melt risk"));
    assert!(html.contains("Risk zones"));
}

#[tokio::test]
async fn failed_refresh_from_form_still_lands_on_page() {
    let mut provider = mockito::Server::new_async().await;
    let _geo = mock_geocoding(&mut provider, json!([])).await;
    let server = TestServer::start(provider.url(), Some("Atlantis")).await;

    // Follows the redirect back to the HTML error page.
    let resp = server
        .client
        .post(server.url("/refresh"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Dashboard unavailable"));
    assert!(html.contains(r#"action="/refresh""#));
}

#[tokio::test]
async fn zone_legend_lists_three_tiers() {
    let provider = mockito::Server::new_async().await;
    let server = TestServer::start(provider.url(), None).await;

    let zones: Value = server.get("/api/zones").await.json().await.unwrap();
    let tiers: Vec<_> = zones
        .as_array()
        .unwrap()
        .iter()
        .map(|z| z["tier"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(tiers, ["High", "Moderate", "Low"]);
}

