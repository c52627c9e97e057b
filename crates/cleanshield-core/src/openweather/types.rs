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

//! Wire shapes of the OpenWeather endpoints. Only the fields we read.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    pub main: MainBlock,
    pub wind: WindBlock,
}

#[derive(Debug, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub struct WindBlock {
    pub speed: f64,
}

/// Shared by `/air_pollution` and `/air_pollution/history`.
#[derive(Debug, Deserialize)]
pub struct AirPollutionResponse {
    #[serde(default)]
    pub list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AirPollutionEntry {
    /// Unix seconds.
    pub dt: i64,
    pub components: Components,
}

#[derive(Debug, Deserialize)]
pub struct Components {
    pub pm2_5: f64,
}

#[derive(Debug, Deserialize)]
pub struct GeoEntry {
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}
