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

//! Payloads pushed by the field sensor board.

use serde::{Deserialize, Deserializer, Serialize};

/// Readings from one push of the sensor board. Every field is optional and
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorPayload {
    /// MQ-7 carbon monoxide sensor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mq7: Option<f64>,
    /// MQ-6 LPG / butane sensor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mq6: Option<f64>,
    /// MQ-136 hydrogen sulfide sensor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mq136: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_kyo15: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_kyo15: Option<f64>,
    /// Device-side timestamp, kept verbatim.
    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<String>,
}

impl SensorPayload {
    /// Present measurements with their display labels, in board order.
    pub fn readings(&self) -> Vec<(&'static str, f64)> {
        [
            ("MQ-7 (CO)", self.mq7),
            ("MQ-6 (LPG)", self.mq6),
            ("MQ-136 (H2S)", self.mq136),
            ("Temperature", self.temp),
            ("Humidity", self.humidity),
            ("Soil moisture", self.soil),
            ("KY-015 temperature", self.temp_kyo15),
            ("KY-015 humidity", self.humidity_kyo15),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }

    /// True when at least one measurement is present.
    pub fn has_readings(&self) -> bool {
        !self.readings().is_empty()
    }
}

/// Boards send the timestamp either as a string or as a bare number.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct TimestampVisitor;

    impl<'de> Visitor<'de> for TimestampVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a timestamp string or number")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(Some(value.to_owned()))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(TimestampVisitor)
}
