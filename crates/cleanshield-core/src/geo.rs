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

use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::CycleError;
use crate::traits::Geocoder;
use cleanshield_types::Location;

/// Resolves a city name to coordinates within one country.
#[derive(Debug, Clone)]
pub struct GeoResolver {
    geocoder: Arc<dyn Geocoder>,
    country: String,
}

impl GeoResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, country: impl Into<String>) -> Self {
        Self {
            geocoder,
            country: country.into(),
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Resolve `name`, taking the provider's first match.
    ///
    /// There is no fallback location: an empty result is `NotFound`.
    pub async fn resolve(&self, name: &str) -> Result<Location, CycleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CycleError::NotFound("(empty name)".to_owned()));
        }

        match self.geocoder.geocode(name, &self.country).await? {
            Some(location) => {
                debug!(%location, "resolved location");
                Ok(location)
            }
            None => {
                warn!(city = name, country = %self.country, "no geocoding match");
                Err(CycleError::NotFound(format!("{name}, {}", self.country)))
            }
        }
    }
}
