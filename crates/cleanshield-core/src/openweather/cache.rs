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

//! URL-keyed response cache with a fixed time-to-live.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::trace;

/// Default TTL for provider responses.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Upper bound on stored bodies; the oldest entry is evicted past it.
pub const MAX_CACHE_ENTRIES: usize = 256;

#[derive(Debug, Clone)]
struct CachedResponse {
    body: Value,
    stored_at: Instant,
}

/// Caches decoded JSON bodies by request URL. A zero TTL disables caching.
#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CachedResponse>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh body for `url`, if any. Expired entries are dropped on lookup.
    pub fn get(&self, url: &str) -> Option<Value> {
        if self.ttl.is_zero() {
            return None;
        }
        let mut entries = self.entries.lock();
        let entry = entries.get(url)?;
        if entry.stored_at.elapsed() < self.ttl {
            return Some(entry.body.clone());
        }
        trace!("cache entry expired");
        entries.remove(url);
        None
    }

    /// Store `body` for `url`. Expired entries are purged first, so
    /// one-off URLs (history windows) do not accumulate.
    pub fn insert(&self, url: impl Into<String>, body: Value) {
        if self.ttl.is_zero() {
            return;
        }
        let url = url.into();
        let mut entries = self.entries.lock();
        entries.retain(|_, e| e.stored_at.elapsed() < self.ttl);

        if entries.len() >= MAX_CACHE_ENTRIES && !entries.contains_key(&url) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.stored_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                trace!("cache full, evicting oldest entry");
                entries.remove(&oldest);
            }
        }

        entries.insert(
            url,
            CachedResponse {
                body,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
