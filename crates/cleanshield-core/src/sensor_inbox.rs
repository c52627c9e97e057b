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

//! Bounded buffer of payloads pushed by the field sensor board.

use parking_lot::Mutex;
use ringbuffer::{AllocRingBuffer, RingBuffer};
use std::fmt;
use tracing::debug;

use cleanshield_types::SensorPayload;

pub const DEFAULT_INBOX_CAPACITY: usize = 100;

/// Process-wide inbox. Create once at startup and share it; the ingestion
/// endpoint pushes, the display path only reads [`SensorInbox::latest`].
///
/// Keeps the most recent `capacity` payloads in arrival order; older ones are
/// evicted. No deduplication.
pub struct SensorInbox {
    buffer: Mutex<AllocRingBuffer<SensorPayload>>,
    capacity: usize,
}

impl SensorInbox {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Mutex::new(AllocRingBuffer::new(capacity)),
            capacity,
        }
    }

    pub fn push(&self, payload: SensorPayload) {
        let mut buffer = self.buffer.lock();
        let _evicted = buffer.enqueue(payload);
        debug!(retained = buffer.len(), "sensor payload received");
    }

    /// Most recently pushed payload.
    pub fn latest(&self) -> Option<SensorPayload> {
        self.buffer.lock().back().cloned()
    }

    /// All retained payloads, oldest first.
    pub fn recent(&self) -> Vec<SensorPayload> {
        self.buffer.lock().to_vec()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for SensorInbox {
    fn default() -> Self {
        Self::new(DEFAULT_INBOX_CAPACITY)
    }
}

impl fmt::Debug for SensorInbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorInbox")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
