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

//! Append-only CSV log of refresh readings.
//!
//! Each append opens the file in append mode and writes one row; the header
//! is written only when the file is new or empty. Appends from one process are
//! serialized. Separate processes sharing the file are not coordinated and may
//! interleave rows.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::LogError;
use cleanshield_types::LogRecord;

pub const DEFAULT_LOG_PATH: &str = "./data/readings.csv";

const TAIL_PREALLOC_LIMIT: usize = 1024;

#[derive(Debug)]
pub struct ReadingLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ReadingLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file (and its directory) on first use.
    pub fn append(&self, record: &LogRecord) -> Result<(), LogError> {
        let _guard = self.write_lock.lock();

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_new = file.metadata()?.len() == 0;
        if is_new {
            info!(path = %self.path.display(), "starting new reading log");
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        debug!(city = %record.city, risk = %record.risk, "reading appended");
        Ok(())
    }

    /// The last `n` records, oldest first. A missing log is empty.
    pub fn tail(&self, n: usize) -> Result<Vec<LogRecord>, LogError> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut recent = VecDeque::with_capacity(n.min(TAIL_PREALLOC_LIMIT));
        for row in reader.deserialize::<LogRecord>() {
            if recent.len() == n {
                recent.pop_front();
            }
            recent.push_back(row?);
        }
        Ok(recent.into())
    }

    /// [`append`](Self::append) on the blocking thread pool.
    pub async fn append_async(self: &Arc<Self>, record: LogRecord) -> Result<(), LogError> {
        let log = Arc::clone(self);
        tokio::task::spawn_blocking(move || log.append(&record)).await?
    }

    /// [`tail`](Self::tail) on the blocking thread pool.
    pub async fn tail_async(self: &Arc<Self>, n: usize) -> Result<Vec<LogRecord>, LogError> {
        let log = Arc::clone(self);
        tokio::task::spawn_blocking(move || log.tail(n)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use cleanshield_types::RiskTier;
    use tempfile::tempdir;

    fn record(i: i64) -> LogRecord {
        #[expect(clippy::cast_precision_loss, reason = "small test values")]
        let pm25 = 5.0 + i as f64 * 4.5;
        LogRecord {
            timestamp: DateTime::<Utc>::from_timestamp(1_700_000_000 + i * 300, 0).unwrap(),
            city: "Durban".to_owned(),
            lat: -29.9,
            lon: 30.9,
            temp_c: 22.5,
            humidity_pct: 60,
            wind_kmh: 18.0,
            pm25,
            risk: cleanshield_types::classify(pm25),
        }
    }

    #[test]
    fn append_then_tail_returns_the_same_record() {
        let dir = tempdir().unwrap();
        let log = ReadingLog::new(dir.path().join("readings.csv"));
        let input = LogRecord {
            timestamp: DateTime::<Utc>::from_timestamp(1_700_000_123, 0).unwrap(),
            city: "Cape Town".to_owned(),
            lat: -33.92,
            lon: 18.42,
            temp_c: 14.3,
            humidity_pct: 81,
            wind_kmh: 27.36,
            pm25: 11.7,
            risk: RiskTier::Moderate,
        };

        log.append(&input).unwrap();

        assert_eq!(log.tail(1).unwrap(), vec![input]);
    }

    #[test]
    fn tail_keeps_insertion_order_and_drops_the_oldest() {
        let dir = tempdir().unwrap();
        let log = ReadingLog::new(dir.path().join("readings.csv"));
        for i in 0..5 {
            log.append(&record(i)).unwrap();
        }

        log.append(&record(5)).unwrap();

        let tail = log.tail(5).unwrap();
        assert_eq!(tail, (1..=5).map(record).collect::<Vec<_>>());
    }

    #[test]
    fn header_is_written_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("readings.csv");
        let log = ReadingLog::new(&path);
        for i in 0..3 {
            log.append(&record(i)).unwrap();
        }

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,city,lat,lon,temp_c,humidity_pct,wind_kmh,pm25,risk")
        );
        assert_eq!(lines.count(), 3);
        assert_eq!(contents.matches("timestamp,city").count(), 1);
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempdir().unwrap();
        let log = ReadingLog::new(dir.path().join("nested/deeper/readings.csv"));

        log.append(&record(0)).unwrap();

        assert_eq!(log.tail(10).unwrap().len(), 1);
    }

    #[test]
    fn missing_log_has_an_empty_tail() {
        let dir = tempdir().unwrap();
        let log = ReadingLog::new(dir.path().join("absent.csv"));

        assert!(log.tail(5).unwrap().is_empty());
        assert!(log.tail(0).unwrap().is_empty());
    }

    #[test]
    fn tail_larger_than_the_log_returns_everything() {
        let dir = tempdir().unwrap();
        let log = ReadingLog::new(dir.path().join("readings.csv"));
        log.append(&record(0)).unwrap();
        log.append(&record(1)).unwrap();

        assert_eq!(log.tail(50).unwrap(), vec![record(0), record(1)]);
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempdir().unwrap();
        // a directory cannot be opened for appending
        let log = ReadingLog::new(dir.path());

        assert!(matches!(log.append(&record(0)), Err(LogError::Io(_))));
    }

    #[test]
    fn huge_tail_request_is_served() {
        let dir = tempdir().unwrap();
        let log = ReadingLog::new(dir.path().join("readings.csv"));
        log.append(&record(0)).unwrap();

        assert_eq!(log.tail(usize::MAX).unwrap(), vec![record(0)]);
    }

    #[tokio::test]
    async fn async_variants_run_off_the_runtime() {
        let dir = tempdir().unwrap();
        let log = Arc::new(ReadingLog::new(dir.path().join("readings.csv")));
        for i in 0..3 {
            log.append_async(record(i)).await.unwrap();
        }

        assert_eq!(log.tail_async(2).await.unwrap(), vec![record(1), record(2)]);
        assert!(matches!(
            Arc::new(ReadingLog::new(dir.path()))
                .append_async(record(0))
                .await,
            Err(LogError::Io(_))
        ));
    }
}
