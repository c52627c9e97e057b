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

use thiserror::Error;

/// Failure talking to the weather / air-quality provider.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned error status {status}: {message}")]
    Status {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    #[error("{endpoint} returned a malformed body: {reason}")]
    Malformed {
        endpoint: &'static str,
        reason: String,
    },

    #[error("{endpoint} response is missing {field}")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Errors that stop a refresh cycle.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("Location not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Reading log persistence failure. Never fatal to a refresh cycle.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("reading log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("reading log CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("reading log task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
