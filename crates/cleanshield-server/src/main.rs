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

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cleanshield_server::scheduler::spawn_refresh_loop;
use cleanshield_server::{AppState, ShieldConfig, router};

#[derive(Debug, Parser)]
#[command(
    name = "cleanshield-server",
    about = "Clean Shield environmental monitoring dashboard"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "cleanshield.toml")]
    config: PathBuf,

    /// City to monitor, overriding the configured one
    #[arg(long)]
    city: Option<String>,

    /// Run one refresh cycle, print the snapshot as JSON and exit
    #[arg(long)]
    once: bool,
}

fn load_config(path: &Path) -> anyhow::Result<ShieldConfig> {
    if path.exists() {
        info!(path = %path.display(), "Loading configuration");
        return ShieldConfig::from_file(path);
    }

    warn!(path = %path.display(), "Config file not found, using defaults");
    let config = ShieldConfig::default();
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("cleanshield_server=info,cleanshield_core=info")
        }))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let state = AppState::from_config(&config, cli.city)?;

    if cli.once {
        let snapshot = state
            .refresh()
            .await
            .map_err(|failure| anyhow!(failure.error))?;
        let json = serde_json::to_string_pretty(&snapshot).context("Failed to encode snapshot")?;
        println!("{json}");
        return Ok(());
    }

    spawn_refresh_loop(state.clone(), config.refresh.interval.as_duration());

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Clean Shield listening on {addr}");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
