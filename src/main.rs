// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::Client;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use lm_config_reloader::config::{ReloaderConfig, Settings};
use lm_config_reloader::reloader::{validate, Reloader};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting the LM-Config-Reloader"
    );

    // Load process settings and the reload configuration
    let settings = Settings::from_env()?;
    let config = ReloaderConfig::load(&settings.config_path)
        .with_context(|| format!("error in loading config file {}", settings.config_path.display()))?;
    info!(
        path = %settings.config_path.display(),
        reloaders = config.reloaders.len(),
        "reload configuration loaded"
    );

    // Validate config before anything starts
    validate(&config).context("error in validating config")?;

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    // Cancel all watchers on ctrl-c
    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for shutdown signal");
            return;
        }
        info!("shutdown signal received");
        shutdown.cancel();
    });

    // Run one watch task per enabled binding until cancelled
    let reloader = Reloader::new(config, client, settings.identity);
    reloader
        .run(token)
        .await
        .context("error in setup of the config providers")?;

    info!("exiting the main process");
    Ok(())
}
