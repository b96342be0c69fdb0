// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-binding watch loop: poll the remote provider on its interval and hand
//! the fetched content to the syncer.

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::error::Result;
use crate::provider::RemoteProvider;
use crate::sync::ConfigSyncer;

/// Drive one provider/syncer pair until the token is cancelled. Fetch and
/// sync run sequentially on every tick; a failed tick is logged and retried
/// at the next one, with no backoff.
pub async fn watch(
    token: CancellationToken,
    provider: Box<dyn RemoteProvider>,
    syncer: Box<dyn ConfigSyncer>,
) -> Result<()> {
    let interval = provider.effective_pull_interval()?;
    debug!(?interval, "starting config watch");

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                info!("shutting down config watcher");
                return Ok(());
            }
            _ = tokio::time::sleep(interval) => {
                let response = match provider.fetch().await {
                    Ok(response) => response,
                    Err(e) => {
                        error!(error = %e, "error in fetching the config");
                        continue;
                    }
                };
                if let Err(e) = syncer.sync(&response).await {
                    error!(error = %e, "error in config sync");
                }
            }
        }
    }
}
