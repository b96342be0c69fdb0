// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reload trigger: notify a sidecar process that its config changed.

use reqwest::StatusCode;
use tracing::{debug, info};

use crate::error::{ReloaderError, Result};

/// Trigger a config reload by POSTing to the configured endpoint with an
/// empty body. Strictly 200 counts as success.
pub async fn trigger_reload(client: &reqwest::Client, reload_url: &str) -> Result<()> {
    debug!(url = %reload_url, "reloading configuration gracefully via POST request");

    let response = client.post(reload_url).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(ReloaderError::ReloadTriggerError {
            url: reload_url.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    info!("config reload triggered");
    Ok(())
}
