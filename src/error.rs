// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReloaderError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("invalid pull interval: {0}")]
    InvalidPullInterval(String),

    #[error("fetch failed: {0}")]
    FetchError(String),

    #[error("HTTP transport error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("failed to parse fetched manifest: {0}")]
    ManifestError(#[from] serde_yaml::Error),

    #[error("{url} endpoint returned statuscode {status}; response: {body}")]
    ReloadTriggerError { url: String, status: u16, body: String },

    #[error("sync failed: {0}")]
    SyncError(String),
}

pub type Result<T> = std::result::Result<T, ReloaderError>;
