// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;

/// Kubernetes annotation keys written on the designated pod after a config
/// update, so dependent processes can detect the change.
pub mod annotations {
    /// Prefix for all reloader-owned pod annotations
    pub const PREFIX: &str = "lm-config-reloader";

    /// Annotation holding the hex-encoded SHA-256 digest of the synced content
    pub fn config_hash(file_name: &str) -> String {
        format!("{PREFIX}/{file_name}-configHash")
    }

    /// Annotation holding the timestamp of the last content update
    pub fn last_modified(file_name: &str) -> String {
        format!("{PREFIX}/{file_name}-last-modified")
    }
}

/// Pull interval applied to a Git provider that does not configure one
pub const GIT_DEFAULT_PULL_INTERVAL: Duration = Duration::from_secs(20);

/// Reload configuration file read when RELOADER_CONFIG_PATH is not set
pub const DEFAULT_CONFIG_PATH: &str = "/etc/lmreloader/config/lmreloaderconfig.yaml";

/// Base URL of the hosted Git content API
pub const GIT_API_BASE_URL: &str = "https://api.github.com";

/// User agent sent on outbound HTTP requests
pub const USER_AGENT: &str = concat!("lm-config-reloader/", env!("CARGO_PKG_VERSION"));
