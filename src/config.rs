// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reload configuration model and process settings.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_CONFIG_PATH;
use crate::error::ReloaderError;

/// The reload configuration file: a list of bindings to keep in sync
#[derive(Debug, Clone, Deserialize)]
pub struct ReloaderConfig {
    #[serde(default)]
    pub reloaders: Vec<Binding>,
}

/// One configured pairing of a remote content source and a target resource
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    #[serde(rename = "configProvider", default)]
    pub provider: Option<ProviderConfig>,
    pub resource: ResourceSpec,
    #[serde(default)]
    pub reload_endpoint: Option<String>,
}

/// Config of all the supported remote providers
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub git: Option<GitConfig>,
}

/// Connection details for one file in a hosted Git repository
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitConfig {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo: String,
    #[serde(rename = "ref", default)]
    pub git_ref: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub pull_interval: String,
    #[serde(default)]
    pub auth_required: bool,
    #[serde(default)]
    pub disabled: bool,
}

/// Target resource of a binding, discriminated by `kind`. Unknown kinds are
/// rejected when the configuration is decoded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind")]
pub enum ResourceSpec {
    ConfigMap(ConfigMapTarget),
    MutatingWebhookConfiguration(WebhookTarget),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapTarget {
    pub name: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookTarget {
    pub name: String,
}

impl ReloaderConfig {
    /// Load the reload configuration from a YAML file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            ReloaderError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_yaml::from_str(&data).map_err(|e| {
            ReloaderError::ConfigError(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}

/// Identity of the pod this process runs in, used to resolve the namespaced
/// API calls and the annotation target.
#[derive(Debug, Clone)]
pub struct PodIdentity {
    pub namespace: String,
    pub name: String,
}

/// Process settings loaded from environment variables
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path of the reload configuration file
    pub config_path: PathBuf,
    pub identity: PodIdentity,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let config_path = env::var("RELOADER_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let namespace =
            env::var("POD_NAMESPACE").context("POD_NAMESPACE environment variable not set")?;
        let name = env::var("POD_NAME").context("POD_NAME environment variable not set")?;

        Ok(Settings {
            config_path,
            identity: PodIdentity { namespace, name },
        })
    }
}
