// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource syncers: reconcile one Kubernetes resource kind with fetched
//! config content.

pub mod annotations;
pub mod configmap;
pub mod reload;
pub mod webhook;

pub use configmap::ConfigMapSyncer;
pub use webhook::MutatingWebhookSyncer;

use async_trait::async_trait;
use kube::Client;
use url::Url;

use crate::config::{Binding, PodIdentity, ResourceSpec};
use crate::error::{ReloaderError, Result};
use crate::fetcher::Response;

/// Implemented by the config syncer of each resource kind
#[async_trait]
pub trait ConfigSyncer: Send + Sync {
    async fn sync(&self, response: &Response) -> Result<()>;
}

/// Create the [`ConfigSyncer`] for the binding's resource kind
pub fn create_syncer(
    binding: &Binding,
    client: Client,
    identity: PodIdentity,
) -> Result<Box<dyn ConfigSyncer>> {
    match &binding.resource {
        ResourceSpec::ConfigMap(target) => Ok(Box::new(ConfigMapSyncer::new(
            client,
            identity,
            target.clone(),
            binding.reload_endpoint.clone(),
        )?)),
        ResourceSpec::MutatingWebhookConfiguration(target) => {
            Ok(Box::new(MutatingWebhookSyncer::new(client, target.clone())))
        }
    }
}

/// Validate the resource part of a binding
pub fn validate_resource(resource: &ResourceSpec) -> Result<()> {
    match resource {
        ResourceSpec::ConfigMap(target) => {
            if target.name.trim().is_empty() {
                return Err(ReloaderError::ConfigError(
                    "property name not found or empty in configmap resource config".to_string(),
                ));
            }
            if target.file_name.trim().is_empty() {
                return Err(ReloaderError::ConfigError(
                    "property fileName not found or empty in configmap resource config".to_string(),
                ));
            }
        }
        ResourceSpec::MutatingWebhookConfiguration(target) => {
            if target.name.trim().is_empty() {
                return Err(ReloaderError::ConfigError(
                    "property name not found or empty in mutatingwebhookconfiguration resource config"
                        .to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Validate a configured reload endpoint URL
pub fn validate_reload_endpoint(endpoint: &str) -> Result<()> {
    Url::parse(endpoint)
        .map_err(|e| ReloaderError::ConfigError(format!("invalid reload endpoint {endpoint}: {e}")))?;
    Ok(())
}
