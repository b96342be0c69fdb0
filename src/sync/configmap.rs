// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ConfigMap syncer: keeps one data key of a ConfigMap equal to the fetched
//! file content.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{api::PostParams, Api, Client};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::{ConfigMapTarget, PodIdentity};
use crate::constants::USER_AGENT;
use crate::error::{ReloaderError, Result};
use crate::fetcher::Response;
use crate::sync::annotations::annotate_pod_with_config_hash;
use crate::sync::reload::trigger_reload;
use crate::sync::ConfigSyncer;

pub struct ConfigMapSyncer {
    client: Client,
    identity: PodIdentity,
    target: ConfigMapTarget,
    reload_endpoint: Option<String>,
    http: reqwest::Client,
}

impl ConfigMapSyncer {
    pub fn new(
        client: Client,
        identity: PodIdentity,
        target: ConfigMapTarget,
        reload_endpoint: Option<String>,
    ) -> Result<Self> {
        // A blank endpoint means no trigger is configured
        let reload_endpoint = reload_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(ConfigMapSyncer {
            client,
            identity,
            target,
            reload_endpoint,
            http,
        })
    }
}

#[async_trait]
impl ConfigSyncer for ConfigMapSyncer {
    async fn sync(&self, response: &Response) -> Result<()> {
        let configmaps: Api<ConfigMap> =
            Api::namespaced(self.client.clone(), &self.identity.namespace);
        let mut cm = configmaps.get(&self.target.name).await?;

        let fetched = String::from_utf8(response.file_data.clone()).map_err(|e| {
            ReloaderError::SyncError(format!(
                "fetched content for {} is not valid UTF-8: {e}",
                response.file_name
            ))
        })?;
        let current = cm
            .data
            .as_ref()
            .and_then(|d| d.get(&self.target.file_name))
            .map(String::as_str)
            .unwrap_or_default();

        if current == fetched {
            info!(config = %self.target.file_name, "config content matched, no change detected");
            return Ok(());
        }
        info!(config = %self.target.file_name, "config content mismatch found");

        cm.data
            .get_or_insert_with(BTreeMap::new)
            .insert(self.target.file_name.clone(), fetched.clone());
        configmaps
            .replace(&self.target.name, &PostParams::default(), &cm)
            .await?;
        info!(configmap = %self.target.name, "configmap updated");

        let config_hash = format!("{:x}", Sha256::digest(fetched.as_bytes()));
        debug!(config = %self.target.file_name, %config_hash, "computed config hash");

        annotate_pod_with_config_hash(
            &self.client,
            &self.identity,
            &self.target.file_name,
            &config_hash,
        )
        .await?;

        if let Some(endpoint) = &self.reload_endpoint {
            trigger_reload(&self.http, endpoint).await?;
        }
        Ok(())
    }
}
