// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Orchestrator: validates the reload configuration, builds one
//! provider/syncer pair per enabled binding and runs a watch task for each.

use futures::future::join_all;
use kube::Client;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::{PodIdentity, ReloaderConfig};
use crate::error::Result;
use crate::provider::{validate_git_config, GitProvider, RemoteProvider};
use crate::sync::{create_syncer, validate_reload_endpoint, validate_resource, ConfigSyncer};
use crate::watcher::watch;

pub struct Reloader {
    config: ReloaderConfig,
    client: Client,
    identity: PodIdentity,
}

impl Reloader {
    pub fn new(config: ReloaderConfig, client: Client, identity: PodIdentity) -> Self {
        Reloader {
            config,
            client,
            identity,
        }
    }

    /// Validate the configuration, start one watch task per enabled binding
    /// and block until every task has exited after cancellation. Any
    /// validation or construction failure aborts before a single task runs.
    pub async fn run(&self, token: CancellationToken) -> Result<()> {
        validate(&self.config)?;

        let mut pairs: Vec<(Box<dyn RemoteProvider>, Box<dyn ConfigSyncer>)> = Vec::new();
        for binding in &self.config.reloaders {
            let Some(git) = binding.provider.as_ref().and_then(|p| p.git.as_ref()) else {
                debug!("binding has no provider configured, skipping");
                continue;
            };
            if git.disabled {
                info!(owner = %git.owner, repo = %git.repo, "git provider is disabled, skipping");
                continue;
            }

            info!(
                owner = %git.owner,
                repo = %git.repo,
                filepath = %git.file_path,
                "found git provider config"
            );
            let provider = GitProvider::new(git.clone())?;
            let syncer = create_syncer(binding, self.client.clone(), self.identity.clone())?;
            pairs.push((Box::new(provider), syncer));
        }

        let handles: Vec<_> = pairs
            .into_iter()
            .map(|(provider, syncer)| tokio::spawn(watch(token.clone(), provider, syncer)))
            .collect();

        for joined in join_all(handles).await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!(error = %e, "watch task failed"),
                Err(e) => error!(error = %e, "watch task panicked"),
            }
        }
        debug!("all watch tasks returned");
        info!("shutting down all watchers");
        Ok(())
    }
}

/// Validate every binding of the reload configuration. A single invalid
/// binding fails the whole startup.
pub fn validate(config: &ReloaderConfig) -> Result<()> {
    for binding in &config.reloaders {
        if let Some(git) = binding.provider.as_ref().and_then(|p| p.git.as_ref()) {
            validate_git_config(git)?;
        }
        validate_resource(&binding.resource)?;
        if let Some(endpoint) = binding.reload_endpoint.as_deref() {
            if !endpoint.trim().is_empty() {
                validate_reload_endpoint(endpoint)?;
            }
        }
    }
    Ok(())
}
