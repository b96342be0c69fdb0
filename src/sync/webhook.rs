// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! MutatingWebhookConfiguration syncer. The fetched manifest is a full
//! resource document, but only the first webhook's object and namespace
//! selectors are authoritative; everything else on the live object is
//! preserved untouched.

use async_trait::async_trait;
use k8s_openapi::api::admissionregistration::v1::MutatingWebhookConfiguration;
use kube::{api::PostParams, Api, Client};
use tracing::{debug, info};

use crate::config::WebhookTarget;
use crate::error::{ReloaderError, Result};
use crate::fetcher::Response;
use crate::sync::ConfigSyncer;

pub struct MutatingWebhookSyncer {
    client: Client,
    target: WebhookTarget,
}

impl MutatingWebhookSyncer {
    pub fn new(client: Client, target: WebhookTarget) -> Self {
        MutatingWebhookSyncer { client, target }
    }
}

#[async_trait]
impl ConfigSyncer for MutatingWebhookSyncer {
    async fn sync(&self, response: &Response) -> Result<()> {
        let api: Api<MutatingWebhookConfiguration> = Api::all(self.client.clone());
        let mut live = api.get(&self.target.name).await?;

        let desired: MutatingWebhookConfiguration = serde_yaml::from_slice(&response.file_data)?;
        let desired_hook = desired
            .webhooks
            .as_ref()
            .and_then(|hooks| hooks.first())
            .ok_or_else(|| {
                ReloaderError::SyncError(format!(
                    "fetched manifest for {} has no webhook entries",
                    self.target.name
                ))
            })?;

        let mut update_required = false;
        {
            let live_hook = live
                .webhooks
                .as_mut()
                .and_then(|hooks| hooks.first_mut())
                .ok_or_else(|| {
                    ReloaderError::SyncError(format!(
                        "live MutatingWebhookConfiguration {} has no webhook entries",
                        self.target.name
                    ))
                })?;

            if desired_hook.object_selector != live_hook.object_selector {
                debug!(selector = ?desired_hook.object_selector, "change is detected in the objectSelector");
                live_hook.object_selector = desired_hook.object_selector.clone();
                update_required = true;
            }
            if desired_hook.namespace_selector != live_hook.namespace_selector {
                debug!(selector = ?desired_hook.namespace_selector, "change is detected in the namespaceSelector");
                live_hook.namespace_selector = desired_hook.namespace_selector.clone();
                update_required = true;
            }
        }

        if update_required {
            api.replace(&self.target.name, &PostParams::default(), &live)
                .await?;
            info!(name = %self.target.name, "MutatingWebhookConfiguration is updated");
        } else {
            info!(name = %self.target.name, "MutatingWebhookConfiguration content is matched, no change is detected");
        }
        Ok(())
    }
}
