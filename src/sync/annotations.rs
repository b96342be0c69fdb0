// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod fingerprint annotations for downstream change detection.

use chrono::Utc;
use k8s_openapi::api::core::v1::Pod;
use kube::{api::PostParams, Api, Client};
use std::collections::BTreeMap;
use tracing::info;

use crate::config::PodIdentity;
use crate::constants::annotations;
use crate::error::Result;

/// Record the digest of newly synced content on the designated pod, together
/// with a last-modified timestamp.
pub async fn annotate_pod_with_config_hash(
    client: &Client,
    identity: &PodIdentity,
    file_name: &str,
    config_hash: &str,
) -> Result<()> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), &identity.namespace);
    let mut pod = pods.get(&identity.name).await?;

    let pod_annotations = pod.metadata.annotations.get_or_insert_with(BTreeMap::new);
    pod_annotations.insert(annotations::config_hash(file_name), config_hash.to_string());
    pod_annotations.insert(
        annotations::last_modified(file_name),
        Utc::now().to_rfc3339(),
    );

    pods.replace(&identity.name, &PostParams::default(), &pod)
        .await?;
    info!(pod = %identity.name, "annotation is added to the pod");
    Ok(())
}
