// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Git-backed remote provider, reading one file at a ref through the hosted
//! Git content API.

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::config::GitConfig;
use crate::constants::{GIT_API_BASE_URL, GIT_DEFAULT_PULL_INTERVAL, USER_AGENT};
use crate::error::{ReloaderError, Result};
use crate::fetcher::{Fetch, Response};
use crate::provider::{validate_git_config, RemoteProvider};

/// File content payload of the Git content API
#[derive(Debug, Deserialize)]
struct RepositoryContent {
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl RepositoryContent {
    /// Decode the transport-level encoding of the file content. The content
    /// API wraps base64 at 60 columns, so embedded newlines are stripped
    /// before decoding.
    fn decoded(&self) -> Result<Vec<u8>> {
        match self.encoding.as_deref() {
            Some("base64") => {
                let raw: String = self
                    .content
                    .as_deref()
                    .unwrap_or_default()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                general_purpose::STANDARD.decode(raw).map_err(|e| {
                    ReloaderError::FetchError(format!("malformed base64 file content: {e}"))
                })
            }
            other => Err(ReloaderError::FetchError(format!(
                "unsupported content encoding {:?}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

/// Remote provider fetching a single file from a Git repository
pub struct GitProvider {
    git: GitConfig,
    base_url: String,
    client: reqwest::Client,
}

impl GitProvider {
    /// Create a provider for the given git config. Validates the config and
    /// sets up the HTTP client once: authenticated when an access token is
    /// required, anonymous otherwise.
    pub fn new(git: GitConfig) -> Result<Self> {
        Self::with_base_url(git, GIT_API_BASE_URL)
    }

    /// Like [`GitProvider::new`] but against a different content API host
    pub fn with_base_url(git: GitConfig, base_url: &str) -> Result<Self> {
        validate_git_config(&git)?;

        let mut headers = HeaderMap::new();
        if git.auth_required {
            let mut auth = HeaderValue::from_str(&format!("Bearer {}", git.access_token))
                .map_err(|e| ReloaderError::ConfigError(format!("invalid access token: {e}")))?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(GitProvider {
            git,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn content_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url, self.git.owner, self.git.repo, self.git.file_path
        )
    }
}

#[async_trait]
impl Fetch for GitProvider {
    async fn fetch(&self) -> Result<Response> {
        let url = self.content_url();
        debug!(%url, git_ref = %self.git.git_ref, "fetching config from git");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github.v3+json");
        if !self.git.git_ref.is_empty() {
            request = request.query(&[("ref", self.git.git_ref.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReloaderError::FetchError(format!(
                "content request for {} returned {status}: {body}",
                self.git.file_path
            )));
        }

        let content: RepositoryContent = response.json().await?;
        let file_data = content.decoded()?;
        let file_name = Path::new(&self.git.file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.git.file_path.clone());

        Ok(Response {
            file_name,
            file_data,
        })
    }
}

impl RemoteProvider for GitProvider {
    fn pull_interval(&self) -> Option<&str> {
        Some(&self.git.pull_interval)
    }

    fn default_pull_interval(&self) -> Duration {
        GIT_DEFAULT_PULL_INTERVAL
    }
}
