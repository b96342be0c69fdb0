// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fetch abstraction: retrieve raw file content from a remote source.

use async_trait::async_trait;

use crate::error::Result;

/// The config content received from one fetch against a remote provider.
/// Created fresh every poll, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub file_name: String,
    pub file_data: Vec<u8>,
}

/// Implemented by every remote config provider
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self) -> Result<Response>;
}
