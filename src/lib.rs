// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod provider;
pub mod reloader;
pub mod sync;
pub mod watcher;

#[cfg(test)]
pub mod test_utils;
