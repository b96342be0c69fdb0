// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Remote provider abstraction and provider-config validation.

pub mod git;

pub use git::GitProvider;

use regex::Regex;
use std::time::Duration;

use crate::config::GitConfig;
use crate::error::{ReloaderError, Result};
use crate::fetcher::Fetch;

/// A remote config source polled on an interval. Implementations carry their
/// own static configuration and hold no state across fetches.
pub trait RemoteProvider: Fetch {
    /// Pull interval string from the binding, if configured
    fn pull_interval(&self) -> Option<&str>;

    /// Interval used when the binding does not configure one
    fn default_pull_interval(&self) -> Duration;

    /// Effective interval, resolved once at watch start. A zero interval
    /// would make the watch loop spin, so it falls back to the default just
    /// like an unset one.
    fn effective_pull_interval(&self) -> Result<Duration> {
        match self.pull_interval() {
            Some(s) if !s.trim().is_empty() => {
                let parsed = parse_duration(s)?;
                if parsed.is_zero() {
                    Ok(self.default_pull_interval())
                } else {
                    Ok(parsed)
                }
            }
            _ => Ok(self.default_pull_interval()),
        }
    }
}

/// Parse a Go-style duration string such as "20s", "5m" or "1m30s".
/// Supported units: ms, s, m, h, d.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ReloaderError::InvalidPullInterval(
            "duration string is empty".to_string(),
        ));
    }

    let segment = Regex::new(r"(\d+)(ms|s|m|h|d)").expect("valid duration regex");
    let mut total = Duration::ZERO;
    let mut consumed = 0;

    for caps in segment.captures_iter(trimmed) {
        let all = caps.get(0).expect("whole match");
        if all.start() != consumed {
            return Err(ReloaderError::InvalidPullInterval(format!(
                "invalid duration format '{trimmed}'"
            )));
        }
        consumed = all.end();

        let value: u64 = caps[1].parse().map_err(|_| {
            ReloaderError::InvalidPullInterval(format!("invalid duration format '{trimmed}'"))
        })?;
        total += match &caps[2] {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value * 60),
            "h" => Duration::from_secs(value * 3600),
            "d" => Duration::from_secs(value * 86400),
            _ => unreachable!(),
        };
    }

    if consumed != trimmed.len() {
        return Err(ReloaderError::InvalidPullInterval(format!(
            "invalid duration format '{trimmed}'"
        )));
    }
    Ok(total)
}

/// Validate a git provider config. Called both during the up-front config
/// validation and when the provider is constructed.
pub fn validate_git_config(git: &GitConfig) -> Result<()> {
    if git.owner.trim().is_empty() {
        return Err(ReloaderError::ConfigError(
            "repo owner must not be empty".to_string(),
        ));
    }
    if git.repo.trim().is_empty() {
        return Err(ReloaderError::ConfigError(
            "repo name must not be empty".to_string(),
        ));
    }
    if git.file_path.trim().is_empty() {
        return Err(ReloaderError::ConfigError(
            "file path must not be empty".to_string(),
        ));
    }
    if git.auth_required && git.access_token.trim().is_empty() {
        return Err(ReloaderError::ConfigError(
            "auth token must not be empty".to_string(),
        ));
    }
    if !git.pull_interval.trim().is_empty() {
        parse_duration(&git.pull_interval)?;
    }
    Ok(())
}
