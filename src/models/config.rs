// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Process-wide configuration, read once at startup.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

/// Header line printed above the list of source documents in a reply.
pub const DEFAULT_RELATED_DOCUMENTS_HEADER: &str = "関連文書のパス:";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Immutable application configuration.
///
/// Built once in `main` and handed to the components that need it; nothing
/// reads the environment after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub line: LineConfig,
    pub search: SearchConfig,
    pub http_timeout: Duration,
    pub related_documents_header: String,
}

/// Messaging platform credentials.
#[derive(Debug, Clone)]
pub struct LineConfig {
    pub channel_access_token: String,
    pub channel_secret: String,
}

/// Location of the search backend's data store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub project_id: String,
    pub location: String,
    pub data_store_id: String,
    /// Static bearer token; when `None` the metadata server is asked per call.
    pub access_token: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty strings count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let require =
            |key: &str| get(key).ok_or_else(|| anyhow!("{key} environment variable must be set"));

        let http_timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a valid number")?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            line: LineConfig {
                channel_access_token: require("LINE_CHANNEL_ACCESS_TOKEN")?,
                channel_secret: require("LINE_CHANNEL_SECRET")?,
            },
            search: SearchConfig {
                project_id: require("GCP_PROJECT_ID")?,
                location: require("GCP_LOCATION")?,
                data_store_id: require("VAS_DATA_STORE_ID")?,
                access_token: get("GOOGLE_OAUTH_ACCESS_TOKEN"),
            },
            http_timeout: Duration::from_secs(http_timeout_secs),
            related_documents_header: get("RELATED_DOCUMENTS_HEADER")
                .unwrap_or_else(|| DEFAULT_RELATED_DOCUMENTS_HEADER.to_string()),
        })
    }
}
