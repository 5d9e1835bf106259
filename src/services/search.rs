// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::config::SearchConfig;
use crate::models::search::{SearchRequestSpec, SearchResponse};
use crate::services::credentials::AccessTokenSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Host of the Discovery Engine API
pub const SERVICE_HOST: &str = "discoveryengine.googleapis.com";

/// Serving config every query goes through
pub const DEFAULT_SERVING_CONFIG: &str = "default_config";

const API_VERSION: &str = "v1alpha";

/// A search backend that answers one structured request with one response.
///
/// Implementations must be usable from concurrent webhook handlers.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequestSpec) -> Result<SearchResponse>;
}

/// Resource name of the serving config for a data store.
pub fn serving_config_path(project: &str, location: &str, data_store: &str) -> String {
    format!(
        "projects/{}/locations/{}/dataStores/{}/servingConfigs/{}",
        project, location, data_store, DEFAULT_SERVING_CONFIG
    )
}

/// API host for a location. `global` uses the default endpoint, any other
/// location its regional one.
pub fn api_endpoint(location: &str) -> String {
    if location == "global" {
        SERVICE_HOST.to_string()
    } else {
        format!("{}-{}", location, SERVICE_HOST)
    }
}

/// Vertex AI Search (Discovery Engine) client over REST.
///
/// Holds a single pooled `reqwest::Client`, which is safe to share between
/// concurrent requests.
pub struct DiscoveryEngineClient {
    http: reqwest::Client,
    base_url: String,
    tokens: AccessTokenSource,
}

impl DiscoveryEngineClient {
    /// Create a client for the endpoint matching the configured location
    pub fn new(
        config: &SearchConfig,
        tokens: AccessTokenSource,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = format!("https://{}", api_endpoint(&config.location));
        Self::with_base_url(base_url, tokens, timeout)
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(
        base_url: impl Into<String>,
        tokens: AccessTokenSource,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn search_url(&self, serving_config: &str) -> String {
        format!(
            "{}/{}/{}:search",
            self.base_url, API_VERSION, serving_config
        )
    }
}

#[async_trait]
impl SearchBackend for DiscoveryEngineClient {
    async fn search(&self, request: &SearchRequestSpec) -> Result<SearchResponse> {
        let token = self
            .tokens
            .token()
            .await
            .context("Failed to obtain access token")?;

        let response = self
            .http
            .post(self.search_url(&request.serving_config))
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .context("Search request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Search backend returned {}: {}", status, body);
        }

        let search_response: SearchResponse = response
            .json()
            .await
            .context("Invalid search response")?;

        debug!(
            results = search_response.results.len(),
            has_summary = search_response.summary_text().is_some(),
            "search backend responded"
        );

        Ok(search_response)
    }
}
