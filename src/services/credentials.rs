// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Bearer tokens for Google Cloud APIs.

use anyhow::{Context, Result};
use gcp_auth::TokenProvider;
use std::sync::Arc;
use tracing::info;

/// OAuth scope covering the Discovery Engine API.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Where the search client gets its access token from.
#[derive(Clone)]
pub enum AccessTokenSource {
    /// Fixed token, typically from `gcloud auth print-access-token`
    Static(String),
    /// Application Default Credentials: a key file named by
    /// `GOOGLE_APPLICATION_CREDENTIALS`, gcloud user credentials, or the
    /// metadata server. Tokens are cached and refreshed by the provider.
    ApplicationDefault(Arc<dyn TokenProvider>),
}

impl AccessTokenSource {
    /// Static token if one is configured, Application Default Credentials
    /// otherwise. Fails when no credentials can be found.
    pub async fn discover(access_token: Option<&str>) -> Result<Self> {
        if let Some(token) = access_token {
            info!("using static access token for the search backend");
            return Ok(AccessTokenSource::Static(token.to_string()));
        }

        let provider = gcp_auth::provider()
            .await
            .context("No Google Cloud credentials found")?;
        info!("using application default credentials for the search backend");
        Ok(AccessTokenSource::ApplicationDefault(provider))
    }

    /// Current token. Called once per search; the provider only hits the
    /// network when its cached token is close to expiry.
    pub async fn token(&self) -> Result<String> {
        match self {
            AccessTokenSource::Static(token) => Ok(token.clone()),
            AccessTokenSource::ApplicationDefault(provider) => {
                let token = provider
                    .token(&[CLOUD_PLATFORM_SCOPE])
                    .await
                    .context("Failed to fetch access token")?;
                Ok(token.as_str().to_string())
            }
        }
    }
}

impl std::fmt::Debug for AccessTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessTokenSource::Static(_) => write!(f, "Static(***)"),
            AccessTokenSource::ApplicationDefault(_) => write!(f, "ApplicationDefault"),
        }
    }
}
