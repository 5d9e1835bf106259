// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, route handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router directly
//! without starting the full binary.

use crate::models::line::WebhookPayload;
use crate::models::version::VersionResponse;
use crate::services::error::WebhookError;
use crate::services::ingress::WebhookIngress;
use crate::services::signature::{SignatureVerifier, SIGNATURE_HEADER};
use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info};

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `LINE_VAS_BUILD` (see `build.rs`).
pub const VERSION: &str = env!("LINE_VAS_VERSION");

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub verifier: SignatureVerifier,
    pub ingress: WebhookIngress,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        agent: "line-vas".to_string(),
        version: VERSION.to_string(),
    })
}

/// Webhook endpoint.
///
/// The signature is checked against the raw body before anything is parsed.
/// Once it passes, the response is always `200 OK`, whatever happens to the
/// searches and replies, so the platform never redelivers the webhook.
pub async fn callback_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, WebhookError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingSignature)?;

    if !state.verifier.verify(&body, signature) {
        return Err(WebhookError::InvalidSignature);
    }

    let payload: WebhookPayload = serde_json::from_slice(&body)?;
    info!(
        events = payload.events.len(),
        bytes = body.len(),
        "received webhook"
    );
    debug!(destination = ?payload.destination, "webhook destination");

    state.ingress.dispatch(payload.events).await;

    Ok("OK")
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the Axum application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/version", get(version_handler))
        .route("/callback", post(callback_handler))
        .with_state(state)
}
