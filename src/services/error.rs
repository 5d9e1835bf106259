// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Rejections for inbound webhook requests.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("missing signature header")]
    MissingSignature,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("malformed webhook payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        // Client errors only; none of these are server faults
        warn!(error = %self, "rejected webhook request");
        let message = match self {
            WebhookError::MissingSignature | WebhookError::InvalidSignature => "Invalid signature",
            WebhookError::MalformedPayload(_) => "Malformed payload",
        };
        (StatusCode::BAD_REQUEST, message).into_response()
    }
}
