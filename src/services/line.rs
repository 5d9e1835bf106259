// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Reply delivery through the LINE Messaging API.

use crate::models::config::LineConfig;
use crate::models::line::{OutgoingMessage, ReplyMessageRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Public Messaging API endpoint
pub const LINE_API_BASE_URL: &str = "https://api.line.me";

/// Sends one text reply addressed by a reply token.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<()>;
}

/// Messaging API client. Long-lived and shared by all webhook handlers.
pub struct LineMessagingClient {
    http: reqwest::Client,
    base_url: String,
    channel_access_token: String,
}

impl LineMessagingClient {
    pub fn new(config: &LineConfig, timeout: Duration) -> Result<Self> {
        Self::with_base_url(LINE_API_BASE_URL, &config.channel_access_token, timeout)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        channel_access_token: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            channel_access_token: channel_access_token.to_string(),
        })
    }
}

#[async_trait]
impl ReplySender for LineMessagingClient {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<()> {
        let body = ReplyMessageRequest {
            reply_token: reply_token.to_string(),
            messages: vec![OutgoingMessage::Text {
                text: text.to_string(),
            }],
        };

        let response = self
            .http
            .post(format!("{}/v2/bot/message/reply", self.base_url))
            .bearer_auth(&self.channel_access_token)
            .json(&body)
            .send()
            .await
            .context("Reply request failed")?;

        let status = response.status();
        if !status.is_success() {
            // Error body is a JSON {"message": ...} explaining the rejection
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("Messaging API returned {}: {}", status, detail);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(server: &mockito::Server) -> LineMessagingClient {
        LineMessagingClient::with_base_url(server.url(), "channel-token", Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn test_reply_posts_text_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/bot/message/reply")
            .match_header("authorization", "Bearer channel-token")
            .match_body(Matcher::Json(json!({
                "replyToken": "reply-1",
                "messages": [{"type": "text", "text": "Summary.\n\nrelated document paths:\ndoc1.pdf"}]
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        client(&server)
            .reply("reply-1", "Summary.\n\nrelated document paths:\ndoc1.pdf")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_reply_rejected_token_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v2/bot/message/reply")
            .with_status(400)
            .with_body(r#"{"message":"Invalid reply token"}"#)
            .create_async()
            .await;

        let err = client(&server).reply("expired", "hi").await.unwrap_err();
        assert!(err.to_string().contains("Invalid reply token"));
    }
}
