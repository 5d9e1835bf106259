// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! LINE Messaging API payloads: inbound webhook events and the reply request.

use serde::{Deserialize, Serialize};

/// Body of a webhook POST from the messaging platform.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Bot user ID the events were sent to
    #[serde(default)]
    pub destination: Option<String>,
    /// Empty for the console's "verify" ping
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// A single webhook event, tagged by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebhookEvent {
    Message(MessageEvent),
    /// follow, unfollow, postback, join, ... none of which we answer
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    /// Absent for events delivered while the channel is in standby mode
    #[serde(default)]
    pub reply_token: Option<String>,
    pub message: EventMessage,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventMessage {
    Text { id: String, text: String },
    #[serde(other)]
    Unsupported,
}

/// A text message event that should be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessageEvent {
    pub reply_token: String,
    pub text: String,
}

impl WebhookEvent {
    /// Returns the event as an answerable text message, if it is one.
    pub fn into_text_message(self) -> Option<TextMessageEvent> {
        match self {
            WebhookEvent::Message(MessageEvent {
                reply_token: Some(reply_token),
                message: EventMessage::Text { text, .. },
            }) => Some(TextMessageEvent { reply_token, text }),
            _ => None,
        }
    }
}

/// Body of `POST /v2/bot/message/reply`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMessageRequest {
    pub reply_token: String,
    pub messages: Vec<OutgoingMessage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutgoingMessage {
    Text { text: String },
}
