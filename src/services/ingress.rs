// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Webhook ingress: turns verified webhook events into replies.

use crate::models::line::{TextMessageEvent, WebhookEvent};
use crate::services::line::ReplySender;
use crate::services::logging::{mask_token, preview};
use crate::services::pipeline::QueryPipeline;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info};

const LOG_PREVIEW_CHARS: usize = 40;

/// What happened to a single text message event.
///
/// Only logs and tests look at this. The webhook response is `200 OK`
/// whatever the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Reply was delivered
    Replied,
    /// Search backend failed; nothing was sent to the user
    SearchFailed,
    /// Reply was built but delivery failed
    DeliveryFailed,
}

/// Drives the query pipeline for inbound events and hands replies to the
/// delivery client.
#[derive(Clone)]
pub struct WebhookIngress {
    pipeline: QueryPipeline,
    replier: Arc<dyn ReplySender>,
}

impl WebhookIngress {
    pub fn new(pipeline: QueryPipeline, replier: Arc<dyn ReplySender>) -> Self {
        Self { pipeline, replier }
    }

    /// Handle every answerable event of one webhook delivery.
    ///
    /// Text message events run concurrently; everything else is skipped.
    /// Failures are logged here and never reach the caller. The returned
    /// outcomes, one per text event in delivery order, are informational.
    pub async fn dispatch(&self, events: Vec<WebhookEvent>) -> Vec<EventOutcome> {
        let total = events.len();
        let messages: Vec<TextMessageEvent> = events
            .into_iter()
            .filter_map(WebhookEvent::into_text_message)
            .collect();

        if messages.len() < total {
            debug!(
                skipped = total - messages.len(),
                "ignoring events that are not text messages"
            );
        }

        join_all(messages.into_iter().map(|m| self.handle_text_message(m))).await
    }

    /// Search for the message text and reply with the result.
    ///
    /// Exactly one delivery attempt is made when the search succeeds, none when
    /// it fails. The user gets no message on search failure.
    pub async fn handle_text_message(&self, event: TextMessageEvent) -> EventOutcome {
        let reply_token = mask_token(&event.reply_token);
        debug!(
            reply_token = %reply_token,
            query = %preview(&event.text, LOG_PREVIEW_CHARS),
            "handling text message"
        );

        let reply = match self.pipeline.search(&event.text).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(reply_token = %reply_token, error = %format!("{e:#}"), "search failed, no reply sent");
                return EventOutcome::SearchFailed;
            }
        };

        match self.replier.reply(&event.reply_token, &reply).await {
            Ok(()) => {
                info!(reply_token = %reply_token, chars = reply.chars().count(), "reply delivered");
                EventOutcome::Replied
            }
            Err(e) => {
                error!(reply_token = %reply_token, error = %format!("{e:#}"), "failed to send reply message");
                EventOutcome::DeliveryFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::SearchConfig;
    use crate::models::line::{EventMessage, MessageEvent};
    use crate::models::search::{SearchRequestSpec, SearchResponse, SearchResult, Summary};
    use crate::services::search::SearchBackend;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubBackend {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SearchBackend for StubBackend {
        async fn search(&self, request: &SearchRequestSpec) -> Result<SearchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("deadline exceeded");
            }
            Ok(SearchResponse {
                results: vec![SearchResult::with_link("docs/faq.pdf")],
                summary: Some(Summary {
                    summary_text: format!("About {}", request.query),
                }),
            })
        }
    }

    #[derive(Default)]
    struct RecordingReplier {
        fail: bool,
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ReplySender for RecordingReplier {
        async fn reply(&self, reply_token: &str, text: &str) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((reply_token.to_string(), text.to_string()));
            if self.fail {
                anyhow::bail!("Messaging API returned 400 Bad Request");
            }
            Ok(())
        }
    }

    fn ingress(backend: Arc<StubBackend>, replier: Arc<RecordingReplier>) -> WebhookIngress {
        let config = SearchConfig {
            project_id: "p".to_string(),
            location: "global".to_string(),
            data_store_id: "d".to_string(),
            access_token: None,
        };
        let pipeline =
            QueryPipeline::new(backend, &config).with_related_documents_header("Sources:");
        WebhookIngress::new(pipeline, replier)
    }

    fn text_event(token: &str, text: &str) -> WebhookEvent {
        WebhookEvent::Message(MessageEvent {
            reply_token: Some(token.to_string()),
            message: EventMessage::Text {
                id: "1".to_string(),
                text: text.to_string(),
            },
        })
    }

    #[tokio::test]
    async fn test_text_message_gets_reply() {
        let backend = Arc::new(StubBackend {
            fail: false,
            calls: AtomicUsize::new(0),
        });
        let replier = Arc::new(RecordingReplier::default());
        let ingress = ingress(backend.clone(), replier.clone());

        let outcomes = ingress
            .dispatch(vec![text_event("token-1", "refunds")])
            .await;

        assert_eq!(outcomes, vec![EventOutcome::Replied]);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *replier.sent.lock().unwrap(),
            vec![(
                "token-1".to_string(),
                "About refunds\n\nSources:\nfaq.pdf".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_search_failure_sends_nothing() {
        let backend = Arc::new(StubBackend {
            fail: true,
            calls: AtomicUsize::new(0),
        });
        let replier = Arc::new(RecordingReplier::default());
        let ingress = ingress(backend.clone(), replier.clone());

        let outcomes = ingress.dispatch(vec![text_event("token-1", "q")]).await;

        assert_eq!(outcomes, vec![EventOutcome::SearchFailed]);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert!(replier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let backend = Arc::new(StubBackend {
            fail: false,
            calls: AtomicUsize::new(0),
        });
        let replier = Arc::new(RecordingReplier {
            fail: true,
            sent: Mutex::new(Vec::new()),
        });
        let ingress = ingress(backend, replier.clone());

        let outcomes = ingress.dispatch(vec![text_event("token-1", "q")]).await;

        assert_eq!(outcomes, vec![EventOutcome::DeliveryFailed]);
        // Attempted exactly once, never retried
        assert_eq!(replier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_non_text_events_are_skipped() {
        let backend = Arc::new(StubBackend {
            fail: false,
            calls: AtomicUsize::new(0),
        });
        let replier = Arc::new(RecordingReplier::default());
        let ingress = ingress(backend.clone(), replier.clone());

        let sticker = WebhookEvent::Message(MessageEvent {
            reply_token: Some("token-2".to_string()),
            message: EventMessage::Unsupported,
        });
        let outcomes = ingress
            .dispatch(vec![WebhookEvent::Unsupported, sticker])
            .await;

        assert!(outcomes.is_empty());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
        assert!(replier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_each_text_event_is_answered_independently() {
        let backend = Arc::new(StubBackend {
            fail: false,
            calls: AtomicUsize::new(0),
        });
        let replier = Arc::new(RecordingReplier::default());
        let ingress = ingress(backend.clone(), replier.clone());

        let outcomes = ingress
            .dispatch(vec![text_event("t1", "a"), text_event("t2", "b")])
            .await;

        assert_eq!(outcomes, vec![EventOutcome::Replied, EventOutcome::Replied]);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);

        let mut sent = replier.sent.lock().unwrap().clone();
        sent.sort();
        assert_eq!(sent[0].0, "t1");
        assert!(sent[0].1.starts_with("About a"));
        assert_eq!(sent[1].0, "t2");
        assert!(sent[1].1.starts_with("About b"));
    }
}
