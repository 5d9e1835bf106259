// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Query pipeline: user text in, reply text out.
//!
//! One backend call per query. No retries and no caching, so identical
//! queries are always re-issued and the reply is a pure function of the
//! backend's response.

use crate::models::config::{SearchConfig, DEFAULT_RELATED_DOCUMENTS_HEADER};
use crate::models::search::{
    ContentSearchSpec, ExtractiveContentSpec, ModelSpec, SearchRequestSpec, SearchResponse,
    SummarySpec,
};
use crate::services::search::{serving_config_path, SearchBackend};
use anyhow::Result;
use std::sync::Arc;
use tracing::warn;

/// Documents requested per query
pub const PAGE_SIZE: u32 = 5;
/// Top results the summary is generated from
pub const SUMMARY_RESULT_COUNT: u32 = 5;
/// Extractive answers requested per document
pub const MAX_EXTRACTIVE_ANSWER_COUNT: u32 = 1;
/// Summarization model version
pub const SUMMARY_MODEL_VERSION: &str = "preview";
/// Reply body when the backend has no summary
pub const NO_RESULTS_TEXT: &str = "No relevant results found.";

/// Build the fixed-shape request for a query.
pub fn build_request(serving_config: &str, query: &str) -> SearchRequestSpec {
    SearchRequestSpec {
        serving_config: serving_config.to_string(),
        query: query.to_string(),
        page_size: PAGE_SIZE,
        content_search_spec: ContentSearchSpec {
            summary_spec: SummarySpec {
                summary_result_count: SUMMARY_RESULT_COUNT,
                ignore_non_summary_seeking_query: true,
                ignore_adversarial_query: true,
                model_spec: ModelSpec {
                    version: SUMMARY_MODEL_VERSION.to_string(),
                },
            },
            extractive_content_spec: ExtractiveContentSpec {
                max_extractive_answer_count: MAX_EXTRACTIVE_ANSWER_COUNT,
            },
        },
    }
}

/// Last `/`-separated segment of a link. A link without `/` is returned whole.
pub fn file_name(link: &str) -> &str {
    link.rsplit('/').next().unwrap_or(link)
}

/// Reduce a backend response to the reply text.
///
/// The summary (or [`NO_RESULTS_TEXT`]) comes first. If any result carries a
/// link, a blank line, `header` and one file name per line follow, in the
/// backend's order, without sorting or deduplication.
pub fn format_reply(response: &SearchResponse, header: &str) -> String {
    let mut reply = response
        .summary_text()
        .unwrap_or(NO_RESULTS_TEXT)
        .to_string();

    let file_names: Vec<&str> = response
        .results
        .iter()
        .filter_map(|result| {
            let link = result.link();
            if link.is_none() {
                warn!(id = ?result.id, "search result has no link, leaving it out of the reply");
            }
            link
        })
        .map(file_name)
        .collect();

    if !file_names.is_empty() {
        reply.push_str("\n\n");
        reply.push_str(header);
        reply.push('\n');
        reply.push_str(&file_names.join("\n"));
    }

    reply
}

/// Turns query text into reply text against one search backend.
#[derive(Clone)]
pub struct QueryPipeline {
    backend: Arc<dyn SearchBackend>,
    serving_config: String,
    related_documents_header: String,
}

impl QueryPipeline {
    pub fn new(backend: Arc<dyn SearchBackend>, config: &SearchConfig) -> Self {
        Self {
            backend,
            serving_config: serving_config_path(
                &config.project_id,
                &config.location,
                &config.data_store_id,
            ),
            related_documents_header: DEFAULT_RELATED_DOCUMENTS_HEADER.to_string(),
        }
    }

    /// Replace the header line of the related-documents section
    pub fn with_related_documents_header(mut self, header: impl Into<String>) -> Self {
        self.related_documents_header = header.into();
        self
    }

    pub fn serving_config(&self) -> &str {
        &self.serving_config
    }

    /// Search for `query` and format the reply.
    ///
    /// Empty queries are passed to the backend unchanged. Backend errors are
    /// returned to the caller as-is.
    pub async fn search(&self, query: &str) -> Result<String> {
        let request = build_request(&self.serving_config, query);
        let response = self.backend.search(&request).await?;
        Ok(format_reply(&response, &self.related_documents_header))
    }
}
