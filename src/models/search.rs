// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};

/// Request body for the `:search` method of a serving config
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestSpec {
    /// Full resource name of the serving config
    pub serving_config: String,
    /// Free-text user query, passed through unchanged
    pub query: String,
    /// Number of documents to return
    pub page_size: u32,
    pub content_search_spec: ContentSearchSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSearchSpec {
    pub summary_spec: SummarySpec,
    pub extractive_content_spec: ExtractiveContentSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySpec {
    /// Number of top results the summary is generated from
    pub summary_result_count: u32,
    pub ignore_non_summary_seeking_query: bool,
    pub ignore_adversarial_query: bool,
    pub model_spec: ModelSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSpec {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractiveContentSpec {
    pub max_extractive_answer_count: u32,
}

/// Response of the `:search` method. Only the fields we read are modelled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub summary: Option<Summary>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub summary_text: String,
}

/// One matched document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub document: Option<Document>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub derived_struct_data: Option<DerivedStructData>,
}

/// Backend-supplied metadata for a document. Unstructured documents carry a
/// `link` to the source file (e.g. `gs://bucket/folder/file.pdf`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DerivedStructData {
    #[serde(default)]
    pub link: Option<String>,
}

impl SearchResponse {
    /// Summary text if the backend produced a non-empty one
    pub fn summary_text(&self) -> Option<&str> {
        self.summary
            .as_ref()
            .map(|s| s.summary_text.as_str())
            .filter(|s| !s.is_empty())
    }
}

impl SearchResult {
    pub fn link(&self) -> Option<&str> {
        self.document
            .as_ref()?
            .derived_struct_data
            .as_ref()?
            .link
            .as_deref()
    }
}

#[cfg(test)]
impl SearchResult {
    /// Result whose document links to `link`
    pub(crate) fn with_link(link: impl Into<String>) -> Self {
        Self {
            id: None,
            document: Some(Document {
                name: None,
                derived_struct_data: Some(DerivedStructData {
                    link: Some(link.into()),
                }),
            }),
        }
    }
}
