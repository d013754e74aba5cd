//! Deterministic embedding stubs shared by the retrieval unit tests.
//!
//! The search backend and the real embedding model are non-deterministic
//! black boxes from the tests' point of view, so ranking assertions are made
//! against stubs with fixed, known vectors instead.

use async_trait::async_trait;
use passage_embed::{EmbedError, EmbeddingBatch, EmbeddingProvider};
use std::collections::HashMap;

/// Embedder with a fixed text-to-vector table; unknown texts are an error.
pub(crate) struct StaticEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

impl StaticEmbedder {
    pub(crate) fn new(entries: &[(&str, &[f32])]) -> Self {
        let dimension = entries.first().map(|(_, v)| v.len()).unwrap_or(0);
        Self {
            vectors: entries
                .iter()
                .map(|(text, vector)| (text.to_string(), vector.to_vec()))
                .collect(),
            dimension,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for StaticEmbedder {
    async fn embed_text(&self, text: &str) -> passage_embed::Result<Vec<f32>> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| EmbedError::invalid_config(format!("no stub vector for {text:?}")))
    }

    async fn embed_texts(&self, texts: &[String]) -> passage_embed::Result<EmbeddingBatch> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed_text(text).await?);
        }
        Ok(EmbeddingBatch::new(embeddings))
    }

    fn embedding_dimension(&self) -> usize {
        self.dimension
    }

    fn provider_name(&self) -> &str {
        "static-stub"
    }
}

/// Embedder that fails every call, for all-or-nothing tests.
pub(crate) struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed_text(&self, _text: &str) -> passage_embed::Result<Vec<f32>> {
        Err(EmbedError::invalid_config("stub embedder always fails"))
    }

    async fn embed_texts(&self, _texts: &[String]) -> passage_embed::Result<EmbeddingBatch> {
        Err(EmbedError::invalid_config("stub embedder always fails"))
    }

    fn embedding_dimension(&self) -> usize {
        2
    }

    fn provider_name(&self) -> &str {
        "failing-stub"
    }
}

/// Embedder that reports success but returns one vector fewer than requested,
/// to exercise the batch-count check.
pub(crate) struct TruncatingEmbedder;

#[async_trait]
impl EmbeddingProvider for TruncatingEmbedder {
    async fn embed_text(&self, _text: &str) -> passage_embed::Result<Vec<f32>> {
        Ok(vec![0.0, 0.0])
    }

    async fn embed_texts(&self, texts: &[String]) -> passage_embed::Result<EmbeddingBatch> {
        let truncated = texts.len().saturating_sub(1);
        Ok(EmbeddingBatch::new(vec![vec![0.0, 0.0]; truncated]))
    }

    fn embedding_dimension(&self) -> usize {
        2
    }

    fn provider_name(&self) -> &str {
        "truncating-stub"
    }
}
