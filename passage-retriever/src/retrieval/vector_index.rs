//! Embedding-backed vector store with a vector-id to chunk mapping.
//!
//! [`VectorIndex`] pairs an injected [`EmbeddingProvider`] with a
//! [`NearestNeighbors`] backend and owns the mapping from row ids back to the
//! chunks they were embedded from. Ids are dense and sequential, so the
//! mapping is an arena-style `Vec<Chunk>` indexed by id rather than a sparse
//! map.
//!
//! `add_chunks` is the only mutator and the store never shrinks: the index is
//! built once, then queried.

use crate::error::{Result, RetrievalError};
use crate::retrieval::knn::{FlatL2Index, NearestNeighbors};
use passage_embed::EmbeddingProvider;
use passage_segment::Chunk;
use std::sync::Arc;

/// Append-only store of chunk embeddings plus chunk metadata.
///
/// Invariant: the chunk arena and the vector store always hold the same
/// number of entries, so every row id in `[0, ntotal)` resolves to a chunk.
pub struct VectorIndex<S: NearestNeighbors = FlatL2Index> {
    embedder: Arc<dyn EmbeddingProvider>,
    // Allocated lazily on the first add, once the provider has reported the
    // dimension it actually produces.
    index: Option<S>,
    chunks: Vec<Chunk>,
}

impl VectorIndex<FlatL2Index> {
    /// Build an index over the default exact flat backend.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_backend(embedder)
    }
}

impl<S: NearestNeighbors> VectorIndex<S> {
    /// Build an index over a caller-chosen search backend.
    pub fn with_backend(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            index: None,
            chunks: Vec::new(),
        }
    }

    /// Embed `chunks` in one batch call and append them to the store.
    ///
    /// All-or-nothing per call: every failure path returns before the store
    /// or the mapping is touched, so a failed batch commits nothing. Entries
    /// added by earlier calls are never mutated. An empty slice is a no-op.
    pub async fn add_chunks(&mut self, chunks: &[Chunk]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let batch = self.embedder.embed_texts(&texts).await?;

        if batch.len() != chunks.len() {
            return Err(RetrievalError::EmbeddingCountMismatch {
                expected: chunks.len(),
                got: batch.len(),
            });
        }
        if let Some(bad) = batch
            .embeddings
            .iter()
            .find(|embedding| embedding.len() != batch.dimension)
        {
            return Err(RetrievalError::DimensionMismatch {
                expected: batch.dimension,
                got: bad.len(),
            });
        }
        if let Some(index) = &self.index {
            if index.dimension() != batch.dimension {
                return Err(RetrievalError::DimensionMismatch {
                    expected: index.dimension(),
                    got: batch.dimension,
                });
            }
        }

        let index = self
            .index
            .get_or_insert_with(|| S::with_dimension(batch.dimension));
        index.add(&batch.embeddings);
        self.chunks.extend_from_slice(chunks);

        tracing::debug!(
            added = chunks.len(),
            total = self.chunks.len(),
            "indexed chunk batch"
        );
        Ok(())
    }

    /// Resolve a vector id back to its chunk.
    ///
    /// Unmapped ids yield `None`; that includes negative sentinel ids some
    /// search backends return for "no match", which is a normal boundary
    /// condition rather than an error.
    pub fn lookup(&self, vector_id: i64) -> Option<&Chunk> {
        usize::try_from(vector_id)
            .ok()
            .and_then(|id| self.chunks.get(id))
    }

    /// Total number of stored vectors (equal to the number of mapped chunks).
    pub fn ntotal(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The provider this index embeds with. Queries must go through the same
    /// provider to stay in the index's embedding space.
    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedder
    }

    /// The `k` nearest stored vectors to `query`, ascending distance.
    pub(crate) fn search(&self, query: &[f32], k: usize) -> Vec<(i64, f32)> {
        match &self.index {
            Some(index) => index.search(query, k),
            None => Vec::new(),
        }
    }
}
