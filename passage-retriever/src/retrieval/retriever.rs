//! Query-time retrieval: embed the query, rank stored chunks by distance.

use crate::error::{Result, RetrievalError};
use crate::retrieval::knn::{FlatL2Index, NearestNeighbors};
use crate::retrieval::vector_index::VectorIndex;
use passage_segment::Chunk;
use serde::Serialize;

/// A retrieved chunk with its diagnostic ranking information.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredChunk {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Squared L2 distance between the query and the chunk embedding.
    pub distance: f32,
    pub chunk: Chunk,
}

/// Maps a query onto the most relevant stored chunks.
///
/// The retriever consumes a fully built [`VectorIndex`] and only reads from
/// it, which makes the build-then-query phase switch explicit: once an index
/// is handed over, nothing can mutate it.
pub struct Retriever<S: NearestNeighbors = FlatL2Index> {
    index: VectorIndex<S>,
}

impl<S: NearestNeighbors> Retriever<S> {
    pub fn new(index: VectorIndex<S>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &VectorIndex<S> {
        &self.index
    }

    /// Retrieve the up-to-`k` most relevant chunks for `query`, most relevant
    /// first.
    ///
    /// The query is encoded with the same provider the index was built with;
    /// keeping that provider consistent across build and query time is the
    /// caller's responsibility, since mixed embedding spaces rank
    /// meaninglessly without anything here being able to notice.
    ///
    /// Returns [`RetrievalError::IndexNotBuilt`] when nothing has been
    /// indexed yet, without invoking the embedder or the search backend.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Chunk>> {
        Ok(self
            .retrieve_scored(query, k)
            .await?
            .into_iter()
            .map(|hit| hit.chunk)
            .collect())
    }

    /// Same retrieval as [`Retriever::retrieve`], additionally reporting each
    /// hit's rank and raw distance for diagnostics. Has no side effect on the
    /// index.
    pub async fn retrieve_scored(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        if self.index.is_empty() {
            return Err(RetrievalError::IndexNotBuilt);
        }

        let query_embedding = self.index.embedder().embed_text(query).await?;
        let hits = self.index.search(&query_embedding, k);

        // Sentinel or otherwise unmapped ids mean the backend had fewer than
        // k vectors; those slots are dropped, not errors.
        let scored: Vec<ScoredChunk> = hits
            .into_iter()
            .filter_map(|(vector_id, distance)| {
                self.index
                    .lookup(vector_id)
                    .map(|chunk| (distance, chunk.clone()))
            })
            .enumerate()
            .map(|(position, (distance, chunk))| ScoredChunk {
                rank: position + 1,
                distance,
                chunk,
            })
            .collect();

        for hit in &scored {
            tracing::debug!(
                rank = hit.rank,
                distance = hit.distance,
                filename = %hit.chunk.filename,
                chunk_index = hit.chunk.chunk_index,
                "retrieval hit"
            );
        }
        Ok(scored)
    }
}
