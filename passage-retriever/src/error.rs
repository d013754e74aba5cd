//! Error types for index construction and retrieval.

use passage_embed::EmbedError;

/// Result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Failure conditions reported by the vector index and the retriever.
///
/// All of these are local and recoverable by the caller (retry, re-embed, or
/// reduce `k`); nothing here is fatal to the hosting process.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// A query arrived before any chunks were added to the index.
    #[error("no chunks have been indexed yet")]
    IndexNotBuilt,

    /// The embedding provider failed for a batch; nothing was committed.
    #[error("embedding failed: {source}")]
    Embedding {
        #[from]
        source: EmbedError,
    },

    /// The provider returned a different number of vectors than input texts.
    #[error("embedder returned {got} vectors for {expected} texts")]
    EmbeddingCountMismatch { expected: usize, got: usize },

    /// An embedding's dimension disagrees with the store's dimension.
    #[error("expected embedding dimension {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
