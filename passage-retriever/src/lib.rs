//! passage-retriever: embedding-backed passage retrieval for answer generation
//!
//! This crate is the heart of a small retrieval-augmented answering pipeline:
//! documents are segmented into chunks (by `passage-segment`), embedded (by
//! `passage-embed`), stored in an in-memory vector index, and ranked against
//! incoming queries by L2 distance. The binary target wires the pieces into
//! an interactive query loop over a corpus directory.
//!
//! ## Key Modules
//!
//! - **[`retrieval`]**: The vector index, the flat k-NN backend, and the
//!   query-time retriever
//! - **[`loader`]**: Corpus directory loading (txt passthrough, csv
//!   flattening)
//! - **[`generation`]**: Answer generation over retrieved contexts
//! - **[`error`]**: Typed retrieval failure conditions
//!
//! ## Architecture
//!
//! ```text
//! Documents → Segmenter → Chunks → EmbeddingProvider → VectorIndex
//!                                                          ↓
//!                       Answer ← Generator ← Retriever ← query
//! ```
//!
//! The index lives only as long as the process: it is rebuilt from the corpus
//! at startup, and there is no persistence, deletion, or update path. Build
//! fully precedes querying; the [`retrieval::Retriever`] takes the index by
//! value to make that phase switch explicit.

pub mod error;
pub mod generation;
pub mod loader;
pub mod retrieval;

pub use error::{Result, RetrievalError};
