//! # passage-embed
//!
//! Text embedding for passage retrieval, built on local ONNX models via
//! fastembed. The crate exposes a small async [`EmbeddingProvider`] trait so
//! the rest of the system treats embedding as an opaque
//! `text -> fixed-length vector` capability, with [`FastEmbedProvider`] as the
//! production implementation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use passage_embed::{EmbedConfig, EmbeddingProvider, FastEmbedProvider};
//!
//! # async fn example() -> passage_embed::Result<()> {
//! let provider = FastEmbedProvider::create(EmbedConfig::default()).await?;
//!
//! let texts = vec!["Hello world".to_string(), "How are you?".to_string()];
//! let batch = provider.embed_texts(&texts).await?;
//!
//! println!("Generated {} embeddings of dimension {}", batch.len(), batch.dimension);
//! # Ok(())
//! # }
//! ```
//!
//! ## Embedding-space consistency
//!
//! Vectors are only comparable when produced by the same model configuration.
//! Index-build and query time must share one provider instance (or equal
//! configs); mixing models silently produces meaningless rankings, and no
//! layer below this one can detect it.

pub mod config;
pub mod error;
pub mod provider;

// Re-export main types for easy access
pub use config::{DEFAULT_MODEL_NAME, EmbedConfig};
pub use error::{EmbedError, Result};
pub use provider::{EmbeddingBatch, EmbeddingProvider, FastEmbedProvider};
