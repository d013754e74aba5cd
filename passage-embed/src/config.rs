//! Configuration for embedding providers.

use serde::{Deserialize, Serialize};

/// Default embedding model, a small general-purpose sentence encoder.
pub const DEFAULT_MODEL_NAME: &str = "all-MiniLM-L6-v2";

/// Configuration for an embedding provider.
///
/// The model name selects one of the built-in fastembed models; an unknown
/// name is rejected when the provider is created, not silently defaulted.
/// Two providers built from equal configs embed identically, so the same
/// config must be used at index-build time and query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Model identifier, e.g. "all-MiniLM-L6-v2".
    pub model_name: String,
    /// Number of texts embedded per inner batch.
    pub batch_size: usize,
    /// Whether embeddings are L2-normalized after generation.
    pub normalize: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            batch_size: 16,
            normalize: true,
        }
    }
}

impl EmbedConfig {
    /// Create a config for the named model with default batching.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Default::default()
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}
