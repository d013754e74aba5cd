//! Embedding provider implementations

use crate::config::EmbedConfig;
use crate::error::{EmbedError, Result};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::{Arc, Mutex};

/// Result of a batched embedding call.
#[derive(Debug, Clone)]
pub struct EmbeddingBatch {
    /// The generated embeddings, one per input text, in input order
    pub embeddings: Vec<Vec<f32>>,
    /// The dimension of each embedding vector
    pub dimension: usize,
}

impl EmbeddingBatch {
    /// Create a batch from generated vectors; the dimension is inferred from
    /// the first vector (0 for an empty batch).
    pub fn new(embeddings: Vec<Vec<f32>>) -> Self {
        let dimension = embeddings.first().map(|e| e.len()).unwrap_or(0);
        Self {
            embeddings,
            dimension,
        }
    }

    /// Number of embedding vectors in this batch.
    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    /// Returns `true` if the batch contains no vectors.
    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }
}

/// Trait for embedding providers that can generate embeddings from text.
///
/// Providers are first-class injected objects, never process-wide singletons,
/// so tests can swap in deterministic stubs. A provider's output is
/// deterministic for a fixed configuration and its dimension is fixed per
/// instance.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts (batched, order-preserving)
    async fn embed_texts(&self, texts: &[String]) -> Result<EmbeddingBatch>;

    /// Get the dimension of embeddings produced by this provider
    fn embedding_dimension(&self) -> usize;

    /// Get the name/identifier of this provider
    fn provider_name(&self) -> &str;
}

/// FastEmbed-based embedding provider using the built-in ONNX models.
#[derive(Clone)]
pub struct FastEmbedProvider {
    config: EmbedConfig,
    model: Arc<Mutex<TextEmbedding>>,
    dimension: usize,
}

impl std::fmt::Debug for FastEmbedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedProvider")
            .field("config", &self.config)
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl FastEmbedProvider {
    /// Load the configured model and return a ready provider.
    ///
    /// The model is loaded on the blocking thread pool; the call blocks until
    /// loading finishes and the dimension has been probed with a test
    /// embedding.
    pub async fn create(config: EmbedConfig) -> Result<Self> {
        let model_kind = Self::model_kind(&config)?;
        let model_name = config.model_name().to_string();

        let (model, dimension) =
            tokio::task::spawn_blocking(move || -> Result<(TextEmbedding, usize)> {
                tracing::info!("Loading embedding model: {}", model_name);

                let init_options =
                    InitOptions::new(model_kind).with_show_download_progress(true);
                let mut model = TextEmbedding::try_new(init_options)
                    .map_err(initialization_error)?;

                // Probe the dimension with a test embedding
                let test_embeddings = model
                    .embed(vec!["test".to_string()], None)
                    .map_err(initialization_error)?;
                let dimension = test_embeddings.first().map(|emb| emb.len()).unwrap_or(0);
                if dimension == 0 {
                    return Err(EmbedError::invalid_config(
                        "model produced an empty test embedding",
                    ));
                }

                tracing::info!("Model loaded successfully. Dimension: {}", dimension);
                Ok((model, dimension))
            })
            .await??;

        Ok(Self {
            config,
            model: Arc::new(Mutex::new(model)),
            dimension,
        })
    }

    /// Map a configured model name onto a built-in fastembed model.
    fn model_kind(config: &EmbedConfig) -> Result<EmbeddingModel> {
        match config.model_name() {
            "all-MiniLM-L6-v2" => Ok(EmbeddingModel::AllMiniLML6V2),
            "all-MiniLM-L12-v2" => Ok(EmbeddingModel::AllMiniLML12V2),
            "bge-small-en-v1.5" => Ok(EmbeddingModel::BGESmallENV15),
            other => Err(EmbedError::invalid_config(format!(
                "unknown embedding model: {other}"
            ))),
        }
    }

    fn normalize_in_place(embedding: &mut [f32]) {
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in embedding {
                *value /= norm;
            }
        }
    }
}

fn initialization_error(source: anyhow::Error) -> EmbedError {
    EmbedError::ModelInitialization {
        source: source.into(),
    }
}

fn generation_error(source: anyhow::Error) -> EmbedError {
    EmbedError::EmbeddingGeneration {
        source: source.into(),
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let texts = vec![text.to_string()];
        let result = self.embed_texts(&texts).await?;
        result
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| EmbedError::EmbeddingGeneration {
                source: "no embedding generated for text".into(),
            })
    }

    async fn embed_texts(&self, texts: &[String]) -> Result<EmbeddingBatch> {
        if texts.is_empty() {
            return Ok(EmbeddingBatch::new(vec![]));
        }

        tracing::debug!("Generating embeddings for {} texts", texts.len());

        let mut all_embeddings = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.config.batch_size.max(1)) {
            let chunk = chunk.to_vec();
            let model_clone = Arc::clone(&self.model);

            let mut batch_embeddings =
                tokio::task::spawn_blocking(move || -> Result<Vec<Vec<f32>>> {
                    tracing::debug!("Processing batch of {} texts", chunk.len());

                    let mut model_guard = model_clone.lock().unwrap();
                    model_guard.embed(chunk, None).map_err(generation_error)
                })
                .await??;

            if self.config.normalize {
                for embedding in &mut batch_embeddings {
                    Self::normalize_in_place(embedding);
                }
            }
            all_embeddings.extend(batch_embeddings);
        }

        tracing::debug!("Generated {} embeddings", all_embeddings.len());
        Ok(EmbeddingBatch::new(all_embeddings))
    }

    fn embedding_dimension(&self) -> usize {
        self.dimension
    }

    fn provider_name(&self) -> &str {
        "fastembed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_batch() {
        let embeddings = vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]];
        let batch = EmbeddingBatch::new(embeddings);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.dimension, 3);
        assert!(!batch.is_empty());
    }

    #[test]
    fn test_empty_embedding_batch() {
        let batch = EmbeddingBatch::new(vec![]);
        assert_eq!(batch.len(), 0);
        assert_eq!(batch.dimension, 0);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let config = EmbedConfig::new("not-a-real-model");
        let err = FastEmbedProvider::model_kind(&config).unwrap_err();
        assert!(matches!(err, EmbedError::InvalidConfig { .. }));
    }

    #[test]
    fn test_normalize_in_place() {
        let mut embedding = vec![3.0, 4.0];
        FastEmbedProvider::normalize_in_place(&mut embedding);
        assert!((embedding[0] - 0.6).abs() < 1e-6);
        assert!((embedding[1] - 0.8).abs() < 1e-6);

        // The zero vector stays untouched instead of dividing by zero.
        let mut zero = vec![0.0, 0.0];
        FastEmbedProvider::normalize_in_place(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0]);
    }

    #[tokio::test]
    #[ignore] // Integration test: downloads the real MiniLM model - run with: cargo test test_minilm_embedding -- --ignored
    async fn test_minilm_embedding() -> Result<()> {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();

        let provider = FastEmbedProvider::create(EmbedConfig::default()).await?;
        assert_eq!(provider.provider_name(), "fastembed");
        assert_eq!(provider.embedding_dimension(), 384);

        let texts = vec![
            "Machine learning models process natural language.".to_string(),
            "Deep neural networks enable semantic understanding.".to_string(),
        ];
        let batch = provider.embed_texts(&texts).await?;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.dimension, 384);
        for embedding in &batch.embeddings {
            assert!(embedding.iter().any(|&x| x != 0.0));
            assert!(embedding.iter().all(|&x| x.is_finite()));
            // Normalization leaves unit-length vectors.
            let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-3);
        }

        Ok(())
    }
}
