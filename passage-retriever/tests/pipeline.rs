//! End-to-end pipeline test: load a corpus directory, segment it, index the
//! chunks, and retrieve against a query — with a deterministic stub embedding
//! provider standing in for the real model.

use async_trait::async_trait;
use passage_embed::{EmbedError, EmbeddingBatch, EmbeddingProvider};
use passage_retriever::RetrievalError;
use passage_retriever::loader::load_documents;
use passage_retriever::retrieval::{Retriever, VectorIndex};
use passage_segment::Segmenter;
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed text-to-vector table; unknown texts are an error so a drifting chunk
/// boundary fails loudly instead of silently shifting the ranking.
struct TableEmbedder {
    vectors: HashMap<String, Vec<f32>>,
}

impl TableEmbedder {
    fn new(entries: &[(&str, [f32; 2])]) -> Self {
        Self {
            vectors: entries
                .iter()
                .map(|(text, vector)| (text.to_string(), vector.to_vec()))
                .collect(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for TableEmbedder {
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
        2
    }

    fn provider_name(&self) -> &str {
        "table-stub"
    }
}

#[tokio::test]
async fn test_pipeline_retrieves_related_chunks() -> anyhow::Result<()> {
    let corpus = tempfile::tempdir()?;
    std::fs::write(corpus.path().join("cats.txt"), "Cats are mammals.")?;
    std::fs::write(corpus.path().join("dogs.txt"), "Dogs are mammals.")?;
    std::fs::write(corpus.path().join("space.txt"), "Stars are far away.")?;

    let documents = load_documents(corpus.path())?;
    assert_eq!(documents.len(), 3);

    let segmenter = Segmenter::default();
    let mut chunks = Vec::new();
    for document in &documents {
        chunks.extend(segmenter.segment(&document.text, &document.filename));
    }
    assert_eq!(chunks.len(), 3);
    assert!(chunks.iter().all(|chunk| chunk.chunk_index == 0));

    let embedder = Arc::new(TableEmbedder::new(&[
        ("Cats are mammals.", [1.0, 0.0]),
        ("Dogs are mammals.", [0.9, 0.1]),
        ("Stars are far away.", [0.0, 1.0]),
        ("tell me about pets", [1.0, 0.05]),
    ]));
    let mut index = VectorIndex::new(embedder);
    index.add_chunks(&chunks).await?;
    assert_eq!(index.ntotal(), 3);

    let retriever = Retriever::new(index);
    let results = retriever.retrieve("tell me about pets", 2).await?;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|chunk| chunk.text.contains("mammals")));
    // The contexts handed to generation are the chunk texts in ranking order.
    let contexts: Vec<String> = results.into_iter().map(|chunk| chunk.text).collect();
    assert_eq!(contexts[0], "Cats are mammals.");
    assert_eq!(contexts[1], "Dogs are mammals.");

    Ok(())
}

#[tokio::test]
async fn test_pipeline_with_empty_corpus_reports_index_not_built() -> anyhow::Result<()> {
    let corpus = tempfile::tempdir()?;

    let documents = load_documents(corpus.path())?;
    assert!(documents.is_empty());

    let index = VectorIndex::new(Arc::new(TableEmbedder::new(&[])));
    let retriever = Retriever::new(index);

    let result = retriever.retrieve("anything at all", 5).await;
    assert!(matches!(result, Err(RetrievalError::IndexNotBuilt)));
    Ok(())
}
