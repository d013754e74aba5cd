pub mod knn;
pub mod retriever;
pub mod vector_index;

#[cfg(test)]
pub(crate) mod stub;

pub use knn::{FlatL2Index, NearestNeighbors, SENTINEL_ID};
pub use retriever::{Retriever, ScoredChunk};
pub use vector_index::VectorIndex;
