pub mod segmenter;
pub mod sentence;

// Re-export the segmentation types for external use
pub use segmenter::{Chunk, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_OVERLAP_SIZE, Segmenter};
pub use sentence::{RegexSentenceSplitter, SentenceSplit};
