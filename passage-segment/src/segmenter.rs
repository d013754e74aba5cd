//! Sentence-aware segmentation of document text into overlapping chunks.
//!
//! [`Segmenter`] greedily packs sentences into chunks of at most
//! `max_chunk_size` characters, carrying the last `overlap_size` characters of
//! each emitted chunk into the next one so that context survives a chunk
//! boundary. Sentences are never split: a single sentence longer than
//! `max_chunk_size` becomes its own oversized chunk.
//!
//! # Example
//!
//! ```
//! use passage_segment::Segmenter;
//!
//! let segmenter = Segmenter::default()
//!     .with_max_chunk_size(50)
//!     .with_overlap_size(0);
//! let chunks = segmenter.segment(
//!     "This is the first sentence. This is the second sentence. The third sentence is here.",
//!     "sample.txt",
//! );
//!
//! assert!(chunks.len() > 1);
//! assert_eq!(chunks[0].filename, "sample.txt");
//! assert_eq!(chunks[0].chunk_index, 0);
//! ```

use crate::sentence::{RegexSentenceSplitter, SentenceSplit};
use serde::{Deserialize, Serialize};

/// Default target maximum characters per chunk.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 512;

/// Default characters of trailing context carried into the next chunk.
pub const DEFAULT_OVERLAP_SIZE: usize = 100;

/// A bounded span of document text, the atomic unit stored and retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The chunk text, trimmed of leading and trailing whitespace.
    pub text: String,
    /// The filename of the source document, attached verbatim.
    pub filename: String,
    /// 0-based position of this chunk within its document.
    pub chunk_index: usize,
}

/// Splits document text into overlapping, sentence-aligned chunks.
///
/// Pure and deterministic given the splitter's output; a call has no side
/// effects and never fails on well-formed string input.
pub struct Segmenter {
    splitter: Box<dyn SentenceSplit>,
    max_chunk_size: usize,
    overlap_size: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(Box::new(RegexSentenceSplitter::new()))
    }
}

impl Segmenter {
    /// Create a segmenter over a caller-chosen sentence-boundary detector,
    /// with the default chunk size and overlap.
    pub fn new(splitter: Box<dyn SentenceSplit>) -> Self {
        Self {
            splitter,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            overlap_size: DEFAULT_OVERLAP_SIZE,
        }
    }

    pub fn with_max_chunk_size(mut self, max_chunk_size: usize) -> Self {
        self.max_chunk_size = max_chunk_size;
        self
    }

    pub fn with_overlap_size(mut self, overlap_size: usize) -> Self {
        self.overlap_size = overlap_size;
        self
    }

    /// Split `text` into chunks labeled with `filename`.
    ///
    /// Sentences are accumulated into a buffer, each followed by a single
    /// separating space. When appending a sentence would push the buffer past
    /// `max_chunk_size`, the buffer is emitted (trimmed) as a chunk and the
    /// new buffer is seeded with the overlap tail of the old one. Chunk
    /// indices are contiguous from 0 per call. Empty or whitespace-only input
    /// yields no chunks.
    pub fn segment(&self, text: &str, filename: &str) -> Vec<Chunk> {
        let sentences = self.splitter.split(text);
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut buffer = String::new();

        for sentence in sentences {
            // An empty buffer accepts its first sentence unconditionally, so a
            // sentence longer than max_chunk_size becomes one oversized chunk
            // instead of being cut mid-sentence.
            if buffer.is_empty() || buffer.len() + sentence.len() + 1 <= self.max_chunk_size {
                buffer.push_str(&sentence);
                buffer.push(' ');
            } else {
                let overlap = self.overlap_tail(&buffer);
                chunks.push(Chunk {
                    text: buffer.trim().to_string(),
                    filename: filename.to_string(),
                    chunk_index: chunks.len(),
                });
                buffer.clear();
                if !overlap.is_empty() {
                    buffer.push_str(&overlap);
                    buffer.push(' ');
                }
                buffer.push_str(&sentence);
                buffer.push(' ');
            }
        }

        if !buffer.trim().is_empty() {
            chunks.push(Chunk {
                text: buffer.trim().to_string(),
                filename: filename.to_string(),
                chunk_index: chunks.len(),
            });
        }

        chunks
    }

    /// Overlap is measured on the space-joined buffer exactly as accumulated
    /// (separating spaces included), not on raw sentence text: the last
    /// `overlap_size` bytes of the untrimmed buffer, snapped forward to a
    /// character boundary, then trimmed. A buffer no longer than
    /// `overlap_size` contributes no overlap.
    fn overlap_tail(&self, buffer: &str) -> String {
        if self.overlap_size == 0 || buffer.len() <= self.overlap_size {
            return String::new();
        }
        let mut start = buffer.len() - self.overlap_size;
        while !buffer.is_char_boundary(start) {
            start += 1;
        }
        buffer[start..].trim().to_string()
    }
}
