//! Sentence boundary detection for plain text.
//!
//! The segmenter never decides where a sentence ends itself; it consumes a
//! [`SentenceSplit`] implementation. The default, [`RegexSentenceSplitter`],
//! cuts at runs of `.`, `!` or `?` followed by whitespace, so decimal numbers
//! like `3.14` are never split, and suppresses cuts after a fixed list of
//! common abbreviations (`Dr.`, `e.g.`, ...).

use regex::Regex;

/// Sentence-boundary detector consumed by [`Segmenter`](crate::Segmenter).
///
/// Implementations must return sentences in original document order, covering
/// all non-whitespace input with no loss or reordering between boundaries.
/// Whitespace-only input yields an empty sequence.
pub trait SentenceSplit: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

/// Tokens that end with a terminator but do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "no.", "vs.", "e.g.", "i.e.",
    "approx.",
];

/// Regex-based sentence splitter.
///
/// A boundary is a run of sentence terminators, optionally followed by closing
/// quotes or brackets, followed by whitespace. The whitespace requirement keeps
/// decimals and dotted identifiers intact; the abbreviation guard keeps titles
/// and Latin shorthand attached to the sentence they belong to.
pub struct RegexSentenceSplitter {
    boundary: Regex,
}

impl RegexSentenceSplitter {
    pub fn new() -> Self {
        Self {
            boundary: Regex::new(r#"[.!?]+["')\]]*\s+"#).expect("sentence boundary pattern"),
        }
    }

    fn ends_with_abbreviation(sentence: &str) -> bool {
        let last_token = sentence
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or(sentence);
        ABBREVIATIONS.contains(&last_token.to_lowercase().as_str())
    }
}

impl Default for RegexSentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSplit for RegexSentenceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for mat in self.boundary.find_iter(text) {
            let candidate = text[start..mat.end()].trim();
            if Self::ends_with_abbreviation(candidate) {
                continue;
            }
            if !candidate.is_empty() {
                sentences.push(candidate.to_string());
            }
            start = mat.end();
        }

        // Trailing text without a terminator still forms a final sentence.
        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }

        sentences
    }
}
