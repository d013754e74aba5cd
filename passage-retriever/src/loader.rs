//! Document loading: plain-text passthrough and CSV flattening.
//!
//! The retrieval core only ever sees `(filename, text)` pairs; this module is
//! the glue that produces them from a corpus directory. CSV files are
//! flattened into sentence-like text so the same segmentation path handles
//! them: each data row becomes one period-terminated
//! `"header: value, header: value."` segment.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// A source document: its filename and fully decoded text.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub text: String,
}

/// Load every supported file in `dir` (non-recursive), sorted by filename.
///
/// `.txt` files are read verbatim and `.csv` files are flattened; other
/// extensions are ignored. An unreadable file is logged and skipped rather
/// than failing the whole load; a missing directory is an error.
pub fn load_documents(dir: &Path) -> Result<Vec<Document>> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("reading corpus directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let loaded = match path.extension().and_then(|ext| ext.to_str()) {
            Some("txt") => fs::read_to_string(&path).map(Some),
            Some("csv") => fs::read_to_string(&path).map(|raw| Some(flatten_csv(&raw))),
            _ => Ok(None),
        };
        match loaded {
            Ok(Some(text)) => {
                tracing::info!("loaded {} ({} chars)", filename, text.chars().count());
                documents.push(Document {
                    filename: filename.to_string(),
                    text,
                });
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("skipping {}: {}", filename, e),
        }
    }
    Ok(documents)
}

/// Flatten CSV text into one period-terminated segment per data row, each
/// field rendered as `header: value`. Rows longer than the header are
/// truncated to the header's width.
fn flatten_csv(raw: &str) -> String {
    let mut lines = raw.lines().filter(|line| !line.trim().is_empty());
    let Some(header_line) = lines.next() else {
        return String::new();
    };
    let headers = split_csv_row(header_line);

    let mut text = String::new();
    for line in lines {
        let fields = split_csv_row(line);
        let row = headers
            .iter()
            .zip(&fields)
            .map(|(header, value)| format!("{header}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&row);
        text.push_str(". ");
    }
    text
}

/// Minimal CSV field splitting: commas separate fields, double quotes group a
/// field, `""` inside quotes escapes a quote. Enough for the flat corpus
/// exports this loader ingests.
fn split_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}
