use clap::Parser;
use passage_embed::{EmbedConfig, FastEmbedProvider};
use passage_retriever::RetrievalError;
use passage_retriever::generation::{AnswerGenerator, DEFAULT_GENERATION_MODEL, GeminiGenerator};
use passage_retriever::loader::load_documents;
use passage_retriever::retrieval::{Retriever, VectorIndex};
use passage_segment::{DEFAULT_MAX_CHUNK_SIZE, DEFAULT_OVERLAP_SIZE, Segmenter};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

/// Index a corpus directory and answer questions about it interactively.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the input corpus (.txt and .csv files)
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Number of top relevant chunks to retrieve per query
    #[arg(short = 'k', long, default_value_t = 5)]
    top_k: usize,

    /// Target maximum characters per chunk
    #[arg(long, default_value_t = DEFAULT_MAX_CHUNK_SIZE)]
    max_chunk_size: usize,

    /// Characters of trailing context carried into the next chunk
    #[arg(long, default_value_t = DEFAULT_OVERLAP_SIZE)]
    overlap_size: usize,

    /// Embedding model name
    #[arg(long, default_value = passage_embed::DEFAULT_MODEL_NAME)]
    embedding_model: String,

    /// Generation model name
    #[arg(long, default_value = DEFAULT_GENERATION_MODEL)]
    generation_model: String,

    /// Output format for retrieved chunks
    #[arg(short, long, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq)]
enum OutputFormat {
    Summary,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {s}")),
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let documents = load_documents(&args.data_dir)?;
    if documents.is_empty() {
        println!("No documents found in {}", args.data_dir.display());
        return Ok(());
    }

    let segmenter = Segmenter::default()
        .with_max_chunk_size(args.max_chunk_size)
        .with_overlap_size(args.overlap_size);
    let mut chunks = Vec::new();
    for document in &documents {
        chunks.extend(segmenter.segment(&document.text, &document.filename));
    }
    if chunks.is_empty() {
        println!("No chunks produced from {} documents", documents.len());
        return Ok(());
    }
    println!(
        "Segmented {} documents into {} chunks",
        documents.len(),
        chunks.len()
    );

    let embedder = Arc::new(
        FastEmbedProvider::create(EmbedConfig::new(&args.embedding_model)).await?,
    );
    let mut index = VectorIndex::new(embedder);
    index.add_chunks(&chunks).await?;
    println!("Indexed {} chunks", index.ntotal());

    let retriever = Retriever::new(index);
    let generator = GeminiGenerator::from_env(&args.generation_model)?;

    println!("\nEnter your queries below (type 'quit' to exit).");
    let stdin = io::stdin();
    loop {
        print!("\n> ");
        io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let query = line?.trim().to_string();
        if query.eq_ignore_ascii_case("quit") {
            break;
        }
        if query.is_empty() {
            println!("Please enter a query.");
            continue;
        }

        let retrieved = match retriever.retrieve_scored(&query, args.top_k).await {
            Ok(hits) => hits,
            Err(RetrievalError::IndexNotBuilt) => {
                println!("The index is empty; nothing to retrieve.");
                continue;
            }
            Err(e) => {
                tracing::warn!("retrieval failed: {e}");
                continue;
            }
        };
        match args.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&retrieved)?);
            }
            OutputFormat::Summary => {
                println!("Retrieved {} relevant chunks.", retrieved.len());
                for hit in &retrieved {
                    println!(
                        "  {}. {} [chunk {}] (distance {:.3})",
                        hit.rank, hit.chunk.filename, hit.chunk.chunk_index, hit.distance
                    );
                }
            }
        }

        let contexts: Vec<String> = retrieved.into_iter().map(|hit| hit.chunk.text).collect();
        let answer = match generator.generate_answer(&query, &contexts).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("generation failed: {e}");
                "Could not generate an answer.".to_string()
            }
        };
        println!("\n--- Answer ---\n{answer}");
    }

    Ok(())
}
