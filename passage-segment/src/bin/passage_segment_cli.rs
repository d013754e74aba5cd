use clap::Parser;
use passage_segment::{DEFAULT_MAX_CHUNK_SIZE, DEFAULT_OVERLAP_SIZE, Segmenter};
use std::fs;
use std::io::{self, Read};

/// A CLI tool to segment a text document into JSON chunks using passage-segment.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input text file. If not provided, reads from stdin.
    #[arg(short, long)]
    input: Option<String>,

    /// Filename label attached to every produced chunk.
    #[arg(short, long, default_value = "stdin")]
    filename: String,

    /// Target maximum characters per chunk.
    #[arg(short, long, default_value_t = DEFAULT_MAX_CHUNK_SIZE)]
    max_chunk_size: usize,

    /// Characters of trailing context carried into the next chunk.
    #[arg(short, long, default_value_t = DEFAULT_OVERLAP_SIZE)]
    overlap_size: usize,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let text = if let Some(input_path) = args.input {
        fs::read_to_string(input_path)?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let segmenter = Segmenter::default()
        .with_max_chunk_size(args.max_chunk_size)
        .with_overlap_size(args.overlap_size);
    let chunks = segmenter.segment(&text, &args.filename);

    let json_output = serde_json::to_string_pretty(&chunks)?;
    println!("{}", json_output);

    Ok(())
}
