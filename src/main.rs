// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! cosindex CLI: build, query, and serve a TF-IDF inverted index.
//!
//! ```bash
//! # Build an index from a corpus file
//! cosindex index --input ./corpus/cord19.txt --output ./output_reports --dataset cord19
//!
//! # Query already-built artifacts
//! cosindex query --lexicon out/cord19_lexicon_....csv --postings out/cord19_index_....bin \
//!     --doc-lengths out/cord19_document_length_....csv "novel coronavirus"
//!
//! # Serve queries over HTTP
//! cosindex serve --lexicon out/cord19_lexicon_....csv --postings out/cord19_index_....bin \
//!     --doc-lengths out/cord19_document_length_....csv --port 8080
//! ```

use std::io::BufReader;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use cosindex::cli::{Cli, Commands};
use cosindex::config::{ByteOrder, Config};
use cosindex::error::AppError;
use cosindex::ingest::Ingestor;
use cosindex::reader::{load_document_lengths, IndexReader};
use cosindex::scorer::Scorer;
use cosindex::server::{self, ReaderState};
use cosindex::tokenizer::{Tokenizer, TokenizerMode};
use cosindex::types::InvertedIndex;
use cosindex::writer::IndexWriter;

fn main() {
    cosindex::logging::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Index {
            input,
            output,
            dataset,
            tokenizer,
            byte_order,
            config,
        } => run_index(input, output, dataset, tokenizer, byte_order, config),
        Commands::Query {
            lexicon,
            postings,
            doc_lengths,
            query_str,
            limit,
            offset,
            tokenizer,
            byte_order,
        } => run_query(
            &lexicon,
            &postings,
            &doc_lengths,
            &query_str,
            limit,
            offset,
            tokenizer,
            byte_order,
        ),
        Commands::Serve {
            lexicon,
            postings,
            doc_lengths,
            port,
            tokenizer,
            byte_order,
            dataset,
        } => run_serve(&lexicon, &postings, &doc_lengths, port, tokenizer, byte_order, dataset),
    }
}

fn run_index(
    input: String,
    output: String,
    dataset: String,
    tokenizer_mode: TokenizerMode,
    byte_order: ByteOrder,
    config_path: Option<String>,
) -> Result<(), AppError> {
    let mut config = Config {
        dataset_name: dataset,
        output_directory: output.into(),
        tokenizer_mode,
        byte_order,
    };
    if let Some(path) = config_path {
        config = config.merge_toml_file(std::path::Path::new(&path))?;
    }

    tracing::info!(dataset = %config.dataset_name, "starting index build");
    let start = Instant::now();

    let file = std::fs::File::open(&input).map_err(cosindex::IndexError::Io)?;
    let tokenizer = Tokenizer::new(config.tokenizer_mode);
    let mut ingestor = Ingestor::new(&tokenizer);
    let mut index = InvertedIndex::new();

    let spinner = ingest_spinner();
    let ingest_result = ingestor.ingest(BufReader::new(file), &mut index);
    spinner.finish_and_clear();
    ingest_result?;

    tracing::info!(
        documents = ingestor.documents_processed(),
        words = ingestor.words_processed(),
        terms = index.len(),
        "finished ingesting corpus"
    );

    let writer = IndexWriter::new(config.byte_order);
    let timestamp = timestamp_suffix();
    let artifacts = writer.write(&index, &config.dataset_name, &config.output_directory, &timestamp)?;

    println!("documents processed: {}", ingestor.documents_processed());
    println!("vocabulary size: {}", index.len());
    println!("lexicon: {}", artifacts.lexicon_path.display());
    println!("postings: {}", artifacts.postings_path.display());
    println!("document lengths: {}", artifacts.document_length_path.display());
    println!("elapsed: {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}

fn run_query(
    lexicon: &str,
    postings: &str,
    doc_lengths: &str,
    query_str: &str,
    limit: usize,
    offset: usize,
    tokenizer_mode: TokenizerMode,
    byte_order: ByteOrder,
) -> Result<(), AppError> {
    let reader = IndexReader::open(
        std::path::Path::new(lexicon),
        std::path::Path::new(postings),
        byte_order,
    )?;
    let lengths = load_document_lengths(std::path::Path::new(doc_lengths))?;
    let tokenizer = Tokenizer::new(tokenizer_mode);

    let scorer = Scorer::new(&reader, &lengths, &tokenizer);
    let results = scorer.query(query_str, limit, offset)?;

    for doc_id in results {
        println!("{doc_id}");
    }

    Ok(())
}

fn run_serve(
    lexicon: &str,
    postings: &str,
    doc_lengths: &str,
    port: u16,
    tokenizer_mode: TokenizerMode,
    byte_order: ByteOrder,
    dataset: String,
) -> Result<(), AppError> {
    let reader = IndexReader::open(
        std::path::Path::new(lexicon),
        std::path::Path::new(postings),
        byte_order,
    )?;
    let doc_lengths = load_document_lengths(std::path::Path::new(doc_lengths))?;
    let tokenizer = Tokenizer::new(tokenizer_mode);

    let state = Arc::new(ReaderState {
        reader,
        doc_lengths,
        tokenizer,
    });
    let config = Config {
        dataset_name: dataset,
        output_directory: Default::default(),
        tokenizer_mode,
        byte_order,
    };

    server::serve(state, &config, port).map_err(cosindex::IndexError::Io)?;
    Ok(())
}

fn ingest_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("parsing corpus...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn timestamp_suffix() -> String {
    chrono::Local::now().format("%d%m%Y-%H%M%S").to_string()
}
