//! A TF-IDF inverted index with cosine-similarity ranking.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │ tokenizer.rs│────▶│  ingest.rs  │────▶│  types.rs    │
//! │ (normalize) │     │ (corpus     │     │ (InvertedIndex,
//! │             │     │  parser)    │     │  TermRecord) │
//! └─────────────┘     └─────────────┘     └──────┬───────┘
//!                                                 │
//!                                                 ▼
//!                                          ┌──────────────┐
//!                                          │  writer.rs   │
//!                                          │ (lexicon,    │
//!                                          │  postings,   │
//!                                          │  doc-lengths)│
//!                                          └──────┬───────┘
//!                                                 │
//!                            ┌────────────────────┴──────────┐
//!                            ▼                               ▼
//!                     ┌─────────────┐                 ┌─────────────┐
//!                     │  reader.rs  │────────────────▶│  scorer.rs  │
//!                     │ (lexicon +  │                 │  (cosine    │
//!                     │  postings)  │                 │  similarity)│
//!                     └─────────────┘                 └─────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod reader;
pub mod scorer;
pub mod server;
pub mod tokenizer;
pub mod types;
pub mod writer;

pub use config::{ByteOrder, Config};
pub use error::{AppError, IndexError, QueryError};
pub use ingest::Ingestor;
pub use reader::IndexReader;
pub use scorer::Scorer;
pub use tokenizer::{Tokenizer, TokenizerMode};
pub use types::{DocId, InvertedIndex, LexiconRow, PostingsEntry, TermRecord};
pub use writer::{IndexWriter, WrittenArtifacts};
