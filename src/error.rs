//! Typed errors for index building and querying.

use thiserror::Error;

/// Errors that can occur while parsing a corpus or building an index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("corpus parse error at line {line}: {message}")]
    CorpusParse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors that can occur while answering a query against a built index.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(
        "dimension mismatch: postings reference doc_id {max_doc_id_in_postings}, but the \
         document-length table only covers up to doc_id {max_doc_id_in_lengths}"
    )]
    DimensionMismatch {
        max_doc_id_in_postings: u32,
        max_doc_id_in_lengths: u32,
    },
}

/// Top-level error the CLI binary reports before exiting non-zero.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("configuration error: {0}")]
    Config(String),
}
