use clap::{Parser, Subcommand};

use crate::config::ByteOrder;
use crate::tokenizer::TokenizerMode;

#[derive(Parser)]
#[command(name = "cosindex", about = "TF-IDF inverted index builder and query tool", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an inverted index from a corpus file.
    Index {
        /// Path to the corpus file (SGML-like `<P ID=N>`/`<Q ID=N>` markup)
        #[arg(short, long)]
        input: String,

        /// Output directory for the lexicon, postings, and doc-length files
        #[arg(short, long)]
        output: String,

        /// Name of the dataset, used as the artifact filename prefix
        #[arg(short, long)]
        dataset: String,

        /// Tokenizer mode: simple or linguistic
        #[arg(long, default_value = "simple")]
        tokenizer: TokenizerMode,

        /// Byte order for the postings file: big or little
        #[arg(long, default_value = "big")]
        byte_order: ByteOrder,

        /// Optional TOML config file overlaying these flags
        #[arg(long)]
        config: Option<String>,
    },

    /// Run a single query against already-built index artifacts.
    Query {
        #[arg(long)]
        lexicon: String,
        #[arg(long)]
        postings: String,
        #[arg(long = "doc-lengths")]
        doc_lengths: String,

        /// The query text
        query_str: String,

        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value_t = 0)]
        offset: usize,

        #[arg(long, default_value = "simple")]
        tokenizer: TokenizerMode,
        #[arg(long, default_value = "big")]
        byte_order: ByteOrder,
    },

    /// Start the query HTTP server over already-built index artifacts.
    Serve {
        #[arg(long)]
        lexicon: String,
        #[arg(long)]
        postings: String,
        #[arg(long = "doc-lengths")]
        doc_lengths: String,

        #[arg(long, default_value_t = 8080)]
        port: u16,

        #[arg(long, default_value = "simple")]
        tokenizer: TokenizerMode,
        #[arg(long, default_value = "big")]
        byte_order: ByteOrder,

        #[arg(long, default_value = "default")]
        dataset: String,
    },
}

impl clap::ValueEnum for TokenizerMode {
    fn value_variants<'a>() -> &'a [Self] {
        &[TokenizerMode::Simple, TokenizerMode::Linguistic]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            TokenizerMode::Simple => clap::builder::PossibleValue::new("simple"),
            TokenizerMode::Linguistic => clap::builder::PossibleValue::new("linguistic"),
        })
    }
}

impl clap::ValueEnum for ByteOrder {
    fn value_variants<'a>() -> &'a [Self] {
        &[ByteOrder::Big, ByteOrder::Little]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            ByteOrder::Big => clap::builder::PossibleValue::new("big"),
            ByteOrder::Little => clap::builder::PossibleValue::new("little"),
        })
    }
}
