//! Cosine-similarity scoring of a free-form query against a built index.
//!
//! Ranking here intentionally sorts by score **ascending** before applying
//! `offset`/`limit`. That is not a mistake: it mirrors the reference
//! behavior this engine is built to match, and callers depending on "most
//! relevant first" must reverse the returned list themselves.

use std::collections::HashMap;

use crate::error::QueryError;
use crate::reader::IndexReader;
use crate::tokenizer::Tokenizer;
use crate::types::DocId;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Scored {
    doc_id: u32,
    score: f64,
}

/// Runs queries against a lexicon/postings/document-length artifact set.
pub struct Scorer<'a> {
    reader: &'a IndexReader,
    doc_lengths: &'a HashMap<u32, f64>,
    tokenizer: &'a Tokenizer,
}

impl<'a> Scorer<'a> {
    pub fn new(
        reader: &'a IndexReader,
        doc_lengths: &'a HashMap<u32, f64>,
        tokenizer: &'a Tokenizer,
    ) -> Self {
        Scorer {
            reader,
            doc_lengths,
            tokenizer,
        }
    }

    /// Score `query_str` against every document in the collection and return
    /// up to `limit` document ids starting at `offset`, ordered ascending by
    /// cosine score (ties broken by ascending `doc_id`). A document sharing
    /// no term with the query is still ranked, scored 0. An empty/all-stopword
    /// query returns an empty list rather than an error.
    pub fn query(
        &self,
        query_str: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<DocId>, QueryError> {
        let query_terms = self.tokenizer.tokenize_line(query_str);
        if query_terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut query_tf: HashMap<String, u32> = HashMap::new();
        for term in &query_terms {
            *query_tf.entry(term.clone()).or_insert(0) += 1;
        }

        let mut doc_dot_products: HashMap<u32, f64> = HashMap::new();
        let mut query_sq_norm = 0.0_f64;

        for (term, &tf) in &query_tf {
            let Some(row) = self.reader.lexicon_row(term) else {
                tracing::info!(term = %term, "query term not found in index, skipping");
                continue;
            };
            let idf = row.inverse_document_frequency;
            let query_weight = tf as f64 * idf;
            query_sq_norm += query_weight * query_weight;

            let Some(postings) = self.reader.postings(term)? else {
                continue;
            };
            for posting in postings {
                let doc_weight = posting.tf as f64 * idf;
                *doc_dot_products.entry(posting.doc_id.0).or_insert(0.0) +=
                    query_weight * doc_weight;
            }
        }

        let query_norm = query_sq_norm.sqrt();

        // Every document in the collection is ranked, not just the ones
        // sharing a query term with it; a doc with no overlap still gets a
        // row here, scored 0.
        let max_doc_id = self.doc_lengths.keys().copied().max().unwrap_or(0);
        if let Some(max_doc_id_in_postings) = doc_dot_products.keys().copied().max() {
            if max_doc_id_in_postings > max_doc_id {
                return Err(QueryError::DimensionMismatch {
                    max_doc_id_in_postings,
                    max_doc_id_in_lengths: max_doc_id,
                });
            }
        }

        let mut scored: Vec<Scored> = (1..=max_doc_id)
            .map(|doc_id| {
                let dot = doc_dot_products.get(&doc_id).copied().unwrap_or(0.0);
                let doc_length = self.doc_lengths.get(&doc_id).copied().unwrap_or(0.0);
                let score = if doc_length == 0.0 || query_norm == 0.0 {
                    0.0
                } else {
                    dot / (doc_length * query_norm)
                };
                Scored { doc_id, score }
            })
            .collect();

        scored.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.doc_id.cmp(&b.doc_id))
        });

        Ok(scored
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|s| DocId(s.doc_id))
            .collect())
    }
}
