//! Core data model: documents, terms, and the in-memory inverted index.

use std::collections::HashMap;

/// A document identifier, as assigned by the corpus source. Wrapped so that
/// document ids and byte offsets into the postings file are never confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocId(pub u32);

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single `(doc_id, term_frequency)` occurrence of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingsEntry {
    pub doc_id: DocId,
    pub tf: u32,
}

/// Everything the in-memory index knows about one term.
#[derive(Debug, Clone, Default)]
pub struct TermRecord {
    /// Total occurrences of the term across the whole collection.
    pub collection_count: u64,
    /// `postings.len()` — kept as a field rather than recomputed, to match
    /// the on-disk `document_frequency` column exactly.
    pub doc_count: u32,
    /// doc_id -> term frequency within that document.
    pub postings: HashMap<u32, u32>,
}

impl TermRecord {
    fn add_occurrence(&mut self, doc_id: DocId) {
        self.collection_count += 1;
        let entry = self.postings.entry(doc_id.0).or_insert(0);
        if *entry == 0 {
            self.doc_count += 1;
        }
        *entry += 1;
    }
}

/// An in-memory inverted index being built up by an [`crate::ingest::Ingestor`].
///
/// Terms are stored in insertion order (a parallel `Vec<String>` alongside the
/// lookup map) because the lexicon and postings file are written out in that
/// same order and must be stable across runs for a given corpus.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    term_order: Vec<String>,
    terms: HashMap<String, TermRecord>,
    pub num_docs: u32,
    pub num_terms: u32,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Record one occurrence of `term` in `doc_id`. O(1) amortized.
    pub fn add(&mut self, doc_id: DocId, term: &str) {
        if let Some(record) = self.terms.get_mut(term) {
            record.add_occurrence(doc_id);
        } else {
            let mut record = TermRecord::default();
            record.add_occurrence(doc_id);
            self.terms.insert(term.to_string(), record);
            self.term_order.push(term.to_string());
            self.num_terms += 1;
        }
    }

    /// Record that a new document has been seen, independent of its terms
    /// (a document with zero terms still counts toward `num_docs`).
    pub fn note_document(&mut self) {
        self.num_docs += 1;
    }

    /// Terms in the order they were first inserted.
    pub fn terms_in_order(&self) -> impl Iterator<Item = (&str, &TermRecord)> {
        self.term_order.iter().map(move |t| (t.as_str(), &self.terms[t]))
    }

    pub fn get(&self, term: &str) -> Option<&TermRecord> {
        self.terms.get(term)
    }

    pub fn len(&self) -> usize {
        self.term_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_order.is_empty()
    }
}

/// One row of the persisted lexicon table.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LexiconRow {
    pub term: String,
    pub document_frequency: u32,
    pub inverse_document_frequency: f64,
    pub offset: u64,
}

/// One row of the persisted document-length table.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DocumentLengthRow {
    pub doc_id: u32,
    pub euclidean_length: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_new_term_sets_counts() {
        let mut idx = InvertedIndex::new();
        idx.add(DocId(1), "foo");
        let record = idx.get("foo").unwrap();
        assert_eq!(record.collection_count, 1);
        assert_eq!(record.doc_count, 1);
        assert_eq!(record.postings.get(&1), Some(&1));
    }

    #[test]
    fn repeated_term_in_same_doc_bumps_collection_count_not_doc_count() {
        let mut idx = InvertedIndex::new();
        idx.add(DocId(1), "foo");
        idx.add(DocId(1), "foo");
        let record = idx.get("foo").unwrap();
        assert_eq!(record.collection_count, 2);
        assert_eq!(record.doc_count, 1);
        assert_eq!(record.postings.get(&1), Some(&2));
    }

    #[test]
    fn same_term_across_docs_bumps_doc_count() {
        let mut idx = InvertedIndex::new();
        idx.add(DocId(1), "foo");
        idx.add(DocId(2), "foo");
        let record = idx.get("foo").unwrap();
        assert_eq!(record.collection_count, 2);
        assert_eq!(record.doc_count, 2);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut idx = InvertedIndex::new();
        idx.add(DocId(1), "zebra");
        idx.add(DocId(1), "apple");
        idx.add(DocId(1), "mango");
        let order: Vec<&str> = idx.terms_in_order().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn invariant_collection_count_equals_sum_of_postings() {
        let mut idx = InvertedIndex::new();
        idx.add(DocId(1), "foo");
        idx.add(DocId(2), "foo");
        idx.add(DocId(2), "foo");
        let record = idx.get("foo").unwrap();
        let sum: u32 = record.postings.values().sum();
        assert_eq!(record.collection_count, sum as u64);
        assert_eq!(record.doc_count as usize, record.postings.len());
    }
}
