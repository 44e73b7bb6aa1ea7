use std::io::Cursor;

use cosindex::config::ByteOrder;
use cosindex::ingest::Ingestor;
use cosindex::reader::{load_document_lengths, IndexReader};
use cosindex::scorer::Scorer;
use cosindex::tokenizer::{Tokenizer, TokenizerMode};
use cosindex::types::InvertedIndex;
use cosindex::writer::IndexWriter;

const CORPUS: &str = "\
<P ID=1>
the quick brown fox jumps over the lazy dog
</P>
<P ID=2>
the lazy dog sleeps all day
</P>
<P ID=3>
foxes are quick and clever
</P>
";

fn build_index(corpus: &str, mode: TokenizerMode) -> (IndexReader, std::collections::HashMap<u32, f64>, Tokenizer, tempfile::TempDir) {
    let tokenizer = Tokenizer::new(mode);
    let mut ingestor = Ingestor::new(&tokenizer);
    let mut index = InvertedIndex::new();
    ingestor.ingest(Cursor::new(corpus), &mut index).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let writer = IndexWriter::new(ByteOrder::Big);
    let artifacts = writer
        .write(&index, "scenario", tmp.path(), "01012026-000000")
        .unwrap();

    let reader =
        IndexReader::open(&artifacts.lexicon_path, &artifacts.postings_path, ByteOrder::Big).unwrap();
    let lengths = load_document_lengths(&artifacts.document_length_path).unwrap();

    (reader, lengths, tokenizer, tmp)
}

// Scenario A: a query matching exactly one document still ranks every
// document in the collection, but the matching one sorts last (highest
// cosine score, ascending sort).
#[test]
fn scenario_a_single_match() {
    let (reader, lengths, tokenizer, _tmp) = build_index(CORPUS, TokenizerMode::Simple);
    let scorer = Scorer::new(&reader, &lengths, &tokenizer);
    let results = scorer.query("sleeps", 10, 0).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[2].0, 2);
}

// Scenario B: every document in the collection is ranked, even one (doc 2)
// that doesn't contain the query term at all — it still appears, scored 0.
#[test]
fn scenario_b_common_term_returns_all_docs() {
    let (reader, lengths, tokenizer, _tmp) = build_index(CORPUS, TokenizerMode::Simple);
    let scorer = Scorer::new(&reader, &lengths, &tokenizer);
    let results = scorer.query("quick", 10, 0).unwrap();
    let mut ids: Vec<u32> = results.into_iter().map(|d| d.0).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

// Scenario C: an empty query returns an empty list, not an error.
#[test]
fn scenario_c_empty_query_returns_empty_list() {
    let (reader, lengths, tokenizer, _tmp) = build_index(CORPUS, TokenizerMode::Simple);
    let scorer = Scorer::new(&reader, &lengths, &tokenizer);
    let results = scorer.query("", 10, 0).unwrap();
    assert!(results.is_empty());
}

// Scenario D: a query for a term absent from the corpus doesn't propagate an
// error (TermNotFound is soft) — every document still appears, all scored 0
// since the query carries no weight.
#[test]
fn scenario_d_unknown_term_is_soft_failure() {
    let (reader, lengths, tokenizer, _tmp) = build_index(CORPUS, TokenizerMode::Simple);
    let scorer = Scorer::new(&reader, &lengths, &tokenizer);
    let results = scorer.query("xenomorph", 10, 0).unwrap();
    let mut ids: Vec<u32> = results.into_iter().map(|d| d.0).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

// Scenario E: pagination honors offset and limit over the ascending-sorted
// result list.
#[test]
fn scenario_e_pagination_respects_offset_and_limit() {
    let (reader, lengths, tokenizer, _tmp) = build_index(CORPUS, TokenizerMode::Simple);
    let scorer = Scorer::new(&reader, &lengths, &tokenizer);
    let all = scorer.query("dog", 10, 0).unwrap();
    let page = scorer.query("dog", 1, 1).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0], all[1]);
}

// Scenario F: malformed corpus markup (unterminated document) is a fatal
// parse error, surfaced to the caller.
#[test]
fn scenario_f_malformed_corpus_is_fatal() {
    let tokenizer = Tokenizer::new(TokenizerMode::Simple);
    let mut ingestor = Ingestor::new(&tokenizer);
    let mut index = InvertedIndex::new();
    let result = ingestor.ingest(Cursor::new("<P ID=1>\nunterminated\n"), &mut index);
    assert!(result.is_err());
}

#[test]
fn linguistic_mode_round_trips_through_the_full_pipeline() {
    let (reader, lengths, tokenizer, _tmp) = build_index(CORPUS, TokenizerMode::Linguistic);
    let scorer = Scorer::new(&reader, &lengths, &tokenizer);
    let results = scorer.query("foxes jumping quickly", 10, 0).unwrap();
    assert_eq!(results.len(), 3);
    let mut ids: Vec<u32> = results.into_iter().map(|d| d.0).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn document_frequency_never_exceeds_num_docs() {
    let (reader, _lengths, _tokenizer, _tmp) = build_index(CORPUS, TokenizerMode::Simple);
    for term in ["the", "dog", "quick", "fox"] {
        if let Some(row) = reader.lexicon_row(term) {
            assert!(row.document_frequency <= 3);
        }
    }
}
