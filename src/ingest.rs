//! Corpus parsing and index population.
//!
//! The corpus format is a line-oriented, SGML-like markup: each document is
//! wrapped in `<P ID=N>` ... `</P>` or `<Q ID=N>` ... `</Q>`, with the text in
//! between being the document's body (one or more lines). The parser is a
//! two-state machine (OUTSIDE a document, INSIDE one) and raises
//! `CorpusParseError` on malformed nesting or an unterminated document.

use regex::Regex;
use std::io::BufRead;

use crate::error::IndexError;
use crate::tokenizer::Tokenizer;
use crate::types::{DocId, InvertedIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Inside,
}

/// Drives a corpus source line by line into an [`InvertedIndex`].
pub struct Ingestor<'a> {
    tokenizer: &'a Tokenizer,
    documents_processed: usize,
    words_processed: usize,
}

impl<'a> Ingestor<'a> {
    pub fn new(tokenizer: &'a Tokenizer) -> Self {
        Ingestor {
            tokenizer,
            documents_processed: 0,
            words_processed: 0,
        }
    }

    pub fn documents_processed(&self) -> usize {
        self.documents_processed
    }

    pub fn words_processed(&self) -> usize {
        self.words_processed
    }

    /// Parse and index every document in `reader`.
    pub fn ingest<R: BufRead>(
        &mut self,
        reader: R,
        index: &mut InvertedIndex,
    ) -> Result<(), IndexError> {
        let open_tag = Regex::new(r"^<[PQ]\s+ID=(\d+)>").unwrap();

        let mut state = State::Outside;
        let mut current_doc: Option<u32> = None;
        let mut buffer = String::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line_no = line_no + 1;
            let line = line.map_err(IndexError::Io)?;

            if line.trim().is_empty() {
                continue;
            }

            match state {
                State::Outside => {
                    if let Some(caps) = open_tag.captures(&line) {
                        let doc_id: u32 = caps[1].parse().map_err(|_| IndexError::CorpusParse {
                            line: line_no,
                            message: format!("invalid document id in tag: {line}"),
                        })?;
                        current_doc = Some(doc_id);
                        buffer.clear();
                        state = State::Inside;
                    } else if line.contains("</P>") || line.contains("</Q>") {
                        return Err(IndexError::CorpusParse {
                            line: line_no,
                            message: "closing tag found while outside a document".to_string(),
                        });
                    } else {
                        return Err(IndexError::CorpusParse {
                            line: line_no,
                            message: format!("expected an opening tag, found: {line}"),
                        });
                    }
                }
                State::Inside => {
                    if line.contains("</P>") || line.contains("</Q>") {
                        let doc_id = current_doc.take().expect("state machine invariant: doc id set while Inside");
                        self.index_document(DocId(doc_id), &buffer, index);
                        self.documents_processed += 1;
                        tracing::info!(documents_processed = self.documents_processed, "document indexed");
                        state = State::Outside;
                    } else if open_tag.is_match(&line) {
                        return Err(IndexError::CorpusParse {
                            line: line_no,
                            message: "nested opening tag found inside a document".to_string(),
                        });
                    } else {
                        buffer.push_str(&line);
                        buffer.push('\n');
                    }
                }
            }
        }

        if state == State::Inside {
            return Err(IndexError::CorpusParse {
                line: 0,
                message: "reached end of file while inside an unterminated document".to_string(),
            });
        }

        Ok(())
    }

    fn index_document(&mut self, doc_id: DocId, text: &str, index: &mut InvertedIndex) {
        index.note_document();
        for line in text.lines() {
            let tokens = self.tokenizer.tokenize_line(line);
            for term in tokens {
                self.words_processed += 1;
                index.add(doc_id, &term);
            }
        }
    }
}
