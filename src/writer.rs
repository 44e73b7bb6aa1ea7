//! Serializes an in-memory [`InvertedIndex`] to the three on-disk artifacts:
//! a lexicon CSV, a postings binary file, and a document-length CSV.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::ByteOrder;
use crate::error::IndexError;
use crate::types::{DocumentLengthRow, InvertedIndex, LexiconRow};

/// Paths to the three artifacts produced by a single [`IndexWriter::write`] call.
#[derive(Debug, Clone)]
pub struct WrittenArtifacts {
    pub lexicon_path: PathBuf,
    pub postings_path: PathBuf,
    pub document_length_path: PathBuf,
}

pub struct IndexWriter {
    byte_order: ByteOrder,
}

impl IndexWriter {
    pub fn new(byte_order: ByteOrder) -> Self {
        IndexWriter { byte_order }
    }

    /// Write `index` under `output_dir`, with filenames stamped
    /// `{dataset_name}_{lexicon,index,document_length}_{timestamp}.{csv,bin}`.
    pub fn write(
        &self,
        index: &InvertedIndex,
        dataset_name: &str,
        output_dir: &Path,
        timestamp: &str,
    ) -> Result<WrittenArtifacts, IndexError> {
        std::fs::create_dir_all(output_dir)?;

        let lexicon_path = output_dir.join(format!("{dataset_name}_lexicon_{timestamp}.csv"));
        let postings_path = output_dir.join(format!("{dataset_name}_index_{timestamp}.bin"));
        let document_length_path =
            output_dir.join(format!("{dataset_name}_document_length_{timestamp}.csv"));

        let mut doc_vector_sq_lengths: HashMap<u32, f64> = HashMap::new();
        let num_docs = index.num_docs.max(1) as f64;

        let mut postings_file = BufWriter::new(File::create(&postings_path)?);
        let mut offset: u64 = 0;
        let mut lexicon_rows = Vec::with_capacity(index.len());

        for (term, record) in index.terms_in_order() {
            let document_frequency = record.doc_count;
            let idf = (num_docs / document_frequency as f64).log2();

            lexicon_rows.push(LexiconRow {
                term: term.to_string(),
                document_frequency,
                inverse_document_frequency: idf,
                offset,
            });

            // Iterate postings in doc_id order for deterministic output.
            let mut postings: Vec<(&u32, &u32)> = record.postings.iter().collect();
            postings.sort_by_key(|(doc_id, _)| **doc_id);

            for (&doc_id, &tf) in postings {
                self.write_pair(&mut postings_file, doc_id, tf)?;
                offset += 8;

                let weight = tf as f64 * idf;
                *doc_vector_sq_lengths.entry(doc_id).or_insert(0.0) += weight * weight;
            }
        }
        postings_file.flush()?;

        self.write_lexicon(&lexicon_path, &lexicon_rows)?;
        self.write_document_lengths(&document_length_path, index.num_docs, &doc_vector_sq_lengths)?;

        Ok(WrittenArtifacts {
            lexicon_path,
            postings_path,
            document_length_path,
        })
    }

    fn write_pair<W: Write>(&self, w: &mut W, doc_id: u32, tf: u32) -> Result<(), IndexError> {
        let (doc_id_bytes, tf_bytes) = match self.byte_order {
            ByteOrder::Big => (doc_id.to_be_bytes(), tf.to_be_bytes()),
            ByteOrder::Little => (doc_id.to_le_bytes(), tf.to_le_bytes()),
        };
        w.write_all(&doc_id_bytes)?;
        w.write_all(&tf_bytes)?;
        Ok(())
    }

    fn write_lexicon(&self, path: &Path, rows: &[LexiconRow]) -> Result<(), IndexError> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_document_lengths(
        &self,
        path: &Path,
        num_docs: u32,
        doc_vector_sq_lengths: &HashMap<u32, f64>,
    ) -> Result<(), IndexError> {
        let mut writer = csv::Writer::from_path(path)?;
        for doc_id in 1..=num_docs {
            let euclidean_length = doc_vector_sq_lengths
                .get(&doc_id)
                .copied()
                .unwrap_or(0.0)
                .sqrt();
            writer.serialize(DocumentLengthRow {
                doc_id,
                euclidean_length,
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{Tokenizer, TokenizerMode};
    use crate::types::DocId;

    #[test]
    fn writes_three_artifacts_with_one_lexicon_row_per_term() {
        let tmp = tempfile::tempdir().unwrap();
        let tokenizer = Tokenizer::new(TokenizerMode::Simple);
        let mut index = InvertedIndex::new();
        for term in tokenizer.tokenize_line("the quick brown fox") {
            index.add(DocId(1), &term);
        }
        index.note_document();

        let writer = IndexWriter::new(ByteOrder::Big);
        let artifacts = writer
            .write(&index, "demo", tmp.path(), "01012026-000000")
            .unwrap();

        assert!(artifacts.lexicon_path.exists());
        assert!(artifacts.postings_path.exists());
        assert!(artifacts.document_length_path.exists());

        let mut reader = csv::Reader::from_path(&artifacts.lexicon_path).unwrap();
        let rows: Vec<LexiconRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), index.len());
    }

    #[test]
    fn last_lexicon_offset_plus_block_equals_file_size() {
        let tmp = tempfile::tempdir().unwrap();
        let tokenizer = Tokenizer::new(TokenizerMode::Simple);
        let mut index = InvertedIndex::new();
        index.add(DocId(1), "a");
        index.add(DocId(1), "b");
        index.note_document();

        let writer = IndexWriter::new(ByteOrder::Big);
        let artifacts = writer
            .write(&index, "demo", tmp.path(), "01012026-000000")
            .unwrap();

        let file_size = std::fs::metadata(&artifacts.postings_path).unwrap().len();
        let mut reader = csv::Reader::from_path(&artifacts.lexicon_path).unwrap();
        let rows: Vec<LexiconRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        let last = rows.last().unwrap();
        assert_eq!(last.offset + u64::from(last.document_frequency) * 8, file_size);
    }
}
