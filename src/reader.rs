//! Reads the lexicon, postings, and document-length artifacts written by
//! [`crate::writer::IndexWriter`].

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::config::ByteOrder;
use crate::error::QueryError;
use crate::types::{DocumentLengthRow, LexiconRow, PostingsEntry};

/// A loaded lexicon plus a handle to the postings file it indexes into.
pub struct IndexReader {
    rows: Vec<LexiconRow>,
    by_term: HashMap<String, usize>,
    postings_path: PathBuf,
    byte_order: ByteOrder,
    postings_file_size: u64,
}

impl IndexReader {
    pub fn open(
        lexicon_path: &Path,
        postings_path: &Path,
        byte_order: ByteOrder,
    ) -> Result<Self, QueryError> {
        let mut csv_reader = csv::Reader::from_path(lexicon_path)?;
        let rows: Vec<LexiconRow> = csv_reader
            .deserialize()
            .collect::<Result<Vec<_>, _>>()?;

        let by_term = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.term.clone(), i))
            .collect();

        let postings_file_size = std::fs::metadata(postings_path)?.len();

        Ok(IndexReader {
            rows,
            by_term,
            postings_path: postings_path.to_path_buf(),
            byte_order,
            postings_file_size,
        })
    }

    pub fn lexicon_row(&self, term: &str) -> Option<&LexiconRow> {
        self.by_term.get(term).map(|&i| &self.rows[i])
    }

    /// Read the postings block for `term`. Returns `Ok(None)` if the term is
    /// not in the lexicon — callers log and skip this, per the soft
    /// term-not-found behavior; it is never an error.
    pub fn postings(&self, term: &str) -> Result<Option<Vec<PostingsEntry>>, QueryError> {
        let Some(&idx) = self.by_term.get(term) else {
            return Ok(None);
        };
        let row = &self.rows[idx];

        let block_end = self
            .rows
            .get(idx + 1)
            .map(|next| next.offset)
            .unwrap_or(self.postings_file_size);
        let block_len = block_end - row.offset;

        let mut file = File::open(&self.postings_path)?;
        file.seek(SeekFrom::Start(row.offset))?;

        let mut buf = vec![0u8; block_len as usize];
        file.read_exact(&mut buf)?;

        let mut entries = Vec::with_capacity(block_len as usize / 8);
        for chunk in buf.chunks_exact(8) {
            let (doc_id, tf) = match self.byte_order {
                ByteOrder::Big => (
                    u32::from_be_bytes(chunk[0..4].try_into().unwrap()),
                    u32::from_be_bytes(chunk[4..8].try_into().unwrap()),
                ),
                ByteOrder::Little => (
                    u32::from_le_bytes(chunk[0..4].try_into().unwrap()),
                    u32::from_le_bytes(chunk[4..8].try_into().unwrap()),
                ),
            };
            entries.push(PostingsEntry {
                doc_id: crate::types::DocId(doc_id),
                tf,
            });
        }
        Ok(Some(entries))
    }
}

/// Load the document-length table into a `doc_id -> euclidean_length` map.
pub fn load_document_lengths(path: &Path) -> Result<HashMap<u32, f64>, QueryError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut map = HashMap::new();
    for row in reader.deserialize() {
        let row: DocumentLengthRow = row?;
        map.insert(row.doc_id, row.euclidean_length);
    }
    Ok(map)
}
