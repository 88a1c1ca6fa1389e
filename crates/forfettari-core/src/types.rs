//! Domain types shared by the indexer, the searcher and the intent layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse term → weight mapping.
///
/// Ordered so that a serialized index is byte-stable across rebuilds of the
/// same corpus. Keys of a chunk vector are always a subset of `Index::idf`.
pub type SparseVector = BTreeMap<String, f64>;

/// A chunk of a source document that is independently indexed.
///
/// - `source`: file name of the originating document, used verbatim in citations
/// - `chunk_id`: position within the source, contiguous from 0
/// - `text`: the trimmed text payload
/// - `vector`: L2-normalized TF-IDF weights (or all-zero/empty)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub source: String,
    pub chunk_id: usize,
    pub text: String,
    pub vector: SparseVector,
}

/// A fully built TF-IDF index. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub idf: SparseVector,
    pub chunks: Vec<Chunk>,
}

impl Index {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Distinct source names in chunk order.
    pub fn sources(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for chunk in &self.chunks {
            if !out.contains(&chunk.source.as_str()) {
                out.push(&chunk.source);
            }
        }
        out
    }
}

/// A chunk scored against one query. Transient, never persisted.
///
/// `score` is the cosine similarity of the query and chunk vectors, so it
/// lies in `[0, 1]` for non-negative weights. Higher is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub source: String,
    pub chunk_id: usize,
    pub text: String,
    pub score: f64,
}

impl RetrievedChunk {
    /// Identity of the underlying chunk, independent of the query.
    pub fn key(&self) -> (&str, usize) {
        (&self.source, self.chunk_id)
    }
}

/// One eligible corpus file read into memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub name: String,
    pub content: String,
}
