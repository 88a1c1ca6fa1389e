use std::sync::Arc;

use tracing::debug;

use forfettari_core::{Index, RetrievedChunk, Retriever, SparseVector};

use crate::index::normalize;
use crate::tokenize::{term_frequency, tokenize};

/// Cosine-similarity search over an immutable, shared [`Index`].
#[derive(Clone)]
pub struct TfIdfSearchEngine {
    index: Arc<Index>,
}

impl TfIdfSearchEngine {
    pub fn new(index: impl Into<Arc<Index>>) -> Self {
        Self { index: index.into() }
    }

    pub fn index(&self) -> &Index {
        &self.index
    }
}

impl Retriever for TfIdfSearchEngine {
    fn search(&self, query: &str, top_k: usize, min_score: f64) -> Vec<RetrievedChunk> {
        search(&self.index, query, top_k, min_score)
    }
}

/// Weight the query like a chunk, using the index's idf. Unknown terms are dropped.
pub fn query_vector(index: &Index, query: &str) -> SparseVector {
    let weighted: SparseVector = term_frequency(&tokenize(query))
        .into_iter()
        .filter_map(|(term, tf)| index.idf.get(&term).map(|idf| (term, tf * idf)))
        .collect();
    normalize(weighted)
}

/// Sparse dot product, walking whichever vector has fewer entries.
pub fn dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter_map(|(term, value)| large.get(term).map(|other| value * other)).sum()
}

/// Rank the chunks of `index` against `query`, highest score first.
///
/// Ties keep index order, so repeated calls return the same ranking.
pub fn search(index: &Index, query: &str, top_k: usize, min_score: f64) -> Vec<RetrievedChunk> {
    let query_vec = query_vector(index, query);
    if query_vec.is_empty() {
        debug!(query, "no known terms in query");
        return Vec::new();
    }

    let mut results: Vec<RetrievedChunk> = index
        .chunks
        .iter()
        .filter_map(|chunk| {
            let score = dot(&query_vec, &chunk.vector);
            (score >= min_score).then(|| RetrievedChunk {
                source: chunk.source.clone(),
                chunk_id: chunk.chunk_id,
                text: chunk.text.clone(),
                score,
            })
        })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(top_k);
    debug!(query, hits = results.len(), top_k, min_score, "search complete");
    results
}
