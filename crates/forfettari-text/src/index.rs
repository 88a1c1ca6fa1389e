use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use forfettari_core::config::ChunkingConfig;
use forfettari_core::corpus::read_documents;
use forfettari_core::{Chunk, Index, Result, SourceDocument, SparseVector};

use crate::chunker::chunk;
use crate::tokenize::{term_frequency, tokenize};

/// Builds a complete TF-IDF [`Index`] from source documents in one pass.
pub struct TfIdfIndexer {
    chunking: ChunkingConfig,
}

impl TfIdfIndexer {
    /// Fails with `InvalidConfiguration` when `overlap >= chunk_size`.
    pub fn new(chunking: ChunkingConfig) -> Result<Self> {
        chunking.validate()?;
        Ok(Self { chunking })
    }

    /// Read every eligible `.txt` file of `dir` and index it.
    ///
    /// Nothing is written anywhere; persisting is left to [`crate::store::save`],
    /// so a failed build leaves any previous index file untouched.
    pub fn build_from_directory(&self, dir: &Path, aggregate_file: &str) -> Result<Index> {
        let documents = read_documents(dir, aggregate_file)?;
        self.build(&documents)
    }

    pub fn build(&self, documents: &[SourceDocument]) -> Result<Index> {
        let mut raw: Vec<(&str, usize, String)> = Vec::new();
        for document in documents {
            for (chunk_id, text) in chunk(&document.content, &self.chunking)?.into_iter().enumerate() {
                raw.push((&document.name, chunk_id, text));
            }
        }

        let chunk_tf: Vec<HashMap<String, f64>> =
            raw.iter().map(|(_, _, text)| term_frequency(&tokenize(text))).collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tf in &chunk_tf {
            for term in tf.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let num_chunks = raw.len() as f64;
        let idf: SparseVector = doc_freq
            .into_iter()
            .map(|(term, df)| (term.to_string(), smoothed_idf(num_chunks, df as f64)))
            .collect();

        let chunks: Vec<Chunk> = raw
            .into_iter()
            .zip(chunk_tf)
            .map(|((source, chunk_id, text), tf)| {
                let weighted: SparseVector = tf
                    .into_iter()
                    .map(|(term, tf_value)| {
                        let weight = tf_value * idf.get(&term).copied().unwrap_or(0.0);
                        (term, weight)
                    })
                    .collect();
                Chunk { source: source.to_string(), chunk_id, text, vector: normalize(weighted) }
            })
            .collect();

        info!(documents = documents.len(), chunks = chunks.len(), terms = idf.len(), "built TF-IDF index");
        Ok(Index { idf, chunks })
    }
}

/// `ln((N + 1) / (df + 1)) + 1`: never below 1, larger for rarer terms.
fn smoothed_idf(num_chunks: f64, df: f64) -> f64 {
    ((num_chunks + 1.0) / (df + 1.0)).ln() + 1.0
}

/// Scale `vector` to unit Euclidean norm. A zero vector is returned unchanged.
pub fn normalize(mut vector: SparseVector) -> SparseVector {
    let norm = vector.values().map(|v| v * v).sum::<f64>().sqrt();
    if norm == 0.0 {
        return vector;
    }
    for value in vector.values_mut() {
        *value /= norm;
    }
    vector
}
