use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use forfettari_core::{Index, RetrievedChunk, Retriever};

use crate::search::search;

/// Handle to the index currently being served.
///
/// Readers take an `Arc` snapshot and search it without holding the lock.
/// A rebuilt index is built elsewhere and published with a single swap, so
/// a query never sees a half-built index.
#[derive(Default)]
pub struct SharedIndex {
    current: RwLock<Arc<Index>>,
}

impl SharedIndex {
    pub fn new(index: Index) -> Self {
        Self { current: RwLock::new(Arc::new(index)) }
    }

    pub fn snapshot(&self) -> Arc<Index> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replace the served index, returning the previous one.
    pub fn publish(&self, index: Index) -> Arc<Index> {
        let next = Arc::new(index);
        info!(chunks = next.len(), "publishing rebuilt index");
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}

impl Retriever for SharedIndex {
    fn search(&self, query: &str, top_k: usize, min_score: f64) -> Vec<RetrievedChunk> {
        search(&self.snapshot(), query, top_k, min_score)
    }
}
