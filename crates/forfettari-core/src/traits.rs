use crate::types::RetrievedChunk;

/// Anything that can score chunks against a free-text query.
///
/// Results are sorted by non-increasing score, every score is `>= min_score`
/// and at most `top_k` results are returned. An empty result is not an error.
pub trait Retriever: Send + Sync {
    fn search(&self, query: &str, top_k: usize, min_score: f64) -> Vec<RetrievedChunk>;
}

impl<R: Retriever + ?Sized> Retriever for &R {
    fn search(&self, query: &str, top_k: usize, min_score: f64) -> Vec<RetrievedChunk> {
        (**self).search(query, top_k, min_score)
    }
}

impl<R: Retriever + ?Sized> Retriever for std::sync::Arc<R> {
    fn search(&self, query: &str, top_k: usize, min_score: f64) -> Vec<RetrievedChunk> {
        (**self).search(query, top_k, min_score)
    }
}
