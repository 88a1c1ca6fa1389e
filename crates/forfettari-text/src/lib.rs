//! forfettari-text
//!
//! TF-IDF chunking, indexing, persistence and cosine-similarity search over a
//! directory of plain-text documents. See `index`, `store` and `search`.

pub mod chunker;
pub mod index;
pub mod search;
pub mod shared;
pub mod store;
pub mod tokenize;

pub use index::TfIdfIndexer;
pub use search::TfIdfSearchEngine;
pub use shared::SharedIndex;
