#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! forfettari-core
//!
//! Domain types, the error enum, configuration and corpus discovery shared by
//! the TF-IDF engine (`forfettari-text`) and the query layer (`forfettari-intent`).

pub mod config;
pub mod corpus;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::Retriever;
pub use types::{Chunk, Index, RetrievedChunk, SourceDocument, SparseVector};
