//! forfettari-intent
//!
//! Question-level layer over a [`forfettari_core::Retriever`]: canned answers
//! for known question shapes, keyword-driven query expansion, fan-out search
//! and a source-diverse merge of the results.

pub mod canned;
pub mod classify;
pub mod coefficient;
pub mod context;
pub mod engine;
pub mod expand;
pub mod merge;

pub use canned::{CannedAnswer, CannedRule};
pub use engine::{Answer, QueryEngine};
pub use merge::{merge_results, MergePolicy};
