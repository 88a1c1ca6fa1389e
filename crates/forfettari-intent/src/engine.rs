use serde::Serialize;
use tracing::{debug, info};

use forfettari_core::{RetrievedChunk, Retriever};

use crate::canned::{answer_for, CannedAnswer};
use crate::expand::expansion_queries;
use crate::merge::{merge_results, MergePolicy};

/// Outcome of a question: a fixed answer, or passages for the completion layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    Canned(CannedAnswer),
    Retrieved { chunks: Vec<RetrievedChunk> },
}

/// Canned-answer check, intent expansion, fan-out search and merge over any [`Retriever`].
pub struct QueryEngine<R>
where
    R: Retriever,
{
    retriever: R,
    policy: MergePolicy,
}

impl<R> QueryEngine<R>
where
    R: Retriever,
{
    pub fn new(retriever: R, policy: MergePolicy) -> Self {
        Self { retriever, policy }
    }

    pub fn policy(&self) -> &MergePolicy {
        &self.policy
    }

    pub fn answer(&self, question: &str) -> Answer {
        let lowered = question.to_lowercase();
        if let Some(canned) = answer_for(&lowered) {
            info!(rule = ?canned.rule, "answered from canned rule");
            return Answer::Canned(canned);
        }
        Answer::Retrieved { chunks: self.retrieve_lowered(question, &lowered) }
    }

    /// Retrieval path only, without the canned-answer check.
    pub fn retrieve(&self, question: &str) -> Vec<RetrievedChunk> {
        self.retrieve_lowered(question, &question.to_lowercase())
    }

    fn retrieve_lowered(&self, question: &str, lowered: &str) -> Vec<RetrievedChunk> {
        let p = &self.policy;
        let mut result_sets = vec![self.retriever.search(question, p.primary_top_k, p.primary_min_score)];
        let expansions = expansion_queries(lowered);
        for extra in &expansions {
            result_sets.push(self.retriever.search(extra, p.expansion_top_k, p.expansion_min_score));
        }
        debug!(expansions = expansions.len(), sets = result_sets.len(), "fan-out search done");
        let merged = merge_results(result_sets, p);
        info!(hits = merged.len(), "retrieved passages");
        merged
    }
}
