use std::collections::{HashMap, HashSet};

use forfettari_core::config::RetrievalConfig;
use forfettari_core::RetrievedChunk;

/// Fan-out limits and the diversity-first merge policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergePolicy {
    pub primary_top_k: usize,
    pub primary_min_score: f64,
    pub expansion_top_k: usize,
    pub expansion_min_score: f64,
    /// Leading slots that only accept a source not already selected.
    pub diverse_slots: usize,
    pub final_top_k: usize,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self::from(&RetrievalConfig::default())
    }
}

impl From<&RetrievalConfig> for MergePolicy {
    fn from(c: &RetrievalConfig) -> Self {
        Self {
            primary_top_k: c.primary_top_k,
            primary_min_score: c.primary_min_score,
            expansion_top_k: c.expansion_top_k,
            expansion_min_score: c.expansion_min_score,
            diverse_slots: c.diverse_slots,
            final_top_k: c.final_top_k,
        }
    }
}

/// Combine several result sets into one ranked list.
///
/// Duplicates of a `(source, chunk_id)` keep their best score. The first
/// `diverse_slots` picks take the best chunk of each not-yet-seen source,
/// the remaining slots up to `final_top_k` follow plain score order.
pub fn merge_results<I>(result_sets: I, policy: &MergePolicy) -> Vec<RetrievedChunk>
where
    I: IntoIterator<Item = Vec<RetrievedChunk>>,
{
    // merge unique ids, prioritize better score
    let mut best: Vec<RetrievedChunk> = Vec::new();
    let mut position: HashMap<(String, usize), usize> = HashMap::new();
    for hit in result_sets.into_iter().flatten() {
        match position.get(&(hit.source.clone(), hit.chunk_id)) {
            Some(&i) => {
                if hit.score > best[i].score {
                    best[i] = hit;
                }
            }
            None => {
                position.insert((hit.source.clone(), hit.chunk_id), best.len());
                best.push(hit);
            }
        }
    }
    best.sort_by(|a, b| b.score.total_cmp(&a.score));

    let limit = policy.final_top_k;
    let mut taken = vec![false; best.len()];
    let mut order: Vec<usize> = Vec::with_capacity(limit.min(best.len()));

    let mut seen_sources: HashSet<&str> = HashSet::new();
    for (i, hit) in best.iter().enumerate() {
        if order.len() >= policy.diverse_slots.min(limit) {
            break;
        }
        if seen_sources.insert(hit.source.as_str()) {
            taken[i] = true;
            order.push(i);
        }
    }

    for (i, flag) in taken.iter_mut().enumerate() {
        if order.len() >= limit {
            break;
        }
        if !*flag {
            *flag = true;
            order.push(i);
        }
    }

    let mut slots: Vec<Option<RetrievedChunk>> = best.into_iter().map(Some).collect();
    order.into_iter().filter_map(|i| slots[i].take()).collect()
}
