use std::collections::HashMap;

use crate::data::{Candidate, CandidateId};
use crate::rerank::ScoredCandidate;

/// Per-identity score accumulator that remembers first-seen order.
///
/// The hash index only maps identities to positions in `entries`; iteration always follows
/// `entries`, so equal scores keep their encounter order after the stable sort.
#[derive(Debug, Default)]
pub(crate) struct FusionAccumulator {
    index: HashMap<CandidateId, usize>,
    entries: Vec<ScoredCandidate>,
}

impl FusionAccumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add `score` to the candidate's total. The first payload seen for an identity is kept.
    pub(crate) fn add(&mut self, candidate: &Candidate, score: f64) {
        match self.index.get(&candidate.id) {
            Some(&pos) => self.entries[pos].score += score,
            None => {
                self.index.insert(candidate.id.clone(), self.entries.len());
                self.entries.push(ScoredCandidate {
                    candidate: candidate.clone(),
                    score,
                });
            }
        }
    }

    /// Sort by descending score (stable) and truncate to `limit`.
    pub(crate) fn into_ranked(self, limit: Option<usize>) -> Vec<ScoredCandidate> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        entries
    }
}
