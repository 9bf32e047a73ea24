use serde::{Deserialize, Serialize};

use crate::data::{Candidate, CandidateId};
use crate::rerank::ScoredCandidate;

/// One entry of a search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub candidate: Candidate,
    /// Fused score. None when the result came from a single retriever unfused.
    pub score: Option<f64>,
}

impl SearchResult {
    pub fn id(&self) -> &CandidateId {
        &self.candidate.id
    }

    pub fn distance(&self) -> Option<f64> {
        self.candidate.distance
    }
}

impl From<Candidate> for SearchResult {
    fn from(candidate: Candidate) -> Self {
        Self {
            candidate,
            score: None,
        }
    }
}

impl From<ScoredCandidate> for SearchResult {
    fn from(scored: ScoredCandidate) -> Self {
        Self {
            candidate: scored.candidate,
            score: Some(scored.score),
        }
    }
}
