//! Reciprocal Rank Fusion: score = Σ weight_i / (k + rank_i + 1)
//!
//! Ranks are 0-based, so the best hit of a list with weight 1 contributes `1 / (k + 1)`.
//! Distances are ignored, which makes RRF the safe choice when sources score on
//! incomparable scales.

use crate::data::Candidate;
use crate::error::{Result, TributaryError};
use crate::rerank::accumulator::FusionAccumulator;
use crate::rerank::config::{check_k, check_weights};
use crate::rerank::{DEFAULT_RRF_K, ScoredCandidate};

#[derive(Debug, Clone, PartialEq)]
pub struct RrfReranker {
    weights: Option<Vec<f64>>,
    k: f64,
    limit: Option<usize>,
}

impl Default for RrfReranker {
    fn default() -> Self {
        Self::new(None, DEFAULT_RRF_K, None)
    }
}

impl RrfReranker {
    /// `weights` of None weighs every list 1, however many lists are fused.
    pub fn new(weights: Option<Vec<f64>>, k: f64, limit: Option<usize>) -> Self {
        Self { weights, k, limit }
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Check `k` and the weights, and that there is one weight per list.
    pub fn validate(&self, list_count: usize) -> Result<()> {
        check_k(self.k)?;
        match &self.weights {
            Some(weights) if weights.len() != list_count => {
                Err(TributaryError::invalid_config(format!(
                    "the length of weights ({}) should be equal to the number of candidate lists ({list_count})",
                    weights.len()
                )))
            }
            Some(weights) => check_weights(weights),
            None => Ok(()),
        }
    }

    pub fn fuse(&self, lists: &[Vec<Candidate>]) -> Result<Vec<ScoredCandidate>> {
        self.validate(lists.len())?;

        let mut acc = FusionAccumulator::new();
        for (i, list) in lists.iter().enumerate() {
            let weight = self.weights.as_ref().map_or(1.0, |w| w[i]);
            for (rank, candidate) in list.iter().enumerate() {
                acc.add(candidate, weight / (self.k + rank as f64 + 1.0));
            }
        }
        Ok(acc.into_ranked(self.limit))
    }
}
