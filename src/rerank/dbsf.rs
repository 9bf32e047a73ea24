//! Distribution-Based Score Fusion.
//!
//! Like RSF, but each list is normalized against a caller-supplied `[min, max]` range
//! (typically the observed distance distribution of that source) instead of the list's
//! own spread, so a list of uniformly poor matches stays poor.

use crate::data::Candidate;
use crate::error::{Result, TributaryError};
use crate::rerank::accumulator::FusionAccumulator;
use crate::rerank::config::check_scale_ranges;
use crate::rerank::normalize::distribution_scores;
use crate::rerank::{ScaleRange, ScoredCandidate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DbsfReranker {
    scale_ranges: Vec<ScaleRange>,
    limit: Option<usize>,
}

impl DbsfReranker {
    /// `scale_ranges[i]` is applied to the i-th fused list.
    pub fn new(scale_ranges: Vec<ScaleRange>, limit: Option<usize>) -> Self {
        Self {
            scale_ranges,
            limit,
        }
    }

    pub fn scale_ranges(&self) -> &[ScaleRange] {
        &self.scale_ranges
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn validate(&self, list_count: usize) -> Result<()> {
        check_scale_ranges(&self.scale_ranges)?;
        if self.scale_ranges.len() != list_count {
            return Err(TributaryError::invalid_config(format!(
                "the length of scale ranges ({}) should be equal to the number of candidate lists ({list_count})",
                self.scale_ranges.len()
            )));
        }
        Ok(())
    }

    pub fn fuse(&self, lists: &[Vec<Candidate>]) -> Result<Vec<ScoredCandidate>> {
        self.validate(lists.len())?;

        let mut acc = FusionAccumulator::new();
        for (list, range) in lists.iter().zip(&self.scale_ranges) {
            for (candidate, score) in list.iter().zip(distribution_scores(list, *range)) {
                acc.add(candidate, score);
            }
        }
        Ok(acc.into_ranked(self.limit))
    }
}
