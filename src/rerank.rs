//! Rank fusion: merging several ranked candidate lists into one.
//!
//! Three strategies are available, selected through [`RerankerKind`]:
//!
//! - **RRF** (Reciprocal Rank Fusion): rank based, ignores distances.
//! - **RSF** (Relative Score Fusion): min-max normalizes each list's own distances.
//! - **DBSF** (Distribution-Based Score Fusion): normalizes distances against a
//!   caller-supplied `[min, max]` range per list.
//!
//! All strategies sum per-identity contributions across lists, keep the first-seen payload
//! of a duplicated candidate, and order the output by descending score with ties kept in
//! first-seen order.

mod accumulator;
pub mod config;
pub mod dbsf;
pub mod normalize;
pub mod rrf;
pub mod rsf;

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::Candidate;
use crate::error::{Result, TributaryError};

pub use self::config::{RerankerConfig, RerankerOptions, ScaleRange};
pub use self::dbsf::DbsfReranker;
pub use self::rrf::RrfReranker;
pub use self::rsf::RsfReranker;

/// Default RRF smoothing constant.
pub const DEFAULT_RRF_K: f64 = 50.0;

/// A candidate together with its fused score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

/// The closed set of fusion strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RerankerKind {
    ReciprocalRankFusion,
    RelativeScoreFusion,
    DistributionBasedScoreFusion,
}

impl RerankerKind {
    /// Canonical long name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RerankerKind::ReciprocalRankFusion => "reciprocal_rank_fusion",
            RerankerKind::RelativeScoreFusion => "relative_score_fusion",
            RerankerKind::DistributionBasedScoreFusion => "distribution_based_score_fusion",
        }
    }
}

impl FromStr for RerankerKind {
    type Err = TributaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rrf" | "reciprocal_rank_fusion" => Ok(RerankerKind::ReciprocalRankFusion),
            "rsf" | "relative_score_fusion" => Ok(RerankerKind::RelativeScoreFusion),
            "dbsf" | "distribution_based_score_fusion" => {
                Ok(RerankerKind::DistributionBasedScoreFusion)
            }
            other => Err(TributaryError::invalid_config(format!(
                "invalid reranker type: {other}"
            ))),
        }
    }
}

impl fmt::Display for RerankerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured fusion strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Reranker {
    Rrf(RrfReranker),
    Rsf(RsfReranker),
    Dbsf(DbsfReranker),
}

impl Reranker {
    /// Build the strategy for `kind`, taking the options it uses and ignoring the rest.
    pub fn from_kind(kind: RerankerKind, options: RerankerOptions) -> Result<Self> {
        options.validate()?;
        let reranker = match kind {
            RerankerKind::ReciprocalRankFusion => {
                Reranker::Rrf(RrfReranker::new(options.weights, options.k, options.limit))
            }
            RerankerKind::RelativeScoreFusion => Reranker::Rsf(RsfReranker::new(options.limit)),
            RerankerKind::DistributionBasedScoreFusion => Reranker::Dbsf(DbsfReranker::new(
                options.scale_ranges.unwrap_or_default(),
                options.limit,
            )),
        };
        Ok(reranker)
    }

    pub fn kind(&self) -> RerankerKind {
        match self {
            Reranker::Rrf(_) => RerankerKind::ReciprocalRankFusion,
            Reranker::Rsf(_) => RerankerKind::RelativeScoreFusion,
            Reranker::Dbsf(_) => RerankerKind::DistributionBasedScoreFusion,
        }
    }

    /// Check that this reranker can fuse `list_count` lists.
    pub fn validate(&self, list_count: usize) -> Result<()> {
        match self {
            Reranker::Rrf(r) => r.validate(list_count),
            Reranker::Rsf(_) => Ok(()),
            Reranker::Dbsf(r) => r.validate(list_count),
        }
    }

    /// Fuse `lists` and return candidates with their fused scores, best first.
    pub fn fuse(&self, lists: &[Vec<Candidate>]) -> Result<Vec<ScoredCandidate>> {
        let fused = match self {
            Reranker::Rrf(r) => r.fuse(lists)?,
            Reranker::Rsf(r) => r.fuse(lists),
            Reranker::Dbsf(r) => r.fuse(lists)?,
        };
        debug!(
            "{} fused {} lists into {} candidates",
            self.kind(),
            lists.len(),
            fused.len()
        );
        Ok(fused)
    }

    /// Fuse `lists` into one ranked list.
    pub fn rerank(&self, lists: &[Vec<Candidate>]) -> Result<Vec<Candidate>> {
        Ok(self
            .fuse(lists)?
            .into_iter()
            .map(|scored| scored.candidate)
            .collect())
    }
}

impl From<RrfReranker> for Reranker {
    fn from(r: RrfReranker) -> Self {
        Reranker::Rrf(r)
    }
}

impl From<RsfReranker> for Reranker {
    fn from(r: RsfReranker) -> Self {
        Reranker::Rsf(r)
    }
}

impl From<DbsfReranker> for Reranker {
    fn from(r: DbsfReranker) -> Self {
        Reranker::Dbsf(r)
    }
}
