use serde::{Deserialize, Serialize};

use crate::error::{Result, TributaryError};
use crate::rerank::{DEFAULT_RRF_K, Reranker, RerankerKind};

fn default_k() -> f64 {
    DEFAULT_RRF_K
}

/// Expected `[min, max]` distance range of one source, used by DBSF.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

impl ScaleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl From<[f64; 2]> for ScaleRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<ScaleRange> for [f64; 2] {
    fn from(range: ScaleRange) -> Self {
        [range.min, range.max]
    }
}

impl From<(f64, f64)> for ScaleRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// Parameters shared by all reranker kinds; each kind reads the ones it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RerankerOptions {
    /// RRF per-list weights. If None, every list weighs 1.
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
    /// DBSF per-list distance ranges.
    #[serde(default)]
    pub scale_ranges: Option<Vec<ScaleRange>>,
    /// RRF smoothing constant.
    #[serde(default = "default_k")]
    pub k: f64,
    /// Maximum number of fused results. If None, all are returned.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Default for RerankerOptions {
    fn default() -> Self {
        Self {
            weights: None,
            scale_ranges: None,
            k: default_k(),
            limit: None,
        }
    }
}

impl RerankerOptions {
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_scale_ranges<I, R>(mut self, ranges: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<ScaleRange>,
    {
        self.scale_ranges = Some(ranges.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject values that would turn fused scores into NaN or infinity.
    pub(crate) fn validate(&self) -> Result<()> {
        check_k(self.k)?;
        if let Some(weights) = &self.weights {
            check_weights(weights)?;
        }
        if let Some(ranges) = &self.scale_ranges {
            check_scale_ranges(ranges)?;
        }
        Ok(())
    }
}

pub(crate) fn check_k(k: f64) -> Result<()> {
    if !k.is_finite() || k < 0.0 {
        return Err(TributaryError::invalid_config(format!(
            "k must be a finite, non-negative number, got {k}"
        )));
    }
    Ok(())
}

pub(crate) fn check_weights(weights: &[f64]) -> Result<()> {
    match weights.iter().find(|w| !w.is_finite()) {
        Some(w) => Err(TributaryError::invalid_config(format!(
            "weights must be finite, got {w}"
        ))),
        None => Ok(()),
    }
}

pub(crate) fn check_scale_ranges(ranges: &[ScaleRange]) -> Result<()> {
    match ranges
        .iter()
        .find(|r| !r.min.is_finite() || !r.max.is_finite())
    {
        Some(r) => Err(TributaryError::invalid_config(format!(
            "scale ranges must be finite, got [{}, {}]",
            r.min, r.max
        ))),
        None => Ok(()),
    }
}

/// Serializable reranker selection: a kind name plus its options.
///
/// ```
/// use tributary::rerank::RerankerConfig;
///
/// let config: RerankerConfig =
///     serde_json::from_str(r#"{"kind": "rrf", "weights": [2.0, 1.0], "k": 60}"#).unwrap();
/// let reranker = config.build().unwrap();
/// assert_eq!(reranker.kind().as_str(), "reciprocal_rank_fusion");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankerConfig {
    /// One of `rrf`, `rsf`, `dbsf` or their long names.
    pub kind: String,
    #[serde(flatten)]
    pub options: RerankerOptions,
}

impl RerankerConfig {
    pub fn new(kind: impl Into<String>, options: RerankerOptions) -> Self {
        Self {
            kind: kind.into(),
            options,
        }
    }

    pub fn build(&self) -> Result<Reranker> {
        let kind: RerankerKind = self.kind.parse()?;
        Reranker::from_kind(kind, self.options.clone())
    }
}
