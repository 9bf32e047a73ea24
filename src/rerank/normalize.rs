//! Distance normalization shared by the score-based fusion strategies.
//!
//! Both functions return one score per candidate, in list order, inside `[0, 1]` with `1`
//! as the best match (smallest distance).

use crate::data::Candidate;
use crate::rerank::ScaleRange;

/// Min-max normalize a list against its own distance spread, inverted.
///
/// Lists with fewer than two members, without any distance, or whose distances are all
/// equal carry no spread: every member scores 1. A missing distance counts as the list's
/// maximum.
pub fn relative_scores(list: &[Candidate]) -> Vec<f64> {
    if list.len() < 2 {
        return vec![1.0; list.len()];
    }

    let (min, max) = match distance_bounds(list) {
        Some(bounds) => bounds,
        None => return vec![1.0; list.len()],
    };
    if max == min {
        return vec![1.0; list.len()];
    }

    list.iter()
        .map(|c| {
            let distance = c.distance.unwrap_or(max);
            1.0 - (distance - min) / (max - min)
        })
        .collect()
}

/// Normalize distances against a fixed range, clamped and inverted.
///
/// A degenerate range (`min == max`) scores every member 1. A missing distance scores 0.
pub fn distribution_scores(list: &[Candidate], range: ScaleRange) -> Vec<f64> {
    let ScaleRange { min, max } = range;
    if max == min {
        return vec![1.0; list.len()];
    }

    list.iter()
        .map(|c| {
            let normalized = match c.distance {
                Some(distance) => ((distance - min) / (max - min)).clamp(0.0, 1.0),
                None => 1.0,
            };
            1.0 - normalized
        })
        .collect()
}

fn distance_bounds(list: &[Candidate]) -> Option<(f64, f64)> {
    list.iter()
        .filter_map(|c| c.distance)
        .fold(None, |bounds, d| match bounds {
            None => Some((d, d)),
            Some((min, max)) => Some((f64::min(min, d), f64::max(max, d))),
        })
}
