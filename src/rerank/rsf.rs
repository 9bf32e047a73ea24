//! Relative Score Fusion.
//!
//! Each list's distances are min-max normalized against that list's own spread and
//! inverted, so every source contributes on a `[0, 1]` scale regardless of its native
//! distance metric. See [`relative_scores`] for the degenerate cases.

use crate::data::Candidate;
use crate::rerank::ScoredCandidate;
use crate::rerank::accumulator::FusionAccumulator;
use crate::rerank::normalize::relative_scores;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RsfReranker {
    limit: Option<usize>,
}

impl RsfReranker {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn fuse(&self, lists: &[Vec<Candidate>]) -> Vec<ScoredCandidate> {
        let mut acc = FusionAccumulator::new();
        for list in lists {
            for (candidate, score) in list.iter().zip(relative_scores(list)) {
                acc.add(candidate, score);
            }
        }
        acc.into_ranked(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CandidateId;

    #[test]
    fn test_scores_summed_across_lists() {
        let lists = vec![
            vec![
                Candidate::new(1).with_distance(0.1),
                Candidate::new(2).with_distance(0.5),
            ],
            vec![
                Candidate::new(2).with_distance(0.05),
                Candidate::new(3).with_distance(0.2),
            ],
        ];
        let fused = RsfReranker::default().fuse(&lists);

        // 1: 1.0, 2: 0.0 + 1.0, 3: 0.0 -> the 1.0 tie keeps 1 (seen first) ahead of 2.
        let ids: Vec<_> = fused.iter().map(|s| s.candidate.id.clone()).collect();
        assert_eq!(
            ids,
            vec![CandidateId::Int(1), CandidateId::Int(2), CandidateId::Int(3)]
        );
        assert_eq!(fused[0].score, 1.0);
        assert_eq!(fused[1].score, 1.0);
        assert_eq!(fused[2].score, 0.0);
    }

    #[test]
    fn test_single_member_and_equal_distance_lists() {
        let lists = vec![
            vec![Candidate::new("a").with_distance(0.9)],
            vec![
                Candidate::new("b").with_distance(0.3),
                Candidate::new("c").with_distance(0.3),
            ],
        ];
        let fused = RsfReranker::default().fuse(&lists);
        assert_eq!(fused.len(), 3);
        assert!(fused.iter().all(|s| s.score == 1.0));
    }

    #[test]
    fn test_first_seen_payload_kept() {
        let lists = vec![
            vec![
                Candidate::new(7).with_distance(0.4).add_field("from", "first"),
                Candidate::new(8).with_distance(0.8),
            ],
            vec![
                Candidate::new(7).with_distance(0.1).add_field("from", "second"),
                Candidate::new(9).with_distance(0.2),
            ],
        ];
        let fused = RsfReranker::new(Some(1)).fuse(&lists);

        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].candidate.id, CandidateId::Int(7));
        assert_eq!(fused[0].score, 2.0);
        assert_eq!(fused[0].candidate.distance, Some(0.4));
        assert_eq!(
            fused[0].candidate.get("from").and_then(|v| v.as_text()),
            Some("first")
        );
    }

    #[test]
    fn test_scores_stay_in_range_per_list() {
        let lists = vec![vec![
            Candidate::new(1).with_distance(0.12),
            Candidate::new(2).with_distance(0.37),
            Candidate::new(3).with_distance(0.81),
            Candidate::new(4),
        ]];
        let fused = RsfReranker::default().fuse(&lists);
        assert!(fused.iter().all(|s| (0.0..=1.0).contains(&s.score)));
        assert!(fused.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
