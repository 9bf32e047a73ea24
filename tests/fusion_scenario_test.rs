mod common;

use std::time::Duration;

use common::{MockClient, hit};
use tributary::{CandidateId, RerankerOptions, RetrieverConfig, SearchEngine, SearchResult};

fn score_of(results: &[SearchResult], id: i64) -> f64 {
    results
        .iter()
        .find(|r| *r.id() == CandidateId::Int(id))
        .and_then(|r| r.score)
        .unwrap()
}

fn int_ids(results: &[SearchResult]) -> Vec<i64> {
    results
        .iter()
        .map(|r| match r.id() {
            CandidateId::Int(i) => *i,
            other => panic!("unexpected id {other}"),
        })
        .collect()
}

fn two_source_engine(client: std::sync::Arc<MockClient>) -> SearchEngine {
    let mut engine = SearchEngine::new(client);
    engine
        .add_retriever(RetrieverConfig::new("Keyword"))
        .add_retriever(RetrieverConfig::new("Vector"));
    engine
}

fn scenario_client() -> MockClient {
    MockClient::new()
        .with_records("Keyword", vec![hit(1, 0.1), hit(2, 0.5)])
        .with_records("Vector", vec![hit(2, 0.05), hit(3, 0.2)])
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rrf_end_to_end_scores() -> tributary::Result<()> {
    let mut engine = two_source_engine(scenario_client().into_arc());
    engine.set_reranker(
        "rrf",
        RerankerOptions::default()
            .with_weights(vec![1.0, 1.0])
            .with_k(50.0),
    )?;

    let results = engine.search_scored("capital").await?;

    assert_eq!(int_ids(&results), vec![2, 1, 3]);
    // 2 sits at rank 1 of the first list and rank 0 of the second.
    assert_eq!(score_of(&results, 2), 1.0 / 52.0 + 1.0 / 51.0);
    assert_eq!(score_of(&results, 1), 1.0 / 51.0);
    assert_eq!(score_of(&results, 3), 1.0 / 52.0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fusion_follows_registration_not_completion_order() -> tributary::Result<()> {
    let options = RerankerOptions::default().with_weights(vec![1.0, 0.0]);

    let mut first_finishes_first = two_source_engine(
        scenario_client()
            .with_delay("Vector", Duration::from_millis(150))
            .into_arc(),
    );
    first_finishes_first.set_reranker("rrf", options.clone())?;

    let mut second_finishes_first = two_source_engine(
        scenario_client()
            .with_delay("Keyword", Duration::from_millis(150))
            .into_arc(),
    );
    second_finishes_first.set_reranker("rrf", options)?;

    let a = first_finishes_first.search_scored("q").await?;
    let b = second_finishes_first.search_scored("q").await?;

    assert_eq!(a, b);
    // Only the Keyword list carries weight, so its order must survive.
    assert_eq!(int_ids(&a), vec![1, 2, 3]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rsf_end_to_end() -> tributary::Result<()> {
    let mut engine = two_source_engine(scenario_client().into_arc());
    engine.set_reranker("relative_score_fusion", RerankerOptions::default())?;

    let results = engine.search_scored("q").await?;

    // 1 and 2 tie at 1.0; 1 was seen first.
    assert_eq!(int_ids(&results), vec![1, 2, 3]);
    assert_eq!(score_of(&results, 1), 1.0);
    assert_eq!(score_of(&results, 2), 1.0);
    assert_eq!(score_of(&results, 3), 0.0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dbsf_end_to_end() -> tributary::Result<()> {
    let mut engine = two_source_engine(scenario_client().into_arc());
    engine.set_reranker(
        "distribution_based_score_fusion",
        RerankerOptions::default()
            .with_scale_ranges([(0.0, 1.0), (0.0, 0.5)])
            .with_limit(2),
    )?;

    let results = engine.search_scored("q").await?;

    // 1: 0.9, 2: 0.5 + 0.9, 3: 0.6
    assert_eq!(int_ids(&results), vec![2, 1]);
    assert!((score_of(&results, 2) - 1.4).abs() < 1e-12);
    assert!((score_of(&results, 1) - 0.9).abs() < 1e-12);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fused_payload_is_first_seen() -> tributary::Result<()> {
    let mut engine = two_source_engine(scenario_client().into_arc());
    engine.set_reranker("rrf", RerankerOptions::default())?;

    let candidates = engine.search("q").await?;
    let two = candidates
        .iter()
        .find(|c| c.id == CandidateId::Int(2))
        .unwrap();
    // Distance from the Keyword list, where 2 was first encountered.
    assert_eq!(two.distance, Some(0.5));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_three_sources_with_empty_list() -> tributary::Result<()> {
    let client = scenario_client().with_records("Empty", Vec::new()).into_arc();
    let mut engine = two_source_engine(client);
    engine
        .add_retriever(RetrieverConfig::new("Empty"))
        .set_reranker("rsf", RerankerOptions::default())?;

    let results = engine.search_scored("q").await?;
    assert_eq!(results.len(), 3);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    Ok(())
}
