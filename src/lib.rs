//! # Tributary
//!
//! Multi-source retrieval and rank fusion for remote vector databases.
//!
//! ## Features
//!
//! - Any number of retrievers (keyword, dense vector, sparse vector, filtered) per engine
//! - Concurrent, fail-fast retrieval through a pluggable [`QueryClient`]
//! - Reciprocal Rank Fusion, Relative Score Fusion and Distribution-Based Score Fusion
//! - Serde-configurable engines
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tributary::{QueryClient, RerankerOptions, RetrieverConfig, SearchEngine};
//!
//! async fn example(client: Arc<dyn QueryClient>) -> tributary::Result<()> {
//!     let mut engine = SearchEngine::new(client);
//!     engine
//!         .add_retriever(RetrieverConfig::builder("Docs").query_index("DocIndex").build())
//!         .add_retriever(
//!             RetrieverConfig::builder("Docs")
//!                 .query_field("Embedding")
//!                 .query_vector(vec![0.35, 0.55, 0.47, 0.94])
//!                 .build(),
//!         )
//!         .set_reranker("rrf", RerankerOptions::default())?;
//!
//!     let candidates = engine.search("capital of germany").await?;
//!     for candidate in candidates {
//!         println!("{} {:?}", candidate.id, candidate.distance);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
mod data;
mod engine;
mod error;
pub mod rerank;
pub mod retriever;

// Re-exports for the public API
pub use client::{FacetConfig, QueryClient, QueryRequest, QueryResponse, QueryVector};
pub use data::{Candidate, CandidateId, DISTANCE_FIELD, DataValue, Record};
pub use engine::SearchEngine;
pub use engine::config::{SearchEngineConfig, SearchEngineConfigBuilder};
pub use engine::search::SearchResult;
pub use error::{Result, TributaryError};
pub use rerank::{
    DbsfReranker, Reranker, RerankerConfig, RerankerKind, RerankerOptions, RrfReranker,
    RsfReranker, ScaleRange, ScoredCandidate,
};
pub use retriever::{Retriever, RetrieverConfig, RetrieverConfigBuilder};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
