pub mod config;
pub mod search;

use std::sync::Arc;

use futures::future::try_join_all;
use log::{debug, warn};

use crate::client::QueryClient;
use crate::data::Candidate;
use crate::error::{Result, TributaryError};
use crate::rerank::{Reranker, RerankerKind, RerankerOptions};
use crate::retriever::{Retriever, RetrieverConfig};

use self::config::SearchEngineConfig;
use self::search::SearchResult;

/// Multi-source search engine.
///
/// Holds an ordered set of retrievers and at most one reranker. A search queries every
/// retriever concurrently; a single list is returned as is, several lists are fused by the
/// reranker in registration order.
///
/// Configuration methods take `&mut self`, so an engine cannot be reconfigured while one of
/// its searches is in flight.
pub struct SearchEngine {
    client: Arc<dyn QueryClient>,
    retrievers: Vec<Retriever>,
    reranker: Option<Reranker>,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("retrievers", &self.retrievers)
            .field("reranker", &self.reranker)
            .finish_non_exhaustive()
    }
}

impl SearchEngine {
    /// Create an engine without retrievers, bound to `client`.
    pub fn new(client: Arc<dyn QueryClient>) -> Self {
        Self {
            client,
            retrievers: Vec::new(),
            reranker: None,
        }
    }

    /// Create an engine from a serialized configuration.
    ///
    /// Retrievers are registered in order, then the reranker (if any) is installed. With
    /// several retrievers the result must pass [`validate`](Self::validate); a single
    /// retriever never consults its reranker.
    pub fn from_config(client: Arc<dyn QueryClient>, config: &SearchEngineConfig) -> Result<Self> {
        let mut engine = Self::new(client);
        for retriever in &config.retrievers {
            engine.add_retriever(retriever.clone());
        }
        if let Some(reranker_config) = &config.reranker {
            engine.reranker = Some(reranker_config.build()?);
        }
        if engine.retrievers.len() > 1 {
            engine.validate()?;
        }
        Ok(engine)
    }

    /// Register a retriever.
    ///
    /// Any reranker set so far is cleared: it was configured for a different number of
    /// lists and must be set again.
    pub fn add_retriever(&mut self, config: RetrieverConfig) -> &mut Self {
        if let Some(previous) = self.reranker.take() {
            warn!(
                "adding retriever for table {} cleared the {} reranker; set it again",
                config.table,
                previous.kind()
            );
        }
        self.retrievers
            .push(Retriever::new(self.client.clone(), config));
        self
    }

    /// Install a reranker by kind name (`rrf`, `rsf`, `dbsf` or their long names).
    pub fn set_reranker(&mut self, kind: &str, options: RerankerOptions) -> Result<&mut Self> {
        let kind: RerankerKind = kind.parse()?;
        self.set_reranker_kind(kind, options)
    }

    pub fn set_reranker_kind(
        &mut self,
        kind: RerankerKind,
        options: RerankerOptions,
    ) -> Result<&mut Self> {
        self.reranker = Some(Reranker::from_kind(kind, options)?);
        Ok(self)
    }

    /// Install an already built reranker.
    ///
    /// Its values are checked by [`validate`](Self::validate) when a search runs.
    pub fn with_reranker(&mut self, reranker: impl Into<Reranker>) -> &mut Self {
        self.reranker = Some(reranker.into());
        self
    }

    pub fn retrievers(&self) -> &[Retriever] {
        &self.retrievers
    }

    pub fn reranker(&self) -> Option<&Reranker> {
        self.reranker.as_ref()
    }

    /// Check that a search can run, without issuing any query.
    pub fn validate(&self) -> Result<()> {
        match (self.retrievers.len(), &self.reranker) {
            (0, _) => Err(TributaryError::invalid_config(
                "no retriever added to the search engine",
            )),
            (1, _) => Ok(()),
            (_, None) => Err(TributaryError::invalid_config(
                "more than one retriever added to the search engine, but no reranker is set",
            )),
            (n, Some(reranker)) => reranker.validate(n),
        }
    }

    /// Search all retrievers and return the (fused) ranked candidates.
    pub async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
        let results = self.search_scored(query).await?;
        Ok(results.into_iter().map(|r| r.candidate).collect())
    }

    /// Like [`search`](Self::search), but keeps the fused score of each result.
    pub async fn search_scored(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.validate()?;

        debug!(
            "dispatching query to {} retrievers",
            self.retrievers.len()
        );
        let mut lists =
            try_join_all(self.retrievers.iter().map(|r| r.retrieve(query))).await?;

        match &self.reranker {
            Some(reranker) if lists.len() > 1 => Ok(reranker
                .fuse(&lists)?
                .into_iter()
                .map(SearchResult::from)
                .collect()),
            _ => {
                let list = lists.pop().unwrap_or_default();
                Ok(list.into_iter().map(SearchResult::from).collect())
            }
        }
    }
}
