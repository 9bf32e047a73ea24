use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rerank::RerankerConfig;
use crate::retriever::RetrieverConfig;

/// Serializable description of a whole search engine.
///
/// ```
/// use tributary::SearchEngineConfig;
///
/// let config = SearchEngineConfig::from_json(r#"{
///     "retrievers": [
///         {"table": "Docs", "queryIndex": "DocIndex", "limit": 10},
///         {"table": "Docs", "queryField": "Embedding", "queryVector": [0.1, 0.2], "limit": 10}
///     ],
///     "reranker": {"kind": "rrf", "k": 60}
/// }"#).unwrap();
///
/// assert_eq!(config.retrievers.len(), 2);
/// assert_eq!(config.retrievers[0].primary_key_field, "ID");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchEngineConfig {
    /// Retrievers in registration order. Fusion inputs follow this order.
    #[serde(default)]
    pub retrievers: Vec<RetrieverConfig>,
    /// Reranker to fuse the retrievers' lists with.
    #[serde(default)]
    pub reranker: Option<RerankerConfig>,
}

impl SearchEngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> SearchEngineConfigBuilder {
        SearchEngineConfigBuilder::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Default)]
pub struct SearchEngineConfigBuilder {
    retrievers: Vec<RetrieverConfig>,
    reranker: Option<RerankerConfig>,
}

impl SearchEngineConfigBuilder {
    pub fn add_retriever(mut self, config: RetrieverConfig) -> Self {
        self.retrievers.push(config);
        self
    }

    pub fn reranker(mut self, config: RerankerConfig) -> Self {
        self.reranker = Some(config);
        self
    }

    pub fn build(self) -> SearchEngineConfig {
        SearchEngineConfig {
            retrievers: self.retrievers,
            reranker: self.reranker,
        }
    }
}
