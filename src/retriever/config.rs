use serde::{Deserialize, Serialize};

use crate::client::{FacetConfig, QueryVector};

fn default_primary_key_field() -> String {
    "ID".to_string()
}

fn default_limit() -> usize {
    2
}

/// Configuration of a single retriever.
///
/// Fixed once handed to a [`Retriever`](crate::retriever::Retriever); the query text is the
/// only per-search input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieverConfig {
    /// Table to query.
    pub table: String,
    /// Field whose value becomes the candidate identity.
    #[serde(default = "default_primary_key_field")]
    pub primary_key_field: String,
    /// Index to run a text query against.
    #[serde(default)]
    pub query_index: Option<String>,
    /// Vector field to search.
    #[serde(default)]
    pub query_field: Option<String>,
    /// Pre-computed query vector.
    #[serde(default)]
    pub query_vector: Option<QueryVector>,
    /// Fields to return. If None, all fields are returned.
    #[serde(default)]
    pub response: Option<Vec<String>>,
    /// Maximum number of records to fetch.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Filter expression; empty means no filter.
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub facets: Option<Vec<FacetConfig>>,
}

impl RetrieverConfig {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_key_field: default_primary_key_field(),
            query_index: None,
            query_field: None,
            query_vector: None,
            response: None,
            limit: default_limit(),
            filter: String::new(),
            facets: None,
        }
    }

    pub fn builder(table: impl Into<String>) -> RetrieverConfigBuilder {
        RetrieverConfigBuilder {
            config: Self::new(table),
        }
    }
}

pub struct RetrieverConfigBuilder {
    config: RetrieverConfig,
}

impl RetrieverConfigBuilder {
    pub fn primary_key_field(mut self, field: impl Into<String>) -> Self {
        self.config.primary_key_field = field.into();
        self
    }

    pub fn query_index(mut self, index: impl Into<String>) -> Self {
        self.config.query_index = Some(index.into());
        self
    }

    pub fn query_field(mut self, field: impl Into<String>) -> Self {
        self.config.query_field = Some(field.into());
        self
    }

    pub fn query_vector(mut self, vector: impl Into<QueryVector>) -> Self {
        self.config.query_vector = Some(vector.into());
        self
    }

    /// Restrict the returned fields.
    ///
    /// The primary-key field must be among them, otherwise every record fails identity
    /// extraction.
    pub fn response<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.response = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.config.filter = filter.into();
        self
    }

    pub fn add_facet(mut self, facet: FacetConfig) -> Self {
        self.config.facets.get_or_insert_with(Vec::new).push(facet);
        self
    }

    pub fn build(self) -> RetrieverConfig {
        self.config
    }
}
