//! A single query source feeding ranked candidates into the engine.

pub mod config;

use std::sync::Arc;

use log::trace;

use crate::client::{QueryClient, QueryRequest};
use crate::data::{Candidate, CandidateId, DISTANCE_FIELD, Record};
use crate::error::{Result, TributaryError};

pub use self::config::{RetrieverConfig, RetrieverConfigBuilder};

/// Turns a query into a ranked candidate list through one [`QueryClient`] call.
#[derive(Clone)]
pub struct Retriever {
    client: Arc<dyn QueryClient>,
    config: RetrieverConfig,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Retriever {
    pub fn new(client: Arc<dyn QueryClient>, config: RetrieverConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    pub fn table(&self) -> &str {
        &self.config.table
    }

    /// Build the request for `query`. Distances are always requested.
    pub fn build_request(&self, query: &str) -> QueryRequest {
        QueryRequest {
            query: Some(query.to_string()),
            query_index: self.config.query_index.clone(),
            query_field: self.config.query_field.clone(),
            query_vector: self.config.query_vector.clone(),
            response: self.config.response.clone(),
            limit: self.config.limit,
            filter: (!self.config.filter.is_empty()).then(|| self.config.filter.clone()),
            with_distance: true,
            facets: self.config.facets.clone(),
        }
    }

    /// Retrieve candidates for `query`, best match first.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<Candidate>> {
        let table = self.table();
        let response = self
            .client
            .query(table, self.build_request(query))
            .await
            .map_err(|err| match err {
                TributaryError::Retrieval { .. } => err,
                other => TributaryError::retrieval(table, other.to_string()),
            })?;

        if !response.is_success() {
            let message = if response.message.is_empty() {
                format!("status {}", response.status_code)
            } else {
                response.message
            };
            return Err(TributaryError::retrieval(table, message));
        }

        trace!("table {table} returned {} records", response.result.len());

        response
            .result
            .into_iter()
            .map(|record| self.to_candidate(record))
            .collect()
    }

    fn to_candidate(&self, mut record: Record) -> Result<Candidate> {
        let key_field = &self.config.primary_key_field;
        let key = record
            .get(key_field)
            .ok_or_else(|| TributaryError::missing_key(self.table(), key_field))?;
        let id = CandidateId::from_value(key)
            .ok_or_else(|| TributaryError::invalid_key(self.table(), key_field))?;

        // Only a numeric distance leaves the payload, and never when it is the primary key.
        let distance = record.get(DISTANCE_FIELD).and_then(|v| v.as_float());
        if distance.is_some() && key_field != DISTANCE_FIELD {
            record.remove(DISTANCE_FIELD);
        }

        Ok(Candidate {
            id,
            distance,
            fields: record,
        })
    }
}
