//! The query capability the engine retrieves through.
//!
//! Transport is out of scope for this crate: applications implement [`QueryClient`] on top
//! of whatever HTTP client, connection pool and retry policy they use, and the engine only
//! ever calls [`QueryClient::query`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::data::Record;
use crate::error::Result;

/// Status code of a successful query response.
pub const STATUS_OK: u16 = 200;

/// Query vector, dense or sparse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryVector {
    Dense(Vec<f32>),
    Sparse { indices: Vec<u32>, values: Vec<f32> },
}

impl From<Vec<f32>> for QueryVector {
    fn from(v: Vec<f32>) -> Self {
        QueryVector::Dense(v)
    }
}

/// Facet aggregation requested alongside a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<String>>,
    pub aggregate: Vec<String>,
}

/// Payload of one query against a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_vector: Option<QueryVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Vec<String>>,
    pub limit: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default)]
    pub with_distance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<FacetConfig>>,
}

/// Response of a query.
///
/// `result` holds the matched records in rank order. A `status_code` other than
/// [`STATUS_OK`] marks the response as failed and `message` explains why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: Vec<Record>,
}

impl QueryResponse {
    /// A successful response carrying `records`.
    pub fn ok(records: Vec<Record>) -> Self {
        Self {
            status_code: STATUS_OK,
            message: String::new(),
            result: records,
        }
    }

    /// A failed response with the given status and message.
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            result: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

/// The single capability the engine needs from a database client.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Run `request` against `table`.
    ///
    /// Transport failures are reported as `Err`; the database reporting an error is reported
    /// as a response whose status is not [`STATUS_OK`]. The engine treats both as retrieval
    /// failures.
    async fn query(&self, table: &str, request: QueryRequest) -> Result<QueryResponse>;
}
