//! Shared test double for the query capability.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use tributary::{
    DISTANCE_FIELD, DataValue, QueryClient, QueryRequest, QueryResponse, Record, TributaryError,
};

enum Answer {
    Records(Vec<Record>),
    Status(u16, String),
    Failure(String),
}

struct TableSetup {
    answer: Answer,
    delay: Duration,
}

/// In-memory query client answering per table, with optional artificial latency.
#[derive(Default)]
pub struct MockClient {
    tables: HashMap<String, TableSetup>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, QueryRequest)>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, table: &str, records: Vec<Record>) -> Self {
        self.tables.insert(
            table.to_string(),
            TableSetup {
                answer: Answer::Records(records),
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn with_status(mut self, table: &str, status: u16, message: &str) -> Self {
        self.tables.insert(
            table.to_string(),
            TableSetup {
                answer: Answer::Status(status, message.to_string()),
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn with_failure(mut self, table: &str, message: &str) -> Self {
        self.tables.insert(
            table.to_string(),
            TableSetup {
                answer: Answer::Failure(message.to_string()),
                delay: Duration::ZERO,
            },
        );
        self
    }

    /// Delay every answer for `table`. Must be called after the table is set up.
    pub fn with_delay(mut self, table: &str, delay: Duration) -> Self {
        if let Some(setup) = self.tables.get_mut(table) {
            setup.delay = delay;
        }
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, QueryRequest)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryClient for MockClient {
    async fn query(&self, table: &str, request: QueryRequest) -> tributary::Result<QueryResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((table.to_string(), request));

        let setup = self
            .tables
            .get(table)
            .ok_or_else(|| TributaryError::retrieval(table, "unknown table"))?;
        if !setup.delay.is_zero() {
            tokio::time::sleep(setup.delay).await;
        }

        match &setup.answer {
            Answer::Records(records) => Ok(QueryResponse::ok(records.clone())),
            Answer::Status(status, message) => Ok(QueryResponse::error(*status, message.clone())),
            Answer::Failure(message) => Err(TributaryError::retrieval(table, message.clone())),
        }
    }
}

/// A record with an integer `ID` and a distance.
pub fn hit(id: i64, distance: f64) -> Record {
    let mut record = Record::new();
    record.insert("ID".to_string(), DataValue::Int64(id));
    record.insert(DISTANCE_FIELD.to_string(), DataValue::Float64(distance));
    record
}

/// A record with an integer `ID`, a `Doc` field and no distance.
pub fn doc(id: i64, text: &str) -> Record {
    let mut record = Record::new();
    record.insert("ID".to_string(), DataValue::Int64(id));
    record.insert("Doc".to_string(), DataValue::from(text));
    record
}
