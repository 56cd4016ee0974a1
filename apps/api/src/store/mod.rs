//! Document store port.
//!
//! Every component that reads or writes persisted data goes through
//! `DocumentStore`. Documents are JSON objects addressed by slash-separated
//! paths (`companies/acme-corp/designations/sde3-frontend`); a document's
//! collection is its path minus the last segment.
//!
//! Multi-document writes are expressed as a `WriteBatch` and committed with
//! `DocumentStore::commit`, which is all-or-nothing in every adapter.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod memory;
pub mod paths;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid document path: {0}")]
    InvalidPath(String),

    #[error("Document data must be a JSON object: {0}")]
    NotAnObject(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A stored document: its id (last path segment), full path, and data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: String,
    pub path: String,
    pub data: Value,
}

impl Document {
    /// Deserializes the data into a typed model. Unknown fields are ignored.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> StoreResult<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }

    /// The data object with an `id` field added, as returned by GET endpoints.
    pub fn with_id(&self) -> Value {
        let mut data = self.data.clone();
        if let Value::Object(map) = &mut data {
            map.insert("id".to_string(), Value::String(self.id.clone()));
        }
        data
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    /// Top-level field merge: fields absent from the incoming object survive.
    Merge,
    /// Replace the whole document.
    Overwrite,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Set {
        path: String,
        data: Value,
        mode: SetMode,
    },
    Delete {
        path: String,
    },
}

impl WriteOp {
    pub fn path(&self) -> &str {
        match self {
            WriteOp::Set { path, .. } | WriteOp::Delete { path } => path,
        }
    }
}

/// An ordered list of writes committed atomically.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, path: impl Into<String>, data: Value) -> &mut Self {
        self.ops.push(WriteOp::Set {
            path: path.into(),
            data,
            mode: SetMode::Overwrite,
        });
        self
    }

    pub fn merge(&mut self, path: impl Into<String>, data: Value) -> &mut Self {
        self.ops.push(WriteOp::Set {
            path: path.into(),
            data,
            mode: SetMode::Merge,
        });
        self
    }

    pub fn delete(&mut self, path: impl Into<String>) -> &mut Self {
        self.ops.push(WriteOp::Delete { path: path.into() });
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Equality filters plus optional ascending order and paging over one collection.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    pub fn page(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }

    /// True when every filter matches a top-level field of `data`.
    pub fn matches(&self, data: &Value) -> bool {
        self.filters
            .iter()
            .all(|(field, expected)| data.get(field) == Some(expected))
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, path: &str) -> StoreResult<Option<Document>>;

    /// All documents directly inside `collection`, ordered by id.
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>>;

    /// Number of documents in `collection` matching the query's filters.
    /// Ordering and paging are ignored.
    async fn count(&self, collection: &str, query: &Query) -> StoreResult<u64>;

    /// Applies every op in the batch, or none of them.
    async fn commit(&self, batch: WriteBatch) -> StoreResult<()>;
}

/// Top-level merge of `incoming` onto `existing`.
pub fn merge_objects(existing: &mut Map<String, Value>, incoming: &Map<String, Value>) {
    for (key, value) in incoming {
        existing.insert(key.clone(), value.clone());
    }
}
