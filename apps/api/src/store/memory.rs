use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use super::{
    merge_objects, paths, Document, DocumentStore, Query, SetMode, StoreError,
    StoreResult, WriteBatch, WriteOp,
};

/// In-process `DocumentStore`. Used by tests and by `STORE_BACKEND=memory`.
///
/// Batches are validated up front and applied under one write lock, so a
/// failing batch leaves the store untouched.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<BTreeMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect(
        docs: &BTreeMap<String, Value>,
        collection: &str,
    ) -> StoreResult<Vec<Document>> {
        let mut out = Vec::new();
        for (path, data) in docs.iter() {
            let (parent, id) = paths::split(path)?;
            if parent == collection {
                out.push(Document {
                    id: id.to_string(),
                    path: path.clone(),
                    data: data.clone(),
                });
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, path: &str) -> StoreResult<Option<Document>> {
        let (_, id) = paths::split(path)?;
        let docs = self.docs.read().await;
        Ok(docs.get(path).map(|data| Document {
            id: id.to_string(),
            path: path.to_string(),
            data: data.clone(),
        }))
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let docs = self.docs.read().await;
        Self::collect(&docs, collection)
    }

    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>> {
        let docs = self.docs.read().await;
        let mut matched: Vec<Document> = Self::collect(&docs, collection)?
            .into_iter()
            .filter(|doc| query.matches(&doc.data))
            .collect();

        if let Some(field) = &query.order_by {
            matched.sort_by(|a, b| compare_json(a.data.get(field), b.data.get(field)));
        }

        let iter = matched.into_iter().skip(query.offset);
        Ok(match query.limit {
            Some(limit) => iter.take(limit).collect(),
            None => iter.collect(),
        })
    }

    async fn count(&self, collection: &str, query: &Query) -> StoreResult<u64> {
        let docs = self.docs.read().await;
        let count = Self::collect(&docs, collection)?
            .iter()
            .filter(|doc| query.matches(&doc.data))
            .count();
        Ok(count as u64)
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        for op in batch.ops() {
            paths::split(op.path())?;
            if let WriteOp::Set { path, data, .. } = op {
                if !data.is_object() {
                    return Err(StoreError::NotAnObject(path.clone()));
                }
            }
        }

        let mut docs = self.docs.write().await;
        let op_count = batch.len();
        for op in batch.into_ops() {
            match op {
                WriteOp::Set {
                    path,
                    data: Value::Object(incoming),
                    mode: SetMode::Merge,
                } => match docs.get_mut(&path) {
                    Some(Value::Object(existing)) => merge_objects(existing, &incoming),
                    _ => {
                        docs.insert(path, Value::Object(incoming));
                    }
                },
                WriteOp::Set { path, data, .. } => {
                    docs.insert(path, data);
                }
                WriteOp::Delete { path } => {
                    docs.remove(&path);
                }
            }
        }
        debug!("Committed batch of {op_count} ops to memory store");
        Ok(())
    }
}

/// Orders JSON scalars the way the Postgres adapter orders JSONB values:
/// missing/null first, then numbers, then strings.
fn compare_json(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Number(_)) => 1,
            Some(Value::String(_)) => 2,
            Some(_) => 3,
        }
    }
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
