use async_trait::async_trait;
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use super::{
    paths, Document, DocumentStore, Query, SetMode, StoreError, StoreResult,
    WriteBatch, WriteOp,
};

/// `DocumentStore` backed by the `documents` table (see `migrations/`).
///
/// Each document is one row keyed by its full path; `commit` runs the whole
/// batch inside a single transaction.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct DocumentRow {
    path: String,
    doc_id: String,
    data: Value,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.doc_id,
            path: row.path,
            data: row.data,
        }
    }
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &Query) {
        for (field, value) in &query.filters {
            builder
                .push(" AND data -> ")
                .push_bind(field.clone())
                .push(" = ")
                .push_bind(value.clone());
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, path: &str) -> StoreResult<Option<Document>> {
        paths::split(path)?;
        let row: Option<DocumentRow> =
            sqlx::query_as("SELECT path, doc_id, data FROM documents WHERE path = $1")
                .bind(path)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Document::from))
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            "SELECT path, doc_id, data FROM documents WHERE collection = $1 ORDER BY doc_id",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT path, doc_id, data FROM documents WHERE collection = ");
        builder.push_bind(collection.to_string());
        Self::push_filters(&mut builder, query);

        match &query.order_by {
            Some(field) => {
                builder.push(" ORDER BY data -> ").push_bind(field.clone());
                builder.push(" ASC NULLS FIRST, doc_id");
            }
            None => {
                builder.push(" ORDER BY doc_id");
            }
        }
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit as i64);
        }
        if query.offset > 0 {
            builder.push(" OFFSET ").push_bind(query.offset as i64);
        }

        let rows: Vec<DocumentRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn count(&self, collection: &str, query: &Query) -> StoreResult<u64> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM documents WHERE collection = ");
        builder.push_bind(collection.to_string());
        Self::push_filters(&mut builder, query);

        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let op_count = batch.len();
        let mut tx = self.pool.begin().await?;

        for op in batch.into_ops() {
            match op {
                WriteOp::Set { path, data, mode } => {
                    if !data.is_object() {
                        return Err(StoreError::NotAnObject(path));
                    }
                    let (collection, doc_id) = paths::split(&path)?;
                    let sql = match mode {
                        SetMode::Merge => {
                            r#"
                            INSERT INTO documents (path, collection, doc_id, data)
                            VALUES ($1, $2, $3, $4)
                            ON CONFLICT (path) DO UPDATE
                            SET data = documents.data || EXCLUDED.data, updated_at = NOW()
                            "#
                        }
                        SetMode::Overwrite => {
                            r#"
                            INSERT INTO documents (path, collection, doc_id, data)
                            VALUES ($1, $2, $3, $4)
                            ON CONFLICT (path) DO UPDATE
                            SET data = EXCLUDED.data, updated_at = NOW()
                            "#
                        }
                    };
                    sqlx::query(sql)
                        .bind(&path)
                        .bind(collection)
                        .bind(doc_id)
                        .bind(&data)
                        .execute(&mut *tx)
                        .await?;
                }
                WriteOp::Delete { path } => {
                    paths::split(&path)?;
                    sqlx::query("DELETE FROM documents WHERE path = $1")
                        .bind(&path)
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }

        tx.commit().await?;
        debug!("Committed batch of {op_count} ops");
        Ok(())
    }
}
