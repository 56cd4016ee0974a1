use serde_json::Value;

use crate::catalog::require_company;
use crate::errors::AppError;
use crate::store::{paths, DocumentStore};

/// A company's citations, ordered by key.
pub async fn list_sources(store: &dyn DocumentStore, slug: &str) -> Result<Vec<Value>, AppError> {
    require_company(store, slug).await?;
    let docs = store.list(&paths::sources(slug)).await?;
    Ok(docs.iter().map(|d| d.with_id()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, WriteBatch};
    use serde_json::json;

    #[tokio::test]
    async fn test_lists_sources_with_ids() {
        let store = MemoryDocumentStore::new();
        let mut batch = WriteBatch::new();
        batch
            .set(
                "companies/acme",
                json!({"name": "Acme", "country": "India", "industry": "Fintech"}),
            )
            .set(
                "companies/acme/sources/glassdoor-reviews",
                json!({"kind": "glassdoor", "title": "Glassdoor reviews"}),
            );
        store.commit(batch).await.unwrap();

        let sources = list_sources(&store, "acme").await.unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0]["id"], "glassdoor-reviews");
    }

    #[tokio::test]
    async fn test_missing_company_is_not_found() {
        let store = MemoryDocumentStore::new();
        assert!(matches!(
            list_sources(&store, "ghost").await,
            Err(AppError::NotFound(_))
        ));
    }
}
