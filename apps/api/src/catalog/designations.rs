//! Designation CRUD.
//!
//! Designations run through the same derivation as generated ones, so
//! `normalizedLevel`, `taxonomy` and `levelAliases` stay consistent with the
//! raw level whichever path wrote them.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

use crate::catalog::rounds::load_rounds;
use crate::catalog::{
    apply_patch, projection, require_body_fields, require_company, require_designation,
};
use crate::errors::AppError;
use crate::generation::derivation::derive_designation;
use crate::generation::persistence::designation_key;
use crate::generation::validation::validate_designation;
use crate::store::{paths, DocumentStore, StoreError, WriteBatch};

pub const REQUIRED_DESIGNATION_FIELDS: [&str; 3] = ["title", "level", "track"];

pub async fn list_designations(
    store: &dyn DocumentStore,
    slug: &str,
) -> Result<Vec<Value>, AppError> {
    require_company(store, slug).await?;
    let docs = store.list(&paths::designations(slug)).await?;
    Ok(docs.iter().map(|d| d.with_id()).collect())
}

pub async fn get_designation(
    store: &dyn DocumentStore,
    slug: &str,
    designation_id: &str,
) -> Result<Value, AppError> {
    Ok(require_designation(store, slug, designation_id)
        .await?
        .with_id())
}

/// Creates a designation (and any rounds nested in the body). Returns its id.
pub async fn create_designation(
    store: &dyn DocumentStore,
    slug: &str,
    body: Value,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    require_company(store, slug).await?;
    require_body_fields(&body, &REQUIRED_DESIGNATION_FIELDS)?;
    let mut designation = derive_designation(validate_designation(body)?);

    let id = designation_key(&designation);
    let path = paths::designation(slug, &id);
    if store.get(&path).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Designation {id} already exists for company {slug}"
        )));
    }

    designation.id = Some(id.clone());
    designation.updated_at = Some(now);

    let mut batch = WriteBatch::new();
    batch.set(path, designation.to_document().map_err(StoreError::from)?);
    for round in designation.rounds.iter_mut() {
        round.updated_at = Some(now);
        batch.set(
            paths::round(slug, &id, round.order),
            serde_json::to_value(&*round).map_err(StoreError::from)?,
        );
    }
    store.commit(batch).await?;
    projection::refresh_flat(store, slug, &id, now).await?;

    info!(
        "Created designation {slug}/{id} with {} rounds",
        designation.rounds.len()
    );
    Ok(id)
}

/// Partial update; derived fields are recomputed from the merged result.
pub async fn update_designation(
    store: &dyn DocumentStore,
    slug: &str,
    designation_id: &str,
    patch: Value,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let existing = require_designation(store, slug, designation_id).await?;
    let (_, merged) = apply_patch(&existing.data, patch, &["id", "rounds"])?;

    let mut designation = validate_designation(merged)?;
    designation.id = Some(designation_id.to_string());
    designation.rounds = load_rounds(store, slug, designation_id).await?;
    designation.updated_at = Some(now);
    let designation = derive_designation(designation);

    let mut batch = WriteBatch::new();
    batch.merge(
        existing.path,
        designation.to_document().map_err(StoreError::from)?,
    );
    store.commit(batch).await?;
    projection::refresh_flat(store, slug, designation_id, now).await?;
    Ok(())
}

/// Deletes the designation document and its flat projection. Its rounds
/// sub-collection is not cascaded.
pub async fn delete_designation(
    store: &dyn DocumentStore,
    slug: &str,
    designation_id: &str,
) -> Result<(), AppError> {
    let existing = require_designation(store, slug, designation_id).await?;

    let mut batch = WriteBatch::new();
    batch
        .delete(existing.path)
        .delete(paths::flat(slug, designation_id));
    store.commit(batch).await?;

    info!("Deleted designation {slug}/{designation_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;
    use serde_json::json;

    async fn with_company() -> MemoryDocumentStore {
        let store = MemoryDocumentStore::new();
        let mut batch = WriteBatch::new();
        batch.set(
            "companies/acme",
            json!({"name": "Acme", "country": "India", "industry": "Fintech"}),
        );
        store.commit(batch).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_create_derives_fields_and_projection() {
        let store = with_company().await;
        let id = create_designation(
            &store,
            "acme",
            json!({
                "title": "SDE2 – Backend",
                "level": "SDE2",
                "track": "Backend",
                "rounds": [{"order": 1, "type": "DSA", "durationMins": 60}]
            }),
            Utc::now(),
        )
        .await
        .unwrap();
        assert_eq!(id, "sde2-backend");

        let doc = get_designation(&store, "acme", &id).await.unwrap();
        assert_eq!(doc["normalizedLevel"], "L4");
        assert_eq!(doc["taxonomy"], "SDE");
        assert_eq!(doc["levelAliases"], json!(["SDE2"]));
        assert!(doc.get("rounds").is_none());

        let rounds = load_rounds(&store, "acme", &id).await.unwrap();
        assert_eq!(rounds.len(), 1);
        assert!(store
            .get(&paths::flat("acme", &id))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_create_under_missing_company_is_not_found() {
        let store = MemoryDocumentStore::new();
        let err = create_designation(
            &store,
            "ghost",
            json!({"title": "L5", "level": "L5", "track": "Mobile"}),
            Utc::now(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_designation_conflicts() {
        let store = with_company().await;
        let body = json!({"title": "L5", "level": "L5", "track": "Mobile"});
        create_designation(&store, "acme", body.clone(), Utc::now())
            .await
            .unwrap();
        assert!(matches!(
            create_designation(&store, "acme", body, Utc::now()).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_level_change_rederives() {
        let store = with_company().await;
        let id = create_designation(
            &store,
            "acme",
            json!({"title": "IC4", "level": "IC4", "track": "Frontend"}),
            Utc::now(),
        )
        .await
        .unwrap();
        update_designation(&store, "acme", &id, json!({"level": "Staff"}), Utc::now())
            .await
            .unwrap();

        let doc = get_designation(&store, "acme", &id).await.unwrap();
        assert_eq!(doc["level"], "Staff");
        assert_eq!(doc["normalizedLevel"], "L6");
        assert_eq!(doc["taxonomy"], "Mixed");
        assert_eq!(doc["title"], "IC4");

        let flat = store.get(&paths::flat("acme", &id)).await.unwrap().unwrap();
        assert_eq!(flat.data["normalizedLevel"], "L6");
    }

    #[tokio::test]
    async fn test_delete_removes_designation_and_flat() {
        let store = with_company().await;
        let id = create_designation(
            &store,
            "acme",
            json!({"title": "L5", "level": "L5", "track": "Mobile"}),
            Utc::now(),
        )
        .await
        .unwrap();
        delete_designation(&store, "acme", &id).await.unwrap();

        assert!(matches!(
            get_designation(&store, "acme", &id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(store.get(&paths::flat("acme", &id)).await.unwrap().is_none());
    }
}
