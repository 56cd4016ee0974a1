//! Company CRUD and paginated listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::catalog::{apply_patch, projection, require_body_fields, require_company};
use crate::errors::AppError;
use crate::generation::persistence::resolve_company_slug;
use crate::generation::validation::validate_company;
use crate::store::{paths, DocumentStore, Query, StoreError, WriteBatch};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const REQUIRED_COMPANY_FIELDS: [&str; 3] = ["name", "country", "industry"];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub country: Option<String>,
    pub industry: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPage {
    pub items: Vec<Value>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u64,
}

pub async fn list_companies(
    store: &dyn DocumentStore,
    params: &CompanyListParams,
    max_page_size: u32,
) -> Result<CompanyPage, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, max_page_size.max(1));

    let mut query = Query::new();
    if let Some(country) = &params.country {
        query = query.filter("country", country.as_str());
    }
    if let Some(industry) = &params.industry {
        query = query.filter("industry", industry.as_str());
    }
    if let Some(source) = &params.source {
        query = query.filter("source", source.as_str());
    }

    let total = store.count(paths::COMPANIES, &query).await?;
    let offset = (page as usize - 1) * page_size as usize;
    let query = query
        .order_by("name")
        .page(offset, page_size as usize);
    let docs = store.query(paths::COMPANIES, &query).await?;

    Ok(CompanyPage {
        items: docs.iter().map(|d| d.with_id()).collect(),
        page,
        page_size,
        total,
        total_pages: total.div_ceil(page_size as u64),
    })
}

pub async fn get_company(store: &dyn DocumentStore, slug: &str) -> Result<Value, AppError> {
    Ok(require_company(store, slug).await?.with_id())
}

/// Creates a company keyed by its slug. 409 when the slug is taken.
pub async fn create_company(
    store: &dyn DocumentStore,
    body: Value,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    require_body_fields(&body, &REQUIRED_COMPANY_FIELDS)?;
    let mut company = validate_company(body)?;
    let slug = resolve_company_slug(&company);

    let path = paths::company(&slug);
    if store.get(&path).await?.is_some() {
        return Err(AppError::Conflict(format!("Company {slug} already exists")));
    }

    company.slug = Some(slug.clone());
    company.version = 1;
    company.created_at = Some(now);
    company.updated_at = Some(now);

    let mut batch = WriteBatch::new();
    batch.set(path, serde_json::to_value(&company).map_err(StoreError::from)?);
    store.commit(batch).await?;

    info!("Created company '{slug}'");
    Ok(slug)
}

/// Partial update. Bumps `version` and refreshes every flat projection of the
/// company, since they copy its identity fields.
pub async fn update_company(
    store: &dyn DocumentStore,
    slug: &str,
    patch: Value,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let existing = require_company(store, slug).await?;
    let (mut changes, merged) =
        apply_patch(&existing.data, patch, &["id", "slug", "version", "createdAt"])?;
    let company = validate_company(merged)?;

    changes.insert("version".to_string(), json!(company.version + 1));
    changes.insert("updatedAt".to_string(), json!(now));

    let mut batch = WriteBatch::new();
    batch.merge(existing.path, Value::Object(changes));
    store.commit(batch).await?;

    projection::rebuild_company(store, slug, now).await?;
    Ok(())
}

/// Deletes the company document and its flat projections. Sub-collections
/// are left in place.
pub async fn delete_company(store: &dyn DocumentStore, slug: &str) -> Result<(), AppError> {
    let existing = require_company(store, slug).await?;

    let mut batch = WriteBatch::new();
    batch.delete(existing.path);
    for flat in projection::company_flats(store, slug).await? {
        batch.delete(flat.path);
    }
    store.commit(batch).await?;

    info!("Deleted company '{slug}'");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;

    fn body(name: &str, country: &str) -> Value {
        json!({"name": name, "country": country, "industry": "SaaS"})
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryDocumentStore::new();
        let slug = create_company(&store, body("Acme Corp", "India"), Utc::now())
            .await
            .unwrap();
        assert_eq!(slug, "acme-corp");

        let company = get_company(&store, "acme-corp").await.unwrap();
        assert_eq!(company["id"], "acme-corp");
        assert_eq!(company["version"], 1);
        assert_eq!(company["source"], "manual");
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let store = MemoryDocumentStore::new();
        create_company(&store, body("Acme", "India"), Utc::now())
            .await
            .unwrap();
        let err = create_company(&store, body("Acme", "Global"), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_missing_company_is_not_found() {
        let store = MemoryDocumentStore::new();
        assert!(matches!(
            get_company(&store, "nope").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            update_company(&store, "nope", json!({"industry": "x"}), Utc::now()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete_company(&store, "nope").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_country_filter_and_pagination() {
        let store = MemoryDocumentStore::new();
        for (name, country) in [
            ("Alpha", "India"),
            ("Bravo", "Global"),
            ("Charlie", "India"),
            ("Delta", "India"),
        ] {
            create_company(&store, body(name, country), Utc::now())
                .await
                .unwrap();
        }

        let params = CompanyListParams {
            page: Some(1),
            page_size: Some(2),
            country: Some("India".to_string()),
            ..Default::default()
        };
        let page = list_companies(&store, &params, 100).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert!(page.items.iter().all(|c| c["country"] == "India"));
        assert_eq!(page.items[0]["name"], "Alpha");

        let params = CompanyListParams {
            page: Some(2),
            page_size: Some(2),
            country: Some("India".to_string()),
            ..Default::default()
        };
        let page = list_companies(&store, &params, 100).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0]["name"], "Delta");
    }

    #[tokio::test]
    async fn test_page_size_is_capped() {
        let store = MemoryDocumentStore::new();
        let params = CompanyListParams {
            page_size: Some(10_000),
            ..Default::default()
        };
        let page = list_companies(&store, &params, 50).await.unwrap();
        assert_eq!(page.page_size, 50);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_update_merges_and_bumps_version() {
        let store = MemoryDocumentStore::new();
        create_company(&store, body("Acme", "India"), Utc::now())
            .await
            .unwrap();
        update_company(
            &store,
            "acme",
            json!({"website": "https://acme.example", "slug": "other", "updatedBy": "editor"}),
            Utc::now(),
        )
        .await
        .unwrap();

        let company = get_company(&store, "acme").await.unwrap();
        assert_eq!(company["version"], 2);
        assert_eq!(company["slug"], "acme");
        assert_eq!(company["industry"], "SaaS");
        assert_eq!(company["website"], "https://acme.example");
        assert_eq!(company["updatedBy"], "editor");
    }

    #[tokio::test]
    async fn test_invalid_update_is_rejected() {
        let store = MemoryDocumentStore::new();
        create_company(&store, body("Acme", "India"), Utc::now())
            .await
            .unwrap();
        let err = update_company(&store, "acme", json!({"website": "nope"}), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_company_and_flats() {
        let store = MemoryDocumentStore::new();
        create_company(&store, body("Acme", "India"), Utc::now())
            .await
            .unwrap();
        let mut batch = WriteBatch::new();
        batch.set(
            paths::flat("acme", "l5-frontend"),
            json!({"companySlug": "acme", "designationId": "l5-frontend"}),
        );
        store.commit(batch).await.unwrap();

        delete_company(&store, "acme").await.unwrap();
        assert!(store.get("companies/acme").await.unwrap().is_none());
        assert!(projection::company_flats(&store, "acme")
            .await
            .unwrap()
            .is_empty());
    }
}
