//! Flat projection cache maintenance.
//!
//! `interview_process_flat` documents are never patched. Every refresh reads
//! Company + Designation + Rounds and overwrites the projection, or deletes it
//! when its company or designation is gone.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::catalog::rounds::load_rounds;
use crate::models::{Company, Designation, FlatProjection};
use crate::store::{paths, Document, DocumentStore, Query, StoreResult, WriteBatch};

async fn load_company(store: &dyn DocumentStore, slug: &str) -> StoreResult<Option<Company>> {
    match store.get(&paths::company(slug)).await? {
        Some(doc) => Ok(Some(doc.decode()?)),
        None => Ok(None),
    }
}

/// Adds the overwrite (or delete) of one flat document to `batch`.
async fn stage_flat(
    store: &dyn DocumentStore,
    batch: &mut WriteBatch,
    slug: &str,
    company: Option<&Company>,
    designation_id: &str,
    now: DateTime<Utc>,
) -> StoreResult<()> {
    let flat_path = paths::flat(slug, designation_id);
    let designation = match store.get(&paths::designation(slug, designation_id)).await? {
        Some(doc) => Some(doc.decode::<Designation>()?),
        None => None,
    };

    match (company, designation) {
        (Some(company), Some(designation)) => {
            let rounds = load_rounds(store, slug, designation_id).await?;
            let flat =
                FlatProjection::rebuild(slug, company, designation_id, &designation, &rounds, now);
            batch.set(flat_path, serde_json::to_value(&flat)?);
        }
        _ => {
            batch.delete(flat_path);
        }
    }
    Ok(())
}

/// Rebuilds the flat document for one designation from its sources of truth.
pub async fn refresh_flat(
    store: &dyn DocumentStore,
    slug: &str,
    designation_id: &str,
    now: DateTime<Utc>,
) -> StoreResult<()> {
    let company = load_company(store, slug).await?;
    let mut batch = WriteBatch::new();
    stage_flat(store, &mut batch, slug, company.as_ref(), designation_id, now).await?;
    store.commit(batch).await?;
    debug!("Refreshed flat projection {}", paths::flat_id(slug, designation_id));
    Ok(())
}

/// Rebuilds every flat document of a company and drops orphans whose
/// designation no longer exists. Returns the number of projections written.
pub async fn rebuild_company(
    store: &dyn DocumentStore,
    slug: &str,
    now: DateTime<Utc>,
) -> StoreResult<usize> {
    let company = load_company(store, slug).await?;
    let designations = store.list(&paths::designations(slug)).await?;
    let live: HashSet<String> = designations.iter().map(|d| d.id.clone()).collect();

    let mut batch = WriteBatch::new();
    for designation in &designations {
        stage_flat(store, &mut batch, slug, company.as_ref(), &designation.id, now).await?;
    }

    for flat in company_flats(store, slug).await? {
        let designation_id = flat
            .data
            .get("designationId")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if !live.contains(designation_id) {
            batch.delete(flat.path);
        }
    }

    let written = if company.is_some() { designations.len() } else { 0 };
    store.commit(batch).await?;
    info!("Rebuilt {written} flat projections for company '{slug}'");
    Ok(written)
}

/// Every flat document belonging to a company.
pub async fn company_flats(store: &dyn DocumentStore, slug: &str) -> StoreResult<Vec<Document>> {
    store
        .query(
            paths::INTERVIEW_PROCESS_FLAT,
            &Query::new().filter("companySlug", slug),
        )
        .await
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatListParams {
    pub company_slug: Option<String>,
    pub track: Option<String>,
    pub normalized_level: Option<String>,
}

pub async fn list_flat(
    store: &dyn DocumentStore,
    params: &FlatListParams,
) -> StoreResult<Vec<Value>> {
    let mut query = Query::new().order_by("companyName");
    if let Some(slug) = &params.company_slug {
        query = query.filter("companySlug", slug.as_str());
    }
    if let Some(track) = &params.track {
        query = query.filter("track", track.as_str());
    }
    if let Some(level) = &params.normalized_level {
        query = query.filter("normalizedLevel", level.as_str());
    }
    let docs = store.query(paths::INTERVIEW_PROCESS_FLAT, &query).await?;
    Ok(docs.iter().map(|d| d.with_id()).collect())
}
