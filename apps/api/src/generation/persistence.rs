//! Persistence fan-out: one generated payload becomes one atomic batch.
//!
//! The batch holds the company (merge), each designation (merge), its rounds
//! (overwrite, keyed by padded order), deletes for round keys the new payload
//! no longer has, one rebuilt flat projection per designation (overwrite) and
//! one source document per citation (merge).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

use crate::models::{Company, Designation, FlatProjection, Payload};
use crate::slug::{is_valid_slug, slugify, slugify_capped, SOURCE_KEY_MAX};
use crate::store::{merge_objects, paths, DocumentStore, StoreResult, WriteBatch};

#[derive(Debug, Clone)]
pub struct PersistOutcome {
    pub company_id: String,
    pub stored: Payload,
}

/// The model's slug when it already has the key format, else a slug of the name.
pub fn resolve_company_slug(company: &Company) -> String {
    match company.slug.as_deref().map(str::trim) {
        Some(slug) if is_valid_slug(slug) => slug.to_string(),
        _ => slugify(&company.name),
    }
}

/// The designation's own id (slugified when needed), else `{level}-{track}`.
pub fn designation_key(designation: &Designation) -> String {
    let from_id = designation
        .id
        .as_deref()
        .map(|id| if is_valid_slug(id) { id.to_string() } else { slugify(id) })
        .unwrap_or_default();
    if from_id.is_empty() {
        slugify(&format!(
            "{}-{}",
            designation.level.as_str(),
            designation.track.as_str()
        ))
    } else {
        from_id
    }
}

pub fn source_key(title: &str) -> String {
    let key = slugify_capped(title, SOURCE_KEY_MAX);
    if key.is_empty() {
        "source".to_string()
    } else {
        key
    }
}

/// Appends `-2`, `-3`, ... until `base` is unused.
fn unique_key(base: String, used: &mut HashSet<String>) -> String {
    let mut candidate = base.clone();
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

pub async fn persist_payload(
    store: &dyn DocumentStore,
    payload: Payload,
    now: DateTime<Utc>,
) -> StoreResult<PersistOutcome> {
    let Payload {
        mut company,
        mut designations,
        sources,
    } = payload;

    let slug = resolve_company_slug(&company);
    let company_path = paths::company(&slug);
    let existing = store.get(&company_path).await?;

    let (previous_version, created_at) = match &existing {
        Some(doc) => (
            doc.data.get("version").and_then(Value::as_u64).unwrap_or(0) as u32,
            doc.data
                .get("createdAt")
                .cloned()
                .and_then(|v| serde_json::from_value::<DateTime<Utc>>(v).ok()),
        ),
        None => (0, None),
    };

    company.slug = Some(slug.clone());
    company.version = previous_version + 1;
    company.created_at = Some(created_at.unwrap_or(now));
    company.updated_at = Some(now);

    let company_data = serde_json::to_value(&company)?;
    // What the company document looks like after the merge; the flat
    // projections are built from this, not from the partial payload.
    let merged_company: Company = match (&existing, &company_data) {
        (Some(doc), Value::Object(incoming)) => match doc.data.clone() {
            Value::Object(mut base) => {
                merge_objects(&mut base, incoming);
                serde_json::from_value(Value::Object(base)).unwrap_or_else(|_| company.clone())
            }
            _ => company.clone(),
        },
        _ => company.clone(),
    };

    let mut batch = WriteBatch::new();
    batch.merge(&company_path, company_data);

    let mut used_ids = HashSet::new();
    for designation in designations.iter_mut() {
        let id = unique_key(designation_key(designation), &mut used_ids);
        designation.id = Some(id.clone());
        designation.updated_at = Some(now);

        batch.merge(paths::designation(&slug, &id), designation.to_document()?);

        let mut new_keys = HashSet::new();
        for round in designation.rounds.iter_mut() {
            round.updated_at = Some(now);
            new_keys.insert(paths::round_id(round.order));
            batch.set(
                paths::round(&slug, &id, round.order),
                serde_json::to_value(&*round)?,
            );
        }
        for stale in store.list(&paths::rounds(&slug, &id)).await? {
            if !new_keys.contains(&stale.id) {
                batch.delete(stale.path);
            }
        }

        let flat = FlatProjection::rebuild(
            &slug,
            &merged_company,
            &id,
            designation,
            &designation.rounds,
            now,
        );
        batch.set(paths::flat(&slug, &id), serde_json::to_value(&flat)?);
    }

    let mut used_keys = HashSet::new();
    for source in &sources {
        let key = unique_key(source_key(&source.title), &mut used_keys);
        batch.merge(paths::source(&slug, &key), serde_json::to_value(source)?);
    }

    info!(
        "Persisting company '{}': {} designations, {} sources, {} writes",
        slug,
        designations.len(),
        sources.len(),
        batch.len()
    );
    store.commit(batch).await?;

    Ok(PersistOutcome {
        company_id: slug,
        stored: Payload {
            company,
            designations,
            sources,
        },
    })
}
