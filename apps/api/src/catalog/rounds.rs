//! Interview round CRUD and reordering.
//!
//! Round documents are keyed by their zero-padded order, so any change to the
//! order sequence is a key rewrite: every surviving round is written at its new
//! key and keys past the end of the new sequence are deleted, all in one batch.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::info;

use crate::catalog::{apply_patch, projection, require_body_fields, require_designation};
use crate::errors::AppError;
use crate::generation::validation::{validate_round, MAX_ROUNDS};
use crate::models::InterviewRound;
use crate::store::{paths, DocumentStore, StoreError, StoreResult, WriteBatch};

/// Fields a round body must carry on create and update.
pub const REQUIRED_ROUND_FIELDS: [&str; 3] = ["type", "durationMins", "focusAreas"];

/// `max(order) + 1`, or 1 for an empty designation.
pub fn next_round_order(rounds: &[InterviewRound]) -> u8 {
    rounds.iter().map(|r| r.order).max().map_or(1, |max| max + 1)
}

/// Sorts by current order and reassigns `1, 2, 3, ...`.
pub fn renumber(mut rounds: Vec<InterviewRound>) -> Vec<InterviewRound> {
    rounds.sort_by_key(|r| r.order);
    for (i, round) in rounds.iter_mut().enumerate() {
        round.order = (i + 1) as u8;
    }
    rounds
}

/// Accepts `"3"` as well as `"03"`.
pub fn parse_round_id(round_id: &str) -> Result<u8, AppError> {
    round_id
        .parse::<u8>()
        .ok()
        .filter(|order| *order >= 1)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid round id '{round_id}'")))
}

/// A designation's rounds ordered by `order`.
pub async fn load_rounds(
    store: &dyn DocumentStore,
    slug: &str,
    designation_id: &str,
) -> StoreResult<Vec<InterviewRound>> {
    let mut rounds = store
        .list(&paths::rounds(slug, designation_id))
        .await?
        .iter()
        .map(|doc| doc.decode::<InterviewRound>())
        .collect::<Result<Vec<_>, StoreError>>()?;
    rounds.sort_by_key(|r| r.order);
    Ok(rounds)
}

/// Writes `rounds` at their padded-order keys and deletes every key in
/// `previous_keys` that the new sequence no longer uses.
fn stage_rewrite(
    batch: &mut WriteBatch,
    slug: &str,
    designation_id: &str,
    previous_keys: &[String],
    rounds: &[InterviewRound],
) -> StoreResult<()> {
    let mut live = HashSet::new();
    for round in rounds {
        live.insert(paths::round_id(round.order));
        batch.set(
            paths::round(slug, designation_id, round.order),
            serde_json::to_value(round)?,
        );
    }
    for key in previous_keys {
        if !live.contains(key) {
            batch.delete(format!("{}/{key}", paths::rounds(slug, designation_id)));
        }
    }
    Ok(())
}

fn keys_of(rounds: &[InterviewRound]) -> Vec<String> {
    rounds.iter().map(|r| paths::round_id(r.order)).collect()
}

pub async fn list_rounds(
    store: &dyn DocumentStore,
    slug: &str,
    designation_id: &str,
) -> Result<Vec<Value>, AppError> {
    require_designation(store, slug, designation_id).await?;
    let docs = store.list(&paths::rounds(slug, designation_id)).await?;
    let mut items: Vec<Value> = docs.iter().map(|d| d.with_id()).collect();
    items.sort_by_key(|v| v.get("order").and_then(Value::as_u64).unwrap_or(u64::MAX));
    Ok(items)
}

pub async fn get_round(
    store: &dyn DocumentStore,
    slug: &str,
    designation_id: &str,
    round_id: &str,
) -> Result<Value, AppError> {
    let order = parse_round_id(round_id)?;
    store
        .get(&paths::round(slug, designation_id, order))
        .await?
        .map(|doc| doc.with_id())
        .ok_or_else(|| AppError::NotFound(format!("Round {round_id} not found")))
}

/// Creates a round. Without an explicit `order` it is appended; with one in
/// `1..=n+1` the rounds at and after that position move down by one.
/// Returns the new round's id.
pub async fn create_round(
    store: &dyn DocumentStore,
    slug: &str,
    designation_id: &str,
    body: Value,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    require_designation(store, slug, designation_id).await?;
    require_body_fields(&body, &REQUIRED_ROUND_FIELDS)?;
    let Value::Object(mut body) = body else {
        return Err(AppError::BadRequest("Request body must be a JSON object".to_string()));
    };

    let existing = load_rounds(store, slug, designation_id).await?;
    if existing.len() >= MAX_ROUNDS {
        return Err(AppError::BadRequest(format!(
            "A designation can have at most {MAX_ROUNDS} rounds"
        )));
    }

    // Positions are resolved against the renumbered sequence, which differs
    // from the stored one only if the stored one has gaps.
    let previous_keys = keys_of(&existing);
    let mut rounds = renumber(existing);

    let order = match body.get("order").filter(|v| !v.is_null()) {
        None => next_round_order(&rounds),
        Some(v) => v
            .as_u64()
            .filter(|o| (1..=rounds.len() as u64 + 1).contains(o))
            .map(|o| o as u8)
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "order must be between 1 and {}",
                    rounds.len() + 1
                ))
            })?,
    };
    body.insert("order".to_string(), json!(order));
    body.insert("updatedAt".to_string(), json!(now));

    let round = validate_round(Value::Object(body))?;
    for r in rounds.iter_mut().filter(|r| r.order >= order) {
        r.order += 1;
    }
    let new_id = paths::round_id(round.order);
    rounds.push(round);
    let rounds = renumber(rounds);

    let mut batch = WriteBatch::new();
    stage_rewrite(&mut batch, slug, designation_id, &previous_keys, &rounds)?;
    store.commit(batch).await?;
    projection::refresh_flat(store, slug, designation_id, now).await?;

    info!("Created round {new_id} for {slug}/{designation_id}");
    Ok(new_id)
}

/// Partial update of one round. `order` cannot be changed here.
pub async fn update_round(
    store: &dyn DocumentStore,
    slug: &str,
    designation_id: &str,
    round_id: &str,
    patch: Value,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let order = parse_round_id(round_id)?;
    let path = paths::round(slug, designation_id, order);
    let existing = store
        .get(&path)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Round {round_id} not found")))?;

    require_body_fields(&patch, &REQUIRED_ROUND_FIELDS)?;
    let (_, merged) = apply_patch(&existing.data, patch, &["id", "order"])?;
    let mut round = validate_round(merged)?;
    round.updated_at = Some(now);

    let mut batch = WriteBatch::new();
    batch.merge(path, serde_json::to_value(&round).map_err(StoreError::from)?);
    store.commit(batch).await?;
    projection::refresh_flat(store, slug, designation_id, now).await?;
    Ok(())
}

/// Deletes one round and renumbers the rest to `1..n-1` in the same batch.
pub async fn delete_round(
    store: &dyn DocumentStore,
    slug: &str,
    designation_id: &str,
    round_id: &str,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let order = parse_round_id(round_id)?;
    let existing = load_rounds(store, slug, designation_id).await?;
    if !existing.iter().any(|r| r.order == order) {
        return Err(AppError::NotFound(format!("Round {round_id} not found")));
    }

    let previous_keys = keys_of(&existing);
    let remaining: Vec<InterviewRound> = existing.into_iter().filter(|r| r.order != order).collect();
    let rounds = renumber(remaining);

    let mut batch = WriteBatch::new();
    stage_rewrite(&mut batch, slug, designation_id, &previous_keys, &rounds)?;
    store.commit(batch).await?;
    projection::refresh_flat(store, slug, designation_id, now).await?;

    info!(
        "Deleted round {round_id} of {slug}/{designation_id}; {} rounds remain",
        rounds.len()
    );
    Ok(())
}
