// Catalog CRUD: Company / Designation / InterviewRound / Source documents and
// the flat projection cache derived from them.
// Every write goes through the store port; every designation or round mutation
// refreshes the matching flat projection afterwards.

pub mod companies;
pub mod designations;
pub mod handlers;
pub mod projection;
pub mod rounds;
pub mod sources;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::generation::validation::require_fields;
use crate::store::{merge_objects, paths, Document, DocumentStore};

/// Body of every successful POST / PUT / DELETE.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl MutationResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id: None,
        }
    }

    pub fn created(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id: Some(id.into()),
        }
    }
}

/// Applies a partial update to a stored document.
///
/// Keys in `immutable` are dropped from the patch. Returns the cleaned patch
/// and the document as it would look after a merge, for validation.
pub fn apply_patch(
    existing: &Value,
    patch: Value,
    immutable: &[&str],
) -> Result<(Map<String, Value>, Value), AppError> {
    let Value::Object(mut patch) = patch else {
        return Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    };
    for key in immutable {
        patch.remove(*key);
    }

    let mut merged = match existing {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    merge_objects(&mut merged, &patch);
    Ok((patch, Value::Object(merged)))
}

/// Missing body fields are an input error (400), unlike schema failures on
/// the fields that are present.
pub fn require_body_fields(body: &Value, fields: &[&str]) -> Result<(), AppError> {
    require_fields(body, fields).map_err(|e| AppError::BadRequest(e.to_string()))
}

pub async fn require_company(store: &dyn DocumentStore, slug: &str) -> Result<Document, AppError> {
    store
        .get(&paths::company(slug))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {slug} not found")))
}

pub async fn require_designation(
    store: &dyn DocumentStore,
    slug: &str,
    designation_id: &str,
) -> Result<Document, AppError> {
    require_company(store, slug).await?;
    store
        .get(&paths::designation(slug, designation_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Designation {designation_id} not found")))
}
