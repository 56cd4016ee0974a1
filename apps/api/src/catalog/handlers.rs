use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::companies::{self, CompanyListParams, CompanyPage};
use crate::catalog::projection::{self, FlatListParams};
use crate::catalog::{designations, rounds, sources, MutationResponse};
use crate::errors::{ApiJson, ApiQuery, AppError};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuildResponse {
    pub success: bool,
    pub rebuilt: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Companies
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CompanyListParams>,
) -> Result<Json<CompanyPage>, AppError> {
    let page = companies::list_companies(
        state.store.as_ref(),
        &params,
        state.config.company_page_size_max,
    )
    .await?;
    Ok(Json(page))
}

/// POST /api/companies
pub async fn handle_create_company(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<MutationResponse>, AppError> {
    let slug = companies::create_company(state.store.as_ref(), body, Utc::now()).await?;
    Ok(Json(MutationResponse::created(slug, "Company created")))
}

/// GET /api/companies/:slug
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(companies::get_company(state.store.as_ref(), &slug).await?))
}

/// PUT /api/companies/:slug
pub async fn handle_update_company(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ApiJson(patch): ApiJson<Value>,
) -> Result<Json<MutationResponse>, AppError> {
    companies::update_company(state.store.as_ref(), &slug, patch, Utc::now()).await?;
    Ok(Json(MutationResponse::ok("Company updated")))
}

/// DELETE /api/companies/:slug
pub async fn handle_delete_company(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<MutationResponse>, AppError> {
    companies::delete_company(state.store.as_ref(), &slug).await?;
    Ok(Json(MutationResponse::ok("Company deleted")))
}

// ────────────────────────────────────────────────────────────────────────────
// Designations
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/companies/:slug/designations
pub async fn handle_list_designations(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(
        designations::list_designations(state.store.as_ref(), &slug).await?,
    ))
}

/// POST /api/companies/:slug/designations
pub async fn handle_create_designation(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<MutationResponse>, AppError> {
    let id =
        designations::create_designation(state.store.as_ref(), &slug, body, Utc::now()).await?;
    Ok(Json(MutationResponse::created(id, "Designation created")))
}

/// GET /api/companies/:slug/designations/:designation_id
pub async fn handle_get_designation(
    State(state): State<AppState>,
    Path((slug, designation_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(
        designations::get_designation(state.store.as_ref(), &slug, &designation_id).await?,
    ))
}

/// PUT /api/companies/:slug/designations/:designation_id
pub async fn handle_update_designation(
    State(state): State<AppState>,
    Path((slug, designation_id)): Path<(String, String)>,
    ApiJson(patch): ApiJson<Value>,
) -> Result<Json<MutationResponse>, AppError> {
    designations::update_designation(
        state.store.as_ref(),
        &slug,
        &designation_id,
        patch,
        Utc::now(),
    )
    .await?;
    Ok(Json(MutationResponse::ok("Designation updated")))
}

/// DELETE /api/companies/:slug/designations/:designation_id
pub async fn handle_delete_designation(
    State(state): State<AppState>,
    Path((slug, designation_id)): Path<(String, String)>,
) -> Result<Json<MutationResponse>, AppError> {
    designations::delete_designation(state.store.as_ref(), &slug, &designation_id).await?;
    Ok(Json(MutationResponse::ok("Designation deleted")))
}

// ────────────────────────────────────────────────────────────────────────────
// Rounds
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/companies/:slug/designations/:designation_id/rounds
pub async fn handle_list_rounds(
    State(state): State<AppState>,
    Path((slug, designation_id)): Path<(String, String)>,
) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(
        rounds::list_rounds(state.store.as_ref(), &slug, &designation_id).await?,
    ))
}

/// POST /api/companies/:slug/designations/:designation_id/rounds
pub async fn handle_create_round(
    State(state): State<AppState>,
    Path((slug, designation_id)): Path<(String, String)>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<MutationResponse>, AppError> {
    let id = rounds::create_round(
        state.store.as_ref(),
        &slug,
        &designation_id,
        body,
        Utc::now(),
    )
    .await?;
    Ok(Json(MutationResponse::created(id, "Round created")))
}

/// GET /api/companies/:slug/designations/:designation_id/rounds/:round_id
pub async fn handle_get_round(
    State(state): State<AppState>,
    Path((slug, designation_id, round_id)): Path<(String, String, String)>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(
        rounds::get_round(state.store.as_ref(), &slug, &designation_id, &round_id).await?,
    ))
}

/// PUT /api/companies/:slug/designations/:designation_id/rounds/:round_id
pub async fn handle_update_round(
    State(state): State<AppState>,
    Path((slug, designation_id, round_id)): Path<(String, String, String)>,
    ApiJson(patch): ApiJson<Value>,
) -> Result<Json<MutationResponse>, AppError> {
    rounds::update_round(
        state.store.as_ref(),
        &slug,
        &designation_id,
        &round_id,
        patch,
        Utc::now(),
    )
    .await?;
    Ok(Json(MutationResponse::ok("Round updated")))
}

/// DELETE /api/companies/:slug/designations/:designation_id/rounds/:round_id
///
/// Remaining rounds are renumbered in the same write.
pub async fn handle_delete_round(
    State(state): State<AppState>,
    Path((slug, designation_id, round_id)): Path<(String, String, String)>,
) -> Result<Json<MutationResponse>, AppError> {
    rounds::delete_round(
        state.store.as_ref(),
        &slug,
        &designation_id,
        &round_id,
        Utc::now(),
    )
    .await?;
    Ok(Json(MutationResponse::ok("Round deleted and rounds reordered")))
}

// ────────────────────────────────────────────────────────────────────────────
// Sources & projections
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/companies/:slug/sources
pub async fn handle_list_sources(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(sources::list_sources(state.store.as_ref(), &slug).await?))
}

/// GET /api/interview-processes
pub async fn handle_list_interview_processes(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<FlatListParams>,
) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(
        projection::list_flat(state.store.as_ref(), &params).await?,
    ))
}

/// POST /api/companies/:slug/projections/rebuild
pub async fn handle_rebuild_projections(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<RebuildResponse>, AppError> {
    crate::catalog::require_company(state.store.as_ref(), &slug).await?;
    let rebuilt = projection::rebuild_company(state.store.as_ref(), &slug, Utc::now()).await?;
    Ok(Json(RebuildResponse {
        success: true,
        rebuilt,
    }))
}
