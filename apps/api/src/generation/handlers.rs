//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiJson, AppError};
use crate::generation::generator::generate_company;
use crate::models::{null_as_default, Payload};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCompanyRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCompanyResponse {
    pub ok: bool,
    pub company_id: String,
    pub stored: Payload,
}

/// POST /api/generate-company
///
/// Generates, validates and stores interview data for one company.
/// 400 on a blank name; any generation, validation or store failure is a 500.
pub async fn handle_generate_company(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateCompanyRequest>,
) -> Result<Json<GenerateCompanyResponse>, AppError> {
    let policy = state.config.repair_policy();
    let outcome = generate_company(
        state.store.as_ref(),
        state.generator.as_ref(),
        &policy,
        &request.company_name,
    )
    .await?;

    Ok(Json(GenerateCompanyResponse {
        ok: true,
        company_id: outcome.company_id,
        stored: outcome.stored,
    }))
}
