pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::generation::handlers as generation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation pipeline
        .route(
            "/api/generate-company",
            post(generation::handle_generate_company),
        )
        // Companies
        .route(
            "/api/companies",
            get(catalog::handle_list_companies).post(catalog::handle_create_company),
        )
        .route(
            "/api/companies/:slug",
            get(catalog::handle_get_company)
                .put(catalog::handle_update_company)
                .delete(catalog::handle_delete_company),
        )
        // Designations
        .route(
            "/api/companies/:slug/designations",
            get(catalog::handle_list_designations).post(catalog::handle_create_designation),
        )
        .route(
            "/api/companies/:slug/designations/:designation_id",
            get(catalog::handle_get_designation)
                .put(catalog::handle_update_designation)
                .delete(catalog::handle_delete_designation),
        )
        // Rounds
        .route(
            "/api/companies/:slug/designations/:designation_id/rounds",
            get(catalog::handle_list_rounds).post(catalog::handle_create_round),
        )
        .route(
            "/api/companies/:slug/designations/:designation_id/rounds/:round_id",
            get(catalog::handle_get_round)
                .put(catalog::handle_update_round)
                .delete(catalog::handle_delete_round),
        )
        // Sources & flat projections
        .route(
            "/api/companies/:slug/sources",
            get(catalog::handle_list_sources),
        )
        .route(
            "/api/companies/:slug/projections/rebuild",
            post(catalog::handle_rebuild_projections),
        )
        .route(
            "/api/interview-processes",
            get(catalog::handle_list_interview_processes),
        )
        .with_state(state)
}
