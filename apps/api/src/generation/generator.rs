//! Company Generation: orchestrates the full generation pipeline.
//!
//! Flow: build prompt → LLM generate (+ repair loop) → extract JSON →
//!       validate → derive → persist fan-out → return stored payload.
//!
//! Nothing is written unless the reply validated; the write itself is one
//! atomic batch.

use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::generation::derivation::derive_payload;
use crate::generation::persistence::{persist_payload, PersistOutcome};
use crate::generation::prompts::build_company_prompt;
use crate::generation::repair::{generate_payload, RepairPolicy};
use crate::llm_client::TextGenerator;
use crate::store::DocumentStore;

pub async fn generate_company(
    store: &dyn DocumentStore,
    generator: &dyn TextGenerator,
    policy: &RepairPolicy,
    company_name: &str,
) -> Result<PersistOutcome, AppError> {
    let company_name = company_name.trim();
    if company_name.is_empty() {
        return Err(AppError::BadRequest("companyName is required".to_string()));
    }

    info!("Generating interview data for '{company_name}'");
    let prompt = build_company_prompt(company_name);

    let mut payload = generate_payload(generator, &prompt, policy).await?;
    info!(
        "Payload validated: {} designations, {} sources",
        payload.designations.len(),
        payload.sources.len()
    );

    payload.company.source = generator.data_source();
    let payload = derive_payload(payload);

    let outcome = persist_payload(store, payload, Utc::now()).await?;
    info!("Stored generated data for company '{}'", outcome.company_id);

    Ok(outcome)
}
