// Company Interview-Data Generation Pipeline
// Implements: prompt building, JSON extraction, schema validation, repair loop,
// derivation and the atomic persistence fan-out.
// All LLM calls go through llm_client; all writes go through the store port.

pub mod derivation;
pub mod extract;
pub mod generator;
pub mod handlers;
pub mod persistence;
pub mod prompts;
pub mod repair;
pub mod validation;
