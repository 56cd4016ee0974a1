//! Generation client + repair loop.
//!
//! One generation attempt, followed by at most `RepairPolicy::max_repairs`
//! repair attempts. A repair is triggered when the reply has no JSON object,
//! is not valid JSON, or fails schema validation; the follow-up prompt carries
//! the literal error. Transport failures from the generator are not repaired.

use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::generation::extract::extract_json_object;
use crate::generation::prompts::{build_repair_prompt, COMPANY_GENERATION_SYSTEM};
use crate::generation::validation::{validate_payload, ValidationError};
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::Payload;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text generation failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model reply contained no JSON object")]
    NoJson,

    #[error("model reply is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Schema(#[from] ValidationError),

    #[error("gave up after {attempts} attempts; last error: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<GenerationError>,
    },
}

impl GenerationError {
    /// Whether another attempt with a repair prompt could fix this error.
    pub fn is_repairable(&self) -> bool {
        matches!(
            self,
            GenerationError::NoJson | GenerationError::Json(_) | GenerationError::Schema(_)
        )
    }
}

/// How many repair attempts follow a malformed reply, and how long to wait
/// before each. Defaults to one immediate repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairPolicy {
    pub max_repairs: u32,
    pub backoff: Duration,
}

impl Default for RepairPolicy {
    fn default() -> Self {
        Self {
            max_repairs: 1,
            backoff: Duration::ZERO,
        }
    }
}

/// Parses and validates one model reply.
pub fn parse_reply(reply: &str) -> Result<Payload, GenerationError> {
    let value = extract_json_object(reply)?;
    Ok(validate_payload(value)?)
}

/// Generates a validated `Payload` for `prompt`, repairing malformed replies
/// according to `policy`.
pub async fn generate_payload(
    generator: &dyn TextGenerator,
    prompt: &str,
    policy: &RepairPolicy,
) -> Result<Payload, GenerationError> {
    let total_attempts = policy.max_repairs + 1;
    let mut current_prompt = prompt.to_string();
    let mut last_error: Option<GenerationError> = None;

    for attempt in 1..=total_attempts {
        if attempt > 1 && !policy.backoff.is_zero() {
            tokio::time::sleep(policy.backoff).await;
        }

        let reply = generator
            .complete(&current_prompt, COMPANY_GENERATION_SYSTEM)
            .await?;

        match parse_reply(&reply) {
            Ok(payload) => {
                if attempt > 1 {
                    info!("Generation repaired on attempt {attempt}/{total_attempts}");
                }
                return Ok(payload);
            }
            Err(e) if e.is_repairable() => {
                warn!("Generation attempt {attempt}/{total_attempts} rejected: {e}");
                current_prompt = build_repair_prompt(prompt, &e.to_string());
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(GenerationError::Exhausted {
        attempts: total_attempts,
        last: Box::new(last_error.unwrap_or(GenerationError::NoJson)),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::models::DataSource;

    /// Replays canned replies in order and records every prompt it receives.
    pub struct ScriptedGenerator {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn new(replies: Vec<&str>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().map(|r| Ok(r.to_string())).collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(error: LlmError) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(vec![Err(error)])),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }

        fn data_source(&self) -> DataSource {
            DataSource::Gemini
        }
    }

    pub fn sample_reply() -> String {
        json!({
            "company": {
                "name": "Acme Corp",
                "country": "India",
                "industry": "Fintech"
            },
            "designations": [{
                "title": "SDE3 – Frontend",
                "level": "SDE3",
                "track": "Frontend",
                "rounds": [
                    {"order": 1, "type": "DSA", "durationMins": 60, "focusAreas": ["graphs"]},
                    {"order": 2, "type": "MachineCoding", "durationMins": 90, "focusAreas": ["react"]},
                    {"order": 3, "type": "SystemDesign", "durationMins": 60, "focusAreas": ["caching"]}
                ]
            }],
            "sources": [
                {"kind": "glassdoor", "title": "Glassdoor interview reviews"},
                {"kind": "leetcode", "title": "LeetCode discuss: Acme SDE3"},
                {"kind": "blog", "title": "My Acme frontend loop", "url": "https://blog.example/acme"}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_valid_reply_needs_one_call() {
        let reply = format!("Here is the data:\n{}\nThanks!", sample_reply());
        let generator = ScriptedGenerator::new(vec![&reply]);
        let payload = generate_payload(&generator, "PROMPT", &RepairPolicy::default())
            .await
            .unwrap();
        assert_eq!(payload.company.name, "Acme Corp");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_reply_is_repaired_once() {
        let good = sample_reply();
        let generator = ScriptedGenerator::new(vec!["Sorry, no data.", &good]);
        let payload = generate_payload(&generator, "PROMPT", &RepairPolicy::default())
            .await
            .unwrap();
        assert_eq!(payload.designations.len(), 1);

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0], "PROMPT");
        assert!(prompts[1].starts_with("PROMPT"));
        assert!(prompts[1].contains("no JSON object"));
    }

    #[tokio::test]
    async fn test_schema_failure_triggers_repair_with_error_text() {
        let bad = json!({"company": {"name": "Acme"}, "designations": []}).to_string();
        let good = sample_reply();
        let generator = ScriptedGenerator::new(vec![&bad, &good]);
        generate_payload(&generator, "PROMPT", &RepairPolicy::default())
            .await
            .unwrap();
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[1].contains("Validation failed"));
    }

    #[tokio::test]
    async fn test_second_failure_is_fatal() {
        let generator = ScriptedGenerator::new(vec!["nope", "still nope", "never asked"]);
        let err = generate_payload(&generator, "PROMPT", &RepairPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Exhausted { attempts: 2, .. }));
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_repairs_fails_after_first_attempt() {
        let generator = ScriptedGenerator::new(vec!["nope", "unused"]);
        let policy = RepairPolicy {
            max_repairs: 0,
            backoff: Duration::ZERO,
        };
        let err = generate_payload(&generator, "PROMPT", &policy).await.unwrap_err();
        assert!(matches!(err, GenerationError::Exhausted { attempts: 1, .. }));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_policy_allows_more_repairs() {
        let good = sample_reply();
        let generator = ScriptedGenerator::new(vec!["a", "b", &good]);
        let policy = RepairPolicy {
            max_repairs: 2,
            backoff: Duration::ZERO,
        };
        assert!(generate_payload(&generator, "PROMPT", &policy).await.is_ok());
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_waits_before_repair() {
        let good = sample_reply();
        let generator = ScriptedGenerator::new(vec!["bad", &good]);
        let policy = RepairPolicy {
            max_repairs: 1,
            backoff: Duration::from_secs(5),
        };
        let started = tokio::time::Instant::now();
        generate_payload(&generator, "PROMPT", &policy).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_transport_error_is_not_repaired() {
        let generator = ScriptedGenerator::failing(LlmError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        });
        let err = generate_payload(&generator, "PROMPT", &RepairPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Llm(_)));
        assert_eq!(generator.calls(), 1);
    }
}
