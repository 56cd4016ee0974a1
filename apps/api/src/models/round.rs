use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PASS_THRESHOLD: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundType {
    #[serde(rename = "DSA")]
    Dsa,
    MachineCoding,
    SystemDesign,
    FrontendCore,
    Behavioral,
    BarRaiser,
    HiringManager,
    CodingPair,
    TakeHome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricCriterion {
    pub name: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rubric {
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub criteria: Vec<RubricCriterion>,
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            criteria: Vec::new(),
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}

fn default_pass_threshold() -> f64 {
    DEFAULT_PASS_THRESHOLD
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Materials {
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub example_prompts: Vec<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub links: Vec<String>,
}

/// One stage of a designation's interview process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRound {
    pub order: u8,
    #[serde(rename = "type")]
    pub round_type: RoundType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub duration_mins: u16,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub focus_areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub rubric: Rubric,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub materials: Materials,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub evidence_links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}
