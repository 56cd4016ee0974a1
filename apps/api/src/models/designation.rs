use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::level::{Level, LocationType, NormalizedLevel, Taxonomy, Track};
use crate::models::round::InterviewRound;

/// A role/level/track combination within a company, e.g. "SDE3 – Frontend".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Designation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_level: Option<NormalizedLevel>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub taxonomy: Taxonomy,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub level_aliases: BTreeSet<String>,
    pub track: Track,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub locations: Vec<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub must_have_skills: Vec<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub nice_to_have_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previously_asked_rounds_count: Option<u32>,
    /// Present in generation payloads; persisted as `interview_rounds` sub-documents.
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub rounds: Vec<InterviewRound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl Designation {
    /// The designation as stored: identical fields minus the nested rounds.
    pub fn to_document(&self) -> serde_json::Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        if let serde_json::Value::Object(map) = &mut value {
            map.remove("rounds");
        }
        Ok(value)
    }
}
