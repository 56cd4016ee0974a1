//! Read-optimized interview process projection.
//!
//! A cache over Company + Designation + InterviewRound. It is only ever built
//! by `FlatProjection::rebuild` and written with overwrite semantics; nothing
//! patches it field by field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::company::{Company, CountryCategory};
use crate::models::designation::Designation;
use crate::models::level::{Level, LocationType, NormalizedLevel, Taxonomy, Track};
use crate::models::round::{InterviewRound, RoundType};
use crate::store::paths;

const SUMMARY_FOCUS_AREAS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRoundSummary {
    pub order: u8,
    #[serde(rename = "type")]
    pub round_type: RoundType,
    pub duration_mins: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f64>,
    pub focus_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatProjection {
    pub id: String,
    pub company_slug: String,
    pub company_name: String,
    pub country: CountryCategory,
    pub industry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub designation_id: String,
    pub title: String,
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_level: Option<NormalizedLevel>,
    pub taxonomy: Taxonomy,
    pub track: Track,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
    pub rounds_count: u32,
    pub total_duration_mins: u32,
    pub rounds: Vec<FlatRoundSummary>,
    pub updated_at: DateTime<Utc>,
}

impl FlatProjection {
    /// Recomputes the projection in full from its sources of truth.
    pub fn rebuild(
        company_slug: &str,
        company: &Company,
        designation_id: &str,
        designation: &Designation,
        rounds: &[InterviewRound],
        now: DateTime<Utc>,
    ) -> Self {
        let mut ordered: Vec<&InterviewRound> = rounds.iter().collect();
        ordered.sort_by_key(|r| r.order);

        let summaries: Vec<FlatRoundSummary> = ordered
            .iter()
            .map(|r| FlatRoundSummary {
                order: r.order,
                round_type: r.round_type,
                duration_mins: r.duration_mins,
                difficulty: r.difficulty,
                focus_areas: r
                    .focus_areas
                    .iter()
                    .take(SUMMARY_FOCUS_AREAS)
                    .cloned()
                    .collect(),
            })
            .collect();

        FlatProjection {
            id: paths::flat_id(company_slug, designation_id),
            company_slug: company_slug.to_string(),
            company_name: company.name.clone(),
            country: company.country,
            industry: company.industry.clone(),
            logo_url: company.logo_url.clone(),
            designation_id: designation_id.to_string(),
            title: designation.title.clone(),
            level: designation.level,
            normalized_level: designation.normalized_level,
            taxonomy: designation.taxonomy,
            track: designation.track,
            location_type: designation.location_type,
            rounds_count: summaries.len() as u32,
            total_duration_mins: ordered.iter().map(|r| r.duration_mins as u32).sum(),
            rounds: summaries,
            updated_at: now,
        }
    }
}
