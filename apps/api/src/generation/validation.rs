//! Schema validation for company interview data.
//!
//! Validation is all-or-nothing: either a fully typed, defaulted `Payload`
//! comes back, or a `ValidationError` listing every failing field path.
//!
//! Two passes run over the input. The typed pass decodes each section
//! (company, every designation, every round, every source) on its own so that
//! enum and type mismatches are reported per path. The constraint pass then
//! walks whatever decoded and checks bounds, lengths, URLs and round ordering.

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::company::Company;
use crate::models::designation::Designation;
use crate::models::round::InterviewRound;
use crate::models::source::Source;
use crate::models::Payload;
use crate::slug::{is_valid_slug, slugify};

pub const MAX_ROUNDS: usize = 15;
pub const MAX_FOCUS_AREAS: usize = 15;
pub const MAX_DESIGNATIONS: usize = 30;
pub const MAX_SOURCES: usize = 50;
pub const MAX_LIST_ITEMS: usize = 50;
pub const MIN_DURATION_MINS: u16 = 15;
pub const MAX_DURATION_MINS: u16 = 240;

const MAX_NAME_LEN: usize = 120;
const MAX_SLUG_LEN: usize = 80;
const MAX_INDUSTRY_LEN: usize = 80;
const MAX_TITLE_LEN: usize = 160;
const MAX_OVERVIEW_LEN: usize = 4000;
const MAX_NOTES_LEN: usize = 2000;
const MAX_TAG_LEN: usize = 40;
const MAX_ITEM_LEN: usize = 200;
const MAX_PROMPT_LEN: usize = 1000;
const MAX_URL_LEN: usize = 2048;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Validation failed: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.path, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                path: path.into(),
                message: message.into(),
            }],
        }
    }

    #[cfg(test)]
    pub fn has_path(&self, path: &str) -> bool {
        self.issues.iter().any(|i| i.path == path)
    }
}

/// Accumulates issues; converted into a `ValidationError` at the end.
#[derive(Debug, Default)]
pub struct Issues(Vec<FieldIssue>);

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues: self.0 })
        }
    }

    fn required(&mut self, path: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.push(path, "must not be empty");
        } else {
            self.max_len(path, value, max);
        }
    }

    fn max_len(&mut self, path: &str, value: &str, max: usize) {
        let len = value.chars().count();
        if len > max {
            self.push(path, format!("must be at most {max} characters (got {len})"));
        }
    }

    fn optional(&mut self, path: &str, value: Option<&str>, max: usize) {
        if let Some(v) = value {
            self.max_len(path, v, max);
        }
    }

    fn unit_range(&mut self, path: &str, value: Option<f64>) {
        if let Some(v) = value {
            if !(0.0..=1.0).contains(&v) {
                self.push(path, format!("must be between 0 and 1 (got {v})"));
            }
        }
    }

    fn url(&mut self, path: &str, value: &str) {
        if value.len() > MAX_URL_LEN {
            self.push(path, format!("URL must be at most {MAX_URL_LEN} characters"));
            return;
        }
        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {}
            Ok(_) => self.push(path, "must be an http(s) URL"),
            Err(e) => self.push(path, format!("is not a valid URL: {e}")),
        }
    }

    fn optional_url(&mut self, path: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.url(path, v);
        }
    }

    fn string_list(&mut self, path: &str, items: &[String], max_items: usize, max_len: usize) {
        if items.len() > max_items {
            self.push(
                path,
                format!("must have at most {max_items} items (got {})", items.len()),
            );
        }
        for (i, item) in items.iter().enumerate() {
            self.required(&format!("{path}[{i}]"), item, max_len);
        }
    }

    fn url_list(&mut self, path: &str, items: &[String]) {
        if items.len() > MAX_LIST_ITEMS {
            self.push(
                path,
                format!("must have at most {MAX_LIST_ITEMS} items (got {})", items.len()),
            );
        }
        for (i, item) in items.iter().enumerate() {
            self.url(&format!("{path}[{i}]"), item);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Constraint checks
// ────────────────────────────────────────────────────────────────────────────

pub fn check_company(company: &Company, prefix: &str, issues: &mut Issues) {
    let p = |field: &str| format!("{prefix}.{field}");

    issues.required(&p("name"), &company.name, MAX_NAME_LEN);
    issues.optional(&p("slug"), company.slug.as_deref(), MAX_SLUG_LEN);
    // The name is the key source whenever the slug is unusable.
    let has_key_slug = company.slug.as_deref().map(str::trim).is_some_and(is_valid_slug);
    if !has_key_slug && !company.name.trim().is_empty() && slugify(&company.name).is_empty() {
        issues.push(p("name"), "must contain letters or digits");
    }
    issues.required(&p("industry"), &company.industry, MAX_INDUSTRY_LEN);
    if let Some(year) = company.founded_year {
        if !(1800..=2100).contains(&year) {
            issues.push(p("foundedYear"), format!("must be between 1800 and 2100 (got {year})"));
        }
    }
    issues.optional(&p("employeeCountBand"), company.employee_count_band.as_deref(), 40);
    issues.optional_url(&p("logoUrl"), company.logo_url.as_deref());
    issues.optional_url(&p("logoDarkUrl"), company.logo_dark_url.as_deref());
    issues.optional_url(&p("website"), company.website.as_deref());
    issues.string_list(&p("tags"), &company.tags, MAX_LIST_ITEMS, MAX_TAG_LEN);

    for (label, band) in &company.salary_bands {
        let bp = format!("{prefix}.salaryBands.{label}");
        if label.trim().is_empty() {
            issues.push(&bp, "designation label must not be empty");
        }
        if band.min < 0.0 || band.max < 0.0 {
            issues.push(&bp, "min and max must not be negative");
        }
        if band.min > band.max {
            issues.push(&bp, format!("min ({}) must not exceed max ({})", band.min, band.max));
        }
        let currency_ok =
            band.currency.len() == 3 && band.currency.chars().all(|c| c.is_ascii_uppercase());
        if !currency_ok {
            issues.push(
                format!("{bp}.currency"),
                format!("must be a 3-letter upper-case currency code (got '{}')", band.currency),
            );
        }
    }
}

pub fn check_round(round: &InterviewRound, prefix: &str, issues: &mut Issues) {
    let p = |field: &str| format!("{prefix}.{field}");

    if round.order == 0 || round.order as usize > MAX_ROUNDS {
        issues.push(
            p("order"),
            format!("must be between 1 and {MAX_ROUNDS} (got {})", round.order),
        );
    }
    if !(MIN_DURATION_MINS..=MAX_DURATION_MINS).contains(&round.duration_mins) {
        issues.push(
            p("durationMins"),
            format!(
                "must be between {MIN_DURATION_MINS} and {MAX_DURATION_MINS} (got {})",
                round.duration_mins
            ),
        );
    }
    issues.optional(&p("title"), round.title.as_deref(), MAX_TITLE_LEN);
    issues.string_list(&p("focusAreas"), &round.focus_areas, MAX_FOCUS_AREAS, MAX_ITEM_LEN);
    issues.unit_range(&p("difficulty"), round.difficulty);
    issues.unit_range(&p("frequency"), round.frequency);
    issues.unit_range(&p("confidence"), round.confidence);

    for (i, criterion) in round.rubric.criteria.iter().enumerate() {
        let cp = format!("{prefix}.rubric.criteria[{i}]");
        issues.required(&format!("{cp}.name"), &criterion.name, MAX_ITEM_LEN);
        issues.unit_range(&format!("{cp}.weight"), Some(criterion.weight));
        issues.optional(
            &format!("{cp}.description"),
            criterion.description.as_deref(),
            MAX_NOTES_LEN,
        );
    }
    issues.unit_range(&p("rubric.passThreshold"), Some(round.rubric.pass_threshold));

    issues.string_list(
        &p("materials.examplePrompts"),
        &round.materials.example_prompts,
        MAX_LIST_ITEMS,
        MAX_PROMPT_LEN,
    );
    issues.url_list(&p("materials.links"), &round.materials.links);
    issues.url_list(&p("evidenceLinks"), &round.evidence_links);
}

/// Orders must be unique and run 1..=n.
pub fn check_round_orders(rounds: &[InterviewRound], prefix: &str, issues: &mut Issues) {
    if rounds.len() > MAX_ROUNDS {
        issues.push(
            prefix,
            format!("must have at most {MAX_ROUNDS} rounds (got {})", rounds.len()),
        );
        return;
    }
    let mut orders: Vec<u8> = rounds.iter().map(|r| r.order).collect();
    orders.sort_unstable();
    if let Some(w) = orders.windows(2).find(|w| w[0] == w[1]) {
        issues.push(prefix, format!("duplicate round order {}", w[0]));
        return;
    }
    let contiguous = orders
        .iter()
        .enumerate()
        .all(|(i, &order)| order as usize == i + 1);
    if !contiguous {
        issues.push(
            prefix,
            format!("round orders must be contiguous from 1 (got {orders:?})"),
        );
    }
}

pub fn check_designation(designation: &Designation, prefix: &str, issues: &mut Issues) {
    let p = |field: &str| format!("{prefix}.{field}");

    issues.optional(&p("id"), designation.id.as_deref(), MAX_SLUG_LEN);
    issues.required(&p("title"), &designation.title, MAX_TITLE_LEN);
    issues.string_list(
        &p("levelAliases"),
        &designation.level_aliases.iter().cloned().collect::<Vec<_>>(),
        MAX_LIST_ITEMS,
        MAX_TAG_LEN,
    );
    issues.string_list(&p("locations"), &designation.locations, MAX_LIST_ITEMS, MAX_ITEM_LEN);
    issues.string_list(
        &p("mustHaveSkills"),
        &designation.must_have_skills,
        MAX_LIST_ITEMS,
        MAX_ITEM_LEN,
    );
    issues.string_list(
        &p("niceToHaveSkills"),
        &designation.nice_to_have_skills,
        MAX_LIST_ITEMS,
        MAX_ITEM_LEN,
    );
    issues.optional(&p("overview"), designation.overview.as_deref(), MAX_OVERVIEW_LEN);
    if let Some(count) = designation.previously_asked_rounds_count {
        if count as usize > MAX_ROUNDS {
            issues.push(
                p("previouslyAskedRoundsCount"),
                format!("must be at most {MAX_ROUNDS} (got {count})"),
            );
        }
    }

    for (i, round) in designation.rounds.iter().enumerate() {
        check_round(round, &format!("{prefix}.rounds[{i}]"), issues);
    }
    check_round_orders(&designation.rounds, &p("rounds"), issues);
}

pub fn check_source(source: &Source, prefix: &str, issues: &mut Issues) {
    issues.required(&format!("{prefix}.title"), &source.title, MAX_TITLE_LEN * 2);
    issues.optional_url(&format!("{prefix}.url"), source.url.as_deref());
    issues.optional(&format!("{prefix}.notes"), source.notes.as_deref(), MAX_NOTES_LEN);
}

// ────────────────────────────────────────────────────────────────────────────
// Typed decoding
// ────────────────────────────────────────────────────────────────────────────

fn decode_at<T: DeserializeOwned>(value: Value, path: &str, issues: &mut Issues) -> Option<T> {
    match serde_json::from_value::<T>(value) {
        Ok(v) => Some(v),
        Err(e) => {
            issues.push(path, e.to_string());
            None
        }
    }
}

fn array_at(root: &mut serde_json::Map<String, Value>, key: &str, issues: &mut Issues) -> Vec<Value> {
    match root.remove(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            issues.push(key, "must be an array");
            Vec::new()
        }
    }
}

/// Decodes a single document body for CRUD input, reporting serde failures at `$`.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ValidationError> {
    serde_json::from_value(value).map_err(|e| ValidationError::single("$", e.to_string()))
}

/// Every `field` must be present and non-null at the top level of `value`.
pub fn require_fields(value: &Value, fields: &[&str]) -> Result<(), ValidationError> {
    let mut issues = Issues::new();
    for field in fields {
        if value.get(*field).map_or(true, Value::is_null) {
            issues.push(*field, "is required");
        }
    }
    issues.into_result()
}

pub fn validate_company(value: Value) -> Result<Company, ValidationError> {
    let company: Company = decode(value)?;
    let mut issues = Issues::new();
    check_company(&company, "company", &mut issues);
    issues.into_result()?;
    Ok(company)
}

pub fn validate_designation(value: Value) -> Result<Designation, ValidationError> {
    let designation: Designation = decode(value)?;
    let mut issues = Issues::new();
    check_designation(&designation, "designation", &mut issues);
    issues.into_result()?;
    Ok(designation)
}

pub fn validate_round(value: Value) -> Result<InterviewRound, ValidationError> {
    let round: InterviewRound = decode(value)?;
    let mut issues = Issues::new();
    check_round(&round, "round", &mut issues);
    issues.into_result()?;
    Ok(round)
}

/// Validates an arbitrary parsed JSON value as a complete `Payload`.
pub fn validate_payload(value: Value) -> Result<Payload, ValidationError> {
    let mut issues = Issues::new();

    let mut root = match value {
        Value::Object(map) => map,
        other => {
            return Err(ValidationError::single(
                "$",
                format!("expected a JSON object, got {}", json_kind(&other)),
            ))
        }
    };

    let company: Option<Company> = match root.remove("company") {
        Some(v) => decode_at(v, "company", &mut issues),
        None => {
            issues.push("company", "is required");
            None
        }
    };

    let raw_designations = array_at(&mut root, "designations", &mut issues);
    if raw_designations.is_empty() {
        issues.push("designations", "must contain at least one designation");
    }
    if raw_designations.len() > MAX_DESIGNATIONS {
        issues.push(
            "designations",
            format!("must have at most {MAX_DESIGNATIONS} items (got {})", raw_designations.len()),
        );
    }

    let mut designations = Vec::with_capacity(raw_designations.len());
    for (i, raw) in raw_designations.into_iter().enumerate() {
        let path = format!("designations[{i}]");
        let mut raw = match raw {
            Value::Object(map) => map,
            other => {
                issues.push(&path, format!("expected an object, got {}", json_kind(&other)));
                continue;
            }
        };
        let raw_rounds = array_at(&mut raw, "rounds", &mut issues);
        let mut rounds = Vec::with_capacity(raw_rounds.len());
        for (j, raw_round) in raw_rounds.into_iter().enumerate() {
            if let Some(round) =
                decode_at::<InterviewRound>(raw_round, &format!("{path}.rounds[{j}]"), &mut issues)
            {
                rounds.push(round);
            }
        }
        if let Some(mut designation) =
            decode_at::<Designation>(Value::Object(raw), &path, &mut issues)
        {
            designation.rounds = rounds;
            designations.push(designation);
        }
    }

    let raw_sources = array_at(&mut root, "sources", &mut issues);
    if raw_sources.len() > MAX_SOURCES {
        issues.push(
            "sources",
            format!("must have at most {MAX_SOURCES} items (got {})", raw_sources.len()),
        );
    }
    let sources: Vec<Source> = raw_sources
        .into_iter()
        .enumerate()
        .filter_map(|(i, raw)| decode_at(raw, &format!("sources[{i}]"), &mut issues))
        .collect();

    if let Some(company) = &company {
        check_company(company, "company", &mut issues);
    }
    for (i, designation) in designations.iter().enumerate() {
        check_designation(designation, &format!("designations[{i}]"), &mut issues);
    }
    for (i, source) in sources.iter().enumerate() {
        check_source(source, &format!("sources[{i}]"), &mut issues);
    }

    issues.into_result()?;
    match company {
        Some(company) => Ok(Payload {
            company,
            designations,
            sources,
        }),
        None => Err(ValidationError::single("company", "is required")),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "company": {
                "name": "Acme Corp",
                "country": "India",
                "industry": "Fintech",
                "website": "https://acme.example",
                "salaryBands": {"SDE2": {"min": 20, "max": 35, "currency": "INR"}}
            },
            "designations": [{
                "title": "SDE3 – Frontend",
                "level": "SDE3",
                "track": "Frontend",
                "rounds": [
                    {"order": 1, "type": "DSA", "durationMins": 60, "focusAreas": ["arrays"]},
                    {"order": 2, "type": "MachineCoding", "durationMins": 90,
                     "materials": {"links": ["https://example.com/prompt"]}}
                ]
            }],
            "sources": [
                {"kind": "glassdoor", "title": "Glassdoor reviews", "url": "https://glassdoor.com/x"}
            ]
        })
    }

    #[test]
    fn test_valid_payload_decodes_with_defaults() {
        let payload = validate_payload(valid_payload()).unwrap();
        assert_eq!(payload.company.name, "Acme Corp");
        assert_eq!(payload.designations.len(), 1);
        let designation = &payload.designations[0];
        assert_eq!(designation.rounds.len(), 2);
        assert_eq!(designation.rounds[1].rubric.pass_threshold, 0.65);
        assert_eq!(designation.taxonomy, crate::models::Taxonomy::Mixed);
        assert!(designation.level_aliases.is_empty());
    }

    #[test]
    fn test_non_object_rejected() {
        let err = validate_payload(json!([1, 2])).unwrap_err();
        assert!(err.has_path("$"));
    }

    #[test]
    fn test_every_failing_path_is_reported() {
        let mut value = valid_payload();
        value["company"]["website"] = json!("not a url");
        value["designations"][0]["rounds"][0]["durationMins"] = json!(10);
        value["designations"][0]["rounds"][1]["difficulty"] = json!(1.5);
        value["sources"][0]["title"] = json!("");

        let err = validate_payload(value).unwrap_err();
        assert!(err.has_path("company.website"), "{err}");
        assert!(err.has_path("designations[0].rounds[0].durationMins"), "{err}");
        assert!(err.has_path("designations[0].rounds[1].difficulty"), "{err}");
        assert!(err.has_path("sources[0].title"), "{err}");
        assert_eq!(err.issues.len(), 4);
    }

    #[test]
    fn test_enum_violations_reported_per_path() {
        let mut value = valid_payload();
        value["designations"][0]["level"] = json!("E7");
        value["designations"][0]["rounds"][1]["type"] = json!("Trivia");
        value["sources"][0]["kind"] = json!("tiktok");

        let err = validate_payload(value).unwrap_err();
        assert!(err.has_path("designations[0]"), "{err}");
        assert!(err.has_path("designations[0].rounds[1]"), "{err}");
        assert!(err.has_path("sources[0]"), "{err}");
    }

    #[test]
    fn test_missing_company_and_designations() {
        let err = validate_payload(json!({"sources": []})).unwrap_err();
        assert!(err.has_path("company"));
        assert!(err.has_path("designations"));
    }

    #[test]
    fn test_duplicate_round_orders_rejected() {
        let mut value = valid_payload();
        value["designations"][0]["rounds"][1]["order"] = json!(1);
        let err = validate_payload(value).unwrap_err();
        assert!(err.has_path("designations[0].rounds"), "{err}");
        assert!(err.to_string().contains("duplicate round order 1"));
    }

    #[test]
    fn test_gapped_round_orders_rejected() {
        let mut value = valid_payload();
        value["designations"][0]["rounds"][1]["order"] = json!(3);
        let err = validate_payload(value).unwrap_err();
        assert!(err.to_string().contains("contiguous"), "{err}");
    }

    #[test]
    fn test_order_above_fifteen_rejected() {
        let mut value = valid_payload();
        value["designations"][0]["rounds"][1]["order"] = json!(16);
        let err = validate_payload(value).unwrap_err();
        assert!(err.has_path("designations[0].rounds[1].order"), "{err}");
    }

    #[test]
    fn test_too_many_focus_areas_rejected() {
        let mut value = valid_payload();
        let areas: Vec<String> = (0..16).map(|i| format!("area {i}")).collect();
        value["designations"][0]["rounds"][0]["focusAreas"] = json!(areas);
        let err = validate_payload(value).unwrap_err();
        assert!(err.has_path("designations[0].rounds[0].focusAreas"), "{err}");
    }

    #[test]
    fn test_salary_band_min_above_max_rejected() {
        let mut value = valid_payload();
        value["company"]["salaryBands"]["SDE2"] = json!({"min": 50, "max": 10, "currency": "inr"});
        let err = validate_payload(value).unwrap_err();
        assert!(err.has_path("company.salaryBands.SDE2"), "{err}");
        assert!(err.has_path("company.salaryBands.SDE2.currency"), "{err}");
    }

    #[test]
    fn test_non_http_url_rejected() {
        let mut value = valid_payload();
        value["designations"][0]["rounds"][0]["evidenceLinks"] = json!(["ftp://files.example"]);
        let err = validate_payload(value).unwrap_err();
        assert!(err.has_path("designations[0].rounds[0].evidenceLinks[0]"), "{err}");
    }

    #[test]
    fn test_null_sources_treated_as_empty() {
        let mut value = valid_payload();
        value["sources"] = Value::Null;
        let payload = validate_payload(value).unwrap();
        assert!(payload.sources.is_empty());
    }

    #[test]
    fn test_name_without_slug_characters_rejected() {
        let mut value = valid_payload();
        value["company"]["name"] = json!("!!!");
        let err = validate_payload(value.clone()).unwrap_err();
        assert!(err.has_path("company.name"), "{err}");

        value["company"]["slug"] = json!("bang-bang");
        assert!(validate_payload(value).is_ok());
    }

    #[test]
    fn test_null_collections_take_their_defaults() {
        let mut value = valid_payload();
        value["company"]["tags"] = Value::Null;
        value["company"]["salaryBands"] = Value::Null;
        value["designations"][0]["levelAliases"] = Value::Null;
        value["designations"][0]["mustHaveSkills"] = Value::Null;
        value["designations"][0]["rounds"][0]["focusAreas"] = Value::Null;
        value["designations"][0]["rounds"][0]["rubric"] = Value::Null;
        value["designations"][0]["rounds"][0]["materials"] = Value::Null;
        value["designations"][0]["rounds"][0]["evidenceLinks"] = Value::Null;

        let payload = validate_payload(value).unwrap();
        assert!(payload.company.tags.is_empty());
        assert!(payload.company.salary_bands.is_empty());
        let designation = &payload.designations[0];
        assert!(designation.level_aliases.is_empty());
        assert!(designation.must_have_skills.is_empty());
        let round = &designation.rounds[0];
        assert!(round.focus_areas.is_empty());
        assert_eq!(round.rubric.pass_threshold, 0.65);
        assert!(round.materials.links.is_empty());
        assert!(round.evidence_links.is_empty());
    }

    #[test]
    fn test_display_joins_every_issue() {
        let mut issues = Issues::new();
        issues.push("company.name", "must not be empty");
        issues.push("designations", "must contain at least one designation");
        let err = issues.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: company.name: must not be empty; \
             designations: must contain at least one designation"
        );
    }

    #[test]
    fn test_require_fields_reports_each_missing_field() {
        let err = require_fields(&json!({"type": "DSA", "focusAreas": null}), &[
            "type",
            "durationMins",
            "focusAreas",
        ])
        .unwrap_err();
        assert!(err.has_path("durationMins"));
        assert!(err.has_path("focusAreas"));
        assert!(!err.has_path("type"));
    }

    #[test]
    fn test_validate_round_checks_bounds() {
        let err = validate_round(json!({"order": 1, "type": "DSA", "durationMins": 300}))
            .unwrap_err();
        assert!(err.has_path("round.durationMins"), "{err}");
        assert!(validate_round(json!({"order": 1, "type": "DSA", "durationMins": 30})).is_ok());
    }

    #[test]
    fn test_validate_company_rejects_bad_enum_at_root() {
        let err = validate_company(json!({"name": "Acme", "country": "Mars", "industry": "x"}))
            .unwrap_err();
        assert!(err.has_path("$"));
    }

    #[test]
    fn test_display_lists_paths() {
        let err = ValidationError::single("company.name", "must not be empty");
        assert_eq!(err.to_string(), "Validation failed: company.name: must not be empty");
    }
}
