//! Derived designation fields: normalized level, taxonomy, alias set and the
//! cached round count. Everything here is pure; applying it twice yields the
//! same payload as applying it once.

use crate::models::{Designation, NormalizedLevel, Payload, Taxonomy};

/// Maps a raw level label onto the canonical L3..L7 bucket. Case-insensitive.
pub fn normalize_level(label: &str) -> Option<NormalizedLevel> {
    let upper = label.trim().to_ascii_uppercase();
    let level = match upper.as_str() {
        "SDE1" | "L3" | "IC3" | "MTS-1" => NormalizedLevel::L3,
        "SDE2" | "L4" | "IC4" | "MTS-2" => NormalizedLevel::L4,
        "SDE3" | "L5" | "IC5" | "MTS-3" | "SMTS" | "SENIOR" => NormalizedLevel::L5,
        "SDE4" | "L6" | "IC6" | "PMTS" | "STAFF" => NormalizedLevel::L6,
        "SDE5" | "L7" | "IC7" | "PRINCIPAL" => NormalizedLevel::L7,
        _ => return None,
    };
    Some(level)
}

/// Leveling family by label prefix. `Staff`, `Senior` and `Principal` match
/// no family and fall through to `Mixed`.
pub fn derive_taxonomy(label: &str) -> Taxonomy {
    let upper = label.trim().to_ascii_uppercase();
    let mut chars = upper.chars();
    let l_numbered = chars.next() == Some('L') && chars.next().is_some_and(|c| c.is_ascii_digit());

    if upper.starts_with("SDE") {
        Taxonomy::Sde
    } else if l_numbered {
        Taxonomy::L
    } else if upper.starts_with("IC") {
        Taxonomy::Ic
    } else if upper.contains("MTS") {
        Taxonomy::Mts
    } else {
        Taxonomy::Mixed
    }
}

pub fn derive_designation(mut designation: Designation) -> Designation {
    let label = designation.level.as_str();

    if let Some(level) = normalize_level(label) {
        designation.normalized_level = Some(level);
    }
    designation.taxonomy = derive_taxonomy(label);
    designation.level_aliases.insert(label.to_string());

    designation.rounds.sort_by_key(|r| r.order);
    if designation.previously_asked_rounds_count.unwrap_or(0) == 0 {
        designation.previously_asked_rounds_count = Some(designation.rounds.len() as u32);
    }
    designation
}

pub fn derive_payload(mut payload: Payload) -> Payload {
    payload.designations = payload
        .designations
        .into_iter()
        .map(derive_designation)
        .collect();
    payload
}
