//! Persisted layout.
//!
//! ```text
//! companies/{slug}
//! companies/{slug}/designations/{designationId}
//! companies/{slug}/designations/{designationId}/interview_rounds/{paddedOrder}
//! companies/{slug}/sources/{titleSlug}
//! interview_process_flat/{slug}__{designationId}
//! ```

use super::{StoreError, StoreResult};

pub const COMPANIES: &str = "companies";
pub const DESIGNATIONS: &str = "designations";
pub const INTERVIEW_ROUNDS: &str = "interview_rounds";
pub const SOURCES: &str = "sources";
pub const INTERVIEW_PROCESS_FLAT: &str = "interview_process_flat";

pub fn company(slug: &str) -> String {
    format!("{COMPANIES}/{slug}")
}

pub fn designations(slug: &str) -> String {
    format!("{COMPANIES}/{slug}/{DESIGNATIONS}")
}

pub fn designation(slug: &str, designation_id: &str) -> String {
    format!("{}/{designation_id}", designations(slug))
}

pub fn rounds(slug: &str, designation_id: &str) -> String {
    format!("{}/{INTERVIEW_ROUNDS}", designation(slug, designation_id))
}

pub fn round(slug: &str, designation_id: &str, order: u8) -> String {
    format!("{}/{}", rounds(slug, designation_id), round_id(order))
}

/// Round documents are keyed by their zero-padded order.
pub fn round_id(order: u8) -> String {
    format!("{order:02}")
}

pub fn sources(slug: &str) -> String {
    format!("{COMPANIES}/{slug}/{SOURCES}")
}

pub fn source(slug: &str, key: &str) -> String {
    format!("{}/{key}", sources(slug))
}

pub fn flat_id(slug: &str, designation_id: &str) -> String {
    format!("{slug}__{designation_id}")
}

pub fn flat(slug: &str, designation_id: &str) -> String {
    format!("{INTERVIEW_PROCESS_FLAT}/{}", flat_id(slug, designation_id))
}

/// Splits a document path into `(collection, id)`.
///
/// A document path has an even number of non-empty segments.
pub fn split(path: &str) -> StoreResult<(&str, &str)> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 2 || segments.len() % 2 != 0 || segments.iter().any(|s| s.is_empty()) {
        return Err(StoreError::InvalidPath(path.to_string()));
    }
    let idx = path.rfind('/').ok_or_else(|| StoreError::InvalidPath(path.to_string()))?;
    Ok((&path[..idx], &path[idx + 1..]))
}
