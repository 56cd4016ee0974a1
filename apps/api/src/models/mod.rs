pub mod company;
pub mod designation;
pub mod flat;
pub mod level;
pub mod round;
pub mod source;

use serde::{Deserialize, Deserializer, Serialize};

pub use company::{Company, DataSource};
pub use designation::Designation;
pub use flat::FlatProjection;
pub use level::{NormalizedLevel, Taxonomy};
pub use round::InterviewRound;

use source::Source;

/// Reads an explicit `null` the same as a missing key. Pair with
/// `#[serde(default)]`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A company's complete interview data as produced by generation:
/// the company, its designations (each with nested rounds) and citations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub company: Company,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub designations: Vec<Designation>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub sources: Vec<Source>,
}
