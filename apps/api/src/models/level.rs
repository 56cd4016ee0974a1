//! Closed catalogs for designations: raw level labels, normalized buckets,
//! leveling taxonomies, tracks and location types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw level label as reported by a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "SDE1")]
    Sde1,
    #[serde(rename = "SDE2")]
    Sde2,
    #[serde(rename = "SDE3")]
    Sde3,
    #[serde(rename = "SDE4")]
    Sde4,
    #[serde(rename = "SDE5")]
    Sde5,
    L3,
    L4,
    L5,
    L6,
    L7,
    #[serde(rename = "IC3")]
    Ic3,
    #[serde(rename = "IC4")]
    Ic4,
    #[serde(rename = "IC5")]
    Ic5,
    #[serde(rename = "IC6")]
    Ic6,
    #[serde(rename = "IC7")]
    Ic7,
    #[serde(rename = "MTS-1")]
    Mts1,
    #[serde(rename = "MTS-2")]
    Mts2,
    #[serde(rename = "MTS-3")]
    Mts3,
    #[serde(rename = "SMTS")]
    Smts,
    #[serde(rename = "PMTS")]
    Pmts,
    Senior,
    Staff,
    Principal,
}

impl Level {
    #[cfg(test)]
    pub const ALL: [Level; 23] = [
        Level::Sde1,
        Level::Sde2,
        Level::Sde3,
        Level::Sde4,
        Level::Sde5,
        Level::L3,
        Level::L4,
        Level::L5,
        Level::L6,
        Level::L7,
        Level::Ic3,
        Level::Ic4,
        Level::Ic5,
        Level::Ic6,
        Level::Ic7,
        Level::Mts1,
        Level::Mts2,
        Level::Mts3,
        Level::Smts,
        Level::Pmts,
        Level::Senior,
        Level::Staff,
        Level::Principal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Sde1 => "SDE1",
            Level::Sde2 => "SDE2",
            Level::Sde3 => "SDE3",
            Level::Sde4 => "SDE4",
            Level::Sde5 => "SDE5",
            Level::L3 => "L3",
            Level::L4 => "L4",
            Level::L5 => "L5",
            Level::L6 => "L6",
            Level::L7 => "L7",
            Level::Ic3 => "IC3",
            Level::Ic4 => "IC4",
            Level::Ic5 => "IC5",
            Level::Ic6 => "IC6",
            Level::Ic7 => "IC7",
            Level::Mts1 => "MTS-1",
            Level::Mts2 => "MTS-2",
            Level::Mts3 => "MTS-3",
            Level::Smts => "SMTS",
            Level::Pmts => "PMTS",
            Level::Senior => "Senior",
            Level::Staff => "Staff",
            Level::Principal => "Principal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical L3–L7 bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NormalizedLevel {
    L3,
    L4,
    L5,
    L6,
    L7,
}

/// The leveling scheme family a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Taxonomy {
    #[serde(rename = "SDE")]
    Sde,
    L,
    #[serde(rename = "IC")]
    Ic,
    #[serde(rename = "MTS")]
    Mts,
    #[default]
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    Frontend,
    Fullstack,
    Mobile,
    Backend,
    #[serde(rename = "Web Platform")]
    WebPlatform,
}

impl Track {
    pub fn as_str(&self) -> &'static str {
        match self {
            Track::Frontend => "Frontend",
            Track::Fullstack => "Fullstack",
            Track::Mobile => "Mobile",
            Track::Backend => "Backend",
            Track::WebPlatform => "Web Platform",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationType {
    Onsite,
    Hybrid,
    Remote,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serde_uses_catalog_labels() {
        for level in Level::ALL {
            let json = serde_json::to_value(level).unwrap();
            assert_eq!(json, serde_json::Value::String(level.as_str().to_string()));
            let back: Level = serde_json::from_value(json).unwrap();
            assert_eq!(back, level);
        }
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        assert!(serde_json::from_str::<Level>("\"E5\"").is_err());
    }

    #[test]
    fn test_web_platform_track_label() {
        let track: Track = serde_json::from_str("\"Web Platform\"").unwrap();
        assert_eq!(track, Track::WebPlatform);
        assert_eq!(track.as_str(), "Web Platform");
    }

    #[test]
    fn test_taxonomy_defaults_to_mixed() {
        assert_eq!(Taxonomy::default(), Taxonomy::Mixed);
        assert_eq!(serde_json::to_string(&Taxonomy::Sde).unwrap(), "\"SDE\"");
    }
}
