//! Deterministic, URL-safe document keys.

use std::sync::OnceLock;

use regex::Regex;

/// Longest key derived from a source title.
pub const SOURCE_KEY_MAX: usize = 60;

fn slug_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"))
}

/// Lower-cases, maps every run of non-alphanumerics to a single `-`,
/// and trims leading/trailing dashes. `"Acme Corp."` → `"acme-corp"`.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// `slugify` capped at `max` bytes without leaving a trailing dash.
pub fn slugify_capped(input: &str, max: usize) -> String {
    let mut slug = slugify(input);
    if slug.len() > max {
        slug.truncate(max);
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    slug
}

pub fn is_valid_slug(candidate: &str) -> bool {
    slug_pattern().is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_company_name() {
        assert_eq!(slugify("Acme Corp"), "acme-corp");
        assert_eq!(slugify("  Acme   Corp. (India) "), "acme-corp-india");
    }

    #[test]
    fn test_slugify_level_track() {
        assert_eq!(slugify("MTS-2-Web Platform"), "mts-2-web-platform");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("Zürich Café"), "z-rich-caf");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_slugify_capped_trims_trailing_dash() {
        let slug = slugify_capped("Glassdoor interview reviews for frontend", 10);
        assert_eq!(slug, "glassdoor");
        assert!(slug.len() <= 10);
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("acme-corp"));
        assert!(is_valid_slug("a1"));
        assert!(!is_valid_slug("Acme-Corp"));
        assert!(!is_valid_slug("acme--corp"));
        assert!(!is_valid_slug("-acme"));
        assert!(!is_valid_slug(""));
    }
}
