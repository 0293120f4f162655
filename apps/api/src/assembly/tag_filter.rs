//! Tag Filter — the pure predicate deciding whether a tagged fragment
//! survives an include/exclude/mode filter.
//!
//! Exclusion always dominates: a fragment whose tag set intersects the
//! exclude set is dropped no matter what the include set or mode say.

use std::collections::BTreeSet;

use serde_yaml::Value;

use crate::errors::AppError;

pub const MODE_ANY: &str = "any";
pub const MODE_ALL: &str = "all";

/// The include/exclude/mode triple controlling fragment selection.
/// Built per request from raw comma-separated input.
#[derive(Debug, Clone)]
pub struct TagFilterSpec {
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
    pub mode: String,
}

impl TagFilterSpec {
    /// Parses raw comma-separated include/exclude strings and validates the
    /// mode eagerly, so an unknown mode fails the request before any
    /// rendering starts.
    pub fn from_raw(include: &str, exclude: &str, mode: &str) -> Result<Self, AppError> {
        let mode = mode.trim().to_lowercase();
        if mode != MODE_ANY && mode != MODE_ALL {
            return Err(AppError::InvalidMode(mode));
        }
        Ok(Self {
            include: split_csv(include),
            exclude: split_csv(exclude),
            mode,
        })
    }

    pub fn keeps(&self, tags: &BTreeSet<String>) -> Result<bool, AppError> {
        included(tags, &self.include, &self.exclude, &self.mode)
    }
}

/// Decides whether a fragment with `tags` survives the filter.
///
/// An unrecognized mode is a caller error and propagates as
/// `AppError::InvalidMode` rather than defaulting to either behavior.
pub fn included(
    tags: &BTreeSet<String>,
    include: &BTreeSet<String>,
    exclude: &BTreeSet<String>,
    mode: &str,
) -> Result<bool, AppError> {
    // Exclude always wins
    if !exclude.is_empty() && !tags.is_disjoint(exclude) {
        return Ok(false);
    }

    // If no include filter, keep everything (except excluded)
    if include.is_empty() {
        return Ok(true);
    }

    match mode {
        MODE_ANY => Ok(!tags.is_disjoint(include)),
        MODE_ALL => Ok(include.is_subset(tags)),
        other => Err(AppError::InvalidMode(other.to_string())),
    }
}

/// Normalizes a YAML tag value to a set of lower-cased, trimmed strings.
/// Missing value → empty set; single scalar → one-element set; sequence →
/// set of its stringified elements.
pub fn normalize_tags(value: Option<&Value>) -> BTreeSet<String> {
    match value {
        None | Some(Value::Null) => BTreeSet::new(),
        Some(Value::Sequence(items)) => items.iter().filter_map(canonical_tag).collect(),
        Some(scalar) => canonical_tag(scalar).into_iter().collect(),
    }
}

fn canonical_tag(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    Some(raw.trim().to_lowercase())
}

fn split_csv(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_exclude_wins_over_include_both_modes() {
        let tags = set(&["devops", "security"]);
        let include = set(&["devops"]);
        let exclude = set(&["security"]);
        for mode in [MODE_ANY, MODE_ALL] {
            assert!(
                !included(&tags, &include, &exclude, mode).unwrap(),
                "Excluded fragment kept in mode {mode}"
            );
        }
    }

    #[test]
    fn test_empty_filters_keep_everything() {
        let tags = set(&["anything"]);
        let empty = BTreeSet::new();
        for mode in [MODE_ANY, MODE_ALL] {
            assert!(included(&tags, &empty, &empty, mode).unwrap());
        }
        assert!(included(&BTreeSet::new(), &empty, &empty, MODE_ANY).unwrap());
    }

    #[test]
    fn test_mode_any_is_intersection_nonempty() {
        let include = set(&["rust", "go"]);
        let empty = BTreeSet::new();
        assert!(included(&set(&["rust"]), &include, &empty, MODE_ANY).unwrap());
        assert!(!included(&set(&["python"]), &include, &empty, MODE_ANY).unwrap());
        assert!(!included(&BTreeSet::new(), &include, &empty, MODE_ANY).unwrap());
    }

    #[test]
    fn test_mode_all_is_subset() {
        let include = set(&["rust", "go"]);
        let empty = BTreeSet::new();
        assert!(included(&set(&["rust", "go", "extra"]), &include, &empty, MODE_ALL).unwrap());
        assert!(!included(&set(&["rust"]), &include, &empty, MODE_ALL).unwrap());
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        let result = included(&set(&["rust"]), &set(&["rust"]), &BTreeSet::new(), "xor");
        match result {
            Err(AppError::InvalidMode(mode)) => assert_eq!(mode, "xor"),
            other => panic!("Expected InvalidMode, got {other:?}"),
        }
    }

    #[test]
    fn test_from_raw_normalizes_and_validates() {
        let spec = TagFilterSpec::from_raw(" DevOps , rust,, ", "Security", "ANY").unwrap();
        assert_eq!(spec.include, set(&["devops", "rust"]));
        assert_eq!(spec.exclude, set(&["security"]));
        assert_eq!(spec.mode, MODE_ANY);

        assert!(matches!(
            TagFilterSpec::from_raw("", "", "xor"),
            Err(AppError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_normalize_tags_shapes() {
        assert!(normalize_tags(None).is_empty());
        assert!(normalize_tags(Some(&Value::Null)).is_empty());

        let single = Value::String(" DevOps ".to_string());
        assert_eq!(normalize_tags(Some(&single)), set(&["devops"]));

        let seq: Value = serde_yaml::from_str("[Rust, 42, true]").unwrap();
        assert_eq!(normalize_tags(Some(&seq)), set(&["rust", "42", "true"]));
    }
}
