//! Property-based tests for path handling.
//!
//! The normalize module carries its own component-level properties; this
//! module focuses on containment and ancestor arithmetic.

use super::normalize::normalize_path;
use super::relationship::PathRelationship;
use proptest::prelude::*;
use std::path::PathBuf;

fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn absolute_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..8).prop_map(|parts| {
        let mut path = PathBuf::from("/");
        for part in parts {
            path.push(part);
        }
        path
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Every path is within itself and within the root
    #[test]
    fn containment_reflexive(path in absolute_path_strategy()) {
        prop_assert!(PathRelationship::is_within(&path, &path));
        prop_assert!(PathRelationship::is_within(&path, std::path::Path::new("/")));
    }

    // A sibling that merely shares a string prefix is never contained
    #[test]
    fn string_prefix_is_not_containment(path in absolute_path_strategy(), suffix in "[a-z]{1,5}") {
        let mut sibling = path.clone().into_os_string();
        sibling.push(&suffix);
        let sibling = PathBuf::from(sibling);
        prop_assert!(!PathRelationship::is_within(&sibling, &path));
    }

    // The n-th ancestor always contains the path
    #[test]
    fn ancestor_contains_path(path in absolute_path_strategy(), levels in 0..10usize) {
        let ancestor = PathRelationship::ancestor(&path, levels);
        prop_assert!(PathRelationship::is_within(&path, &ancestor));
    }

    // Parent references never let a normalized path escape its base
    #[test]
    fn normalized_join_stays_or_errors(base in absolute_path_strategy(), ups in 0..10usize) {
        let mut candidate = base.clone();
        for _ in 0..ups {
            candidate.push("..");
        }
        candidate.push("leaf");
        if let Ok(normalized) = normalize_path(&candidate) {
            prop_assert!(!normalized.to_string_lossy().contains(".."));
        }
    }
}
