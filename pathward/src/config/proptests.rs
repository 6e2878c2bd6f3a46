//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::{Config, TraversalConfig};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn extension_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9]{1,5}", 0..6)
}

fn traversal_strategy() -> impl Strategy<Value = TraversalConfig> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(extension_list_strategy()),
        prop::option::of(0u32..=0o7777),
    )
        .prop_map(|(recurse, follow_hidden, extension_deny, temporary_mode)| TraversalConfig {
            recurse,
            follow_hidden,
            extension_deny,
            temporary_mode,
            ..Default::default()
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(traversal_strategy()),
        prop::option::of(1usize..=1024),
    )
        .prop_map(|(traversal, max_symlink_depth)| Config {
            traversal,
            max_symlink_depth,
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Higher-precedence values win whenever they are present
    #[test]
    fn config_merge_higher_precedence_wins(
        low in config_strategy(),
        high in config_strategy(),
    ) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(
            result.max_symlink_depth,
            high.max_symlink_depth.or(low.max_symlink_depth)
        );

        let low_recurse = low.traversal.as_ref().and_then(|t| t.recurse);
        let high_recurse = high.traversal.as_ref().and_then(|t| t.recurse);
        let merged_recurse = result.traversal.as_ref().and_then(|t| t.recurse);
        prop_assert_eq!(merged_recurse, high_recurse.or(low_recurse));
    }

    // Empty config is identity element for merge
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Accumulated lists keep every extension from both sides exactly once
    #[test]
    fn extension_lists_accumulate_without_repeats(
        low in extension_list_strategy(),
        high in extension_list_strategy(),
    ) {
        let wrap = |list: &Vec<String>| Config {
            traversal: Some(TraversalConfig {
                extension_deny: Some(list.clone()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let mut merged = wrap(&low);
        ConfigMerger::merge_into(&mut merged, &wrap(&high));
        let deny = merged.traversal.unwrap().extension_deny.unwrap();

        prop_assert_eq!(&deny[..low.len()], &low[..]);
        for ext in &high {
            prop_assert!(deny.contains(ext));
            if !low.contains(ext) {
                prop_assert_eq!(deny.iter().filter(|d| *d == ext).count(), 1);
            }
        }
    }

    // Generated configs are always valid, and stay valid once merged
    #[test]
    fn valid_configs_stay_valid_after_merge(
        a in config_strategy(),
        b in config_strategy(),
    ) {
        prop_assert!(ConfigValidator::validate(&a).is_ok());
        let mut merged = a;
        ConfigMerger::merge_into(&mut merged, &b);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());
    }

    // Merging is associative for scalar fields
    #[test]
    fn config_merge_associative_depth(
        a in prop::option::of(1usize..=64),
        b in prop::option::of(1usize..=64),
        c in prop::option::of(1usize..=64),
    ) {
        let a = Config { max_symlink_depth: a, ..Default::default() };
        let b = Config { max_symlink_depth: b, ..Default::default() };
        let c = Config { max_symlink_depth: c, ..Default::default() };

        let mut left = a.clone();
        ConfigMerger::merge_into(&mut left, &b);
        ConfigMerger::merge_into(&mut left, &c);

        let mut right = a;
        let mut b_merge_c = b;
        ConfigMerger::merge_into(&mut b_merge_c, &c);
        ConfigMerger::merge_into(&mut right, &b_merge_c);

        prop_assert_eq!(left.max_symlink_depth, right.max_symlink_depth);
    }
}

