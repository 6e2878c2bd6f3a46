//! Configuration merging and precedence handling.
//!
//! This module implements hierarchical merging of configuration sources,
//! with special handling for accumulated fields like restriction paths and
//! extension lists.

use crate::config::loader::ConfigSource;
use crate::config::schema::{
    Config, MountConfig, RestrictionConfig, RootsConfig, TraversalConfig,
};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use pathward::config::{Config, ConfigMerger};
///
/// let low = Config { max_symlink_depth: Some(8), ..Default::default() };
/// let high = Config { max_symlink_depth: Some(32), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.max_symlink_depth, Some(32));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Restriction paths, skip prefixes and extension lists: accumulated,
    ///   keeping first-seen order and dropping repeats
    /// - Nested configs: field-by-field merge
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.max_symlink_depth.is_some() {
            target.max_symlink_depth = source.max_symlink_depth;
        }

        if let Some(ref roots) = source.roots {
            target.roots = Some(match &target.roots {
                Some(existing) => Self::merge_roots(existing, roots),
                None => roots.clone(),
            });
        }

        if let Some(ref restrictions) = source.restrictions {
            target.restrictions = Some(match &target.restrictions {
                Some(existing) => Self::merge_restrictions(existing, restrictions),
                None => restrictions.clone(),
            });
        }

        if let Some(ref traversal) = source.traversal {
            target.traversal = Some(match &target.traversal {
                Some(existing) => Self::merge_traversal(existing, traversal),
                None => traversal.clone(),
            });
        }

        if let Some(ref mounts) = source.mounts {
            target.mounts = Some(MountConfig {
                table_path: mounts.table_path.clone().or_else(|| {
                    target
                        .mounts
                        .as_ref()
                        .and_then(|m| m.table_path.clone())
                }),
            });
        }
    }

    fn merge_roots(target: &RootsConfig, source: &RootsConfig) -> RootsConfig {
        RootsConfig {
            temp: source.temp.clone().or_else(|| target.temp.clone()),
            data: source.data.clone().or_else(|| target.data.clone()),
            web: source.web.clone().or_else(|| target.web.clone()),
        }
    }

    /// Merge restriction configuration.
    ///
    /// A source that turns `allow_all` on discards accumulated paths, since
    /// the two cannot coexist.
    fn merge_restrictions(
        target: &RestrictionConfig,
        source: &RestrictionConfig,
    ) -> RestrictionConfig {
        let allow_all = source.allow_all.or(target.allow_all);
        let paths = if source.allow_all == Some(true) {
            source.paths.clone()
        } else {
            union(target.paths.as_ref(), source.paths.as_ref())
        };

        RestrictionConfig {
            label: source.label.clone().or_else(|| target.label.clone()),
            allow_all,
            paths,
        }
    }

    fn merge_traversal(target: &TraversalConfig, source: &TraversalConfig) -> TraversalConfig {
        TraversalConfig {
            recurse: source.recurse.or(target.recurse),
            follow_symlinks: source.follow_symlinks.or(target.follow_symlinks),
            follow_hidden: source.follow_hidden.or(target.follow_hidden),
            extension_allow: union(
                target.extension_allow.as_ref(),
                source.extension_allow.as_ref(),
            ),
            extension_deny: union(
                target.extension_deny.as_ref(),
                source.extension_deny.as_ref(),
            ),
            skip: union(target.skip.as_ref(), source.skip.as_ref()),
            ignore_action_errors: source.ignore_action_errors.or(target.ignore_action_errors),
            temporary_mode: source.temporary_mode.or(target.temporary_mode),
        }
    }
}

/// Order-preserving union of two optional lists.
fn union<T: Clone + PartialEq>(target: Option<&Vec<T>>, source: Option<&Vec<T>>) -> Option<Vec<T>> {
    match (target, source) {
        (None, None) => None,
        (Some(list), None) | (None, Some(list)) => Some(list.clone()),
        (Some(target), Some(source)) => {
            let mut merged = target.clone();
            for item in source {
                if !merged.contains(item) {
                    merged.push(item.clone());
                }
            }
            Some(merged)
        }
    }
}
