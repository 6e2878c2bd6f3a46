//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for pathward:
//! named roots, the restriction set, traversal defaults and the mount-table
//! source.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Complete configuration structure.
///
/// Every field is optional so that partial files from several sources can
/// be layered on top of each other.
///
/// # Examples
///
/// ```
/// use pathward::config::{Config, RootsConfig};
/// use std::path::PathBuf;
///
/// let config = Config {
///     roots: Some(RootsConfig {
///         data: Some(PathBuf::from("/srv/data")),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert!(config.restrictions.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Named directory roots.
    pub roots: Option<RootsConfig>,

    /// The restriction set applied to every operation.
    pub restrictions: Option<RestrictionConfig>,

    /// Defaults for traversal runs.
    pub traversal: Option<TraversalConfig>,

    /// Mount-table settings.
    pub mounts: Option<MountConfig>,

    /// Symlink hops followed before a chain is treated as a loop.
    pub max_symlink_depth: Option<usize>,
}

/// Named directory roots.
///
/// These are passed explicitly to whatever needs them instead of being read
/// from process-wide globals.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RootsConfig {
    /// Scratch space.
    pub temp: Option<PathBuf>,
    /// Application data.
    pub data: Option<PathBuf>,
    /// Publicly served files.
    pub web: Option<PathBuf>,
}

impl RootsConfig {
    /// The configured roots with their names, in a fixed order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, &PathBuf)> {
        [
            ("temp", self.temp.as_ref()),
            ("data", self.data.as_ref()),
            ("web", self.web.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, path)| path.map(|p| (name, p)))
    }
}

/// Restriction set configuration.
///
/// # Examples
///
/// ```
/// use pathward::config::RestrictionConfig;
///
/// let yaml = r#"
/// label: uploads
/// paths:
///   - /srv/uploads/archive
///   - path: /srv/uploads
///     write: true
/// "#;
/// let config: RestrictionConfig = serde_yaml::from_str(yaml).unwrap();
/// let paths = config.paths.unwrap();
/// assert!(!paths[0].write);
/// assert!(paths[1].write);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RestrictionConfig {
    /// Label used in error messages.
    pub label: Option<String>,

    /// Use the unrestricted policy. Cannot be combined with `paths`.
    pub allow_all: Option<bool>,

    /// Allowed prefixes in match order.
    pub paths: Option<Vec<RestrictedPath>>,
}

/// One allowed prefix.
///
/// Written either as a bare path (read-only) or as `{ path, write }`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RestrictedPath {
    /// The prefix.
    pub path: PathBuf,
    /// Whether writes are allowed beneath it.
    pub write: bool,
}

impl<'de> Deserialize<'de> for RestrictedPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Bare(PathBuf),
            Full {
                path: PathBuf,
                #[serde(default)]
                write: bool,
            },
        }

        Ok(match Helper::deserialize(deserializer)? {
            Helper::Bare(path) => Self { path, write: false },
            Helper::Full { path, write } => Self { path, write },
        })
    }
}

/// Traversal defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TraversalConfig {
    /// Descend into nested directories.
    pub recurse: Option<bool>,

    /// Follow symlinked entries.
    pub follow_symlinks: Option<bool>,

    /// Include dot-entries.
    pub follow_hidden: Option<bool>,

    /// Only process files with these extensions.
    pub extension_allow: Option<Vec<String>>,

    /// Skip files with these extensions.
    pub extension_deny: Option<Vec<String>>,

    /// Prefixes never visited.
    pub skip: Option<Vec<PathBuf>>,

    /// Record action failures and keep going.
    pub ignore_action_errors: Option<bool>,

    /// Permission mode applied around each action.
    pub temporary_mode: Option<u32>,
}

/// Mount-table configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MountConfig {
    /// File to read instead of `/proc/mounts`.
    pub table_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.roots.is_none());
        assert!(config.restrictions.is_none());
        assert!(config.traversal.is_none());
        assert!(config.mounts.is_none());
        assert!(config.max_symlink_depth.is_none());
    }

    #[test]
    fn test_config_deny_unknown_fields() {
        let yaml = "unknown_field: value\n";
        let result: Result<Config, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());

        let yaml = "traversal:\n  recursive: true\n";
        let result: Result<Config, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_restricted_path_forms() {
        let bare: RestrictedPath = serde_yaml::from_str("/srv/a").unwrap();
        assert_eq!(
            bare,
            RestrictedPath {
                path: PathBuf::from("/srv/a"),
                write: false
            }
        );

        let full: RestrictedPath = serde_yaml::from_str("path: /srv/b\nwrite: true\n").unwrap();
        assert!(full.write);

        let defaulted: RestrictedPath = serde_yaml::from_str("path: /srv/c\n").unwrap();
        assert!(!defaulted.write);
    }

    #[test]
    fn test_minimal_config() {
        let config: Config = serde_yaml::from_str("max_symlink_depth: 8\n").unwrap();
        assert_eq!(config.max_symlink_depth, Some(8));
    }

    #[test]
    fn test_complete_config() {
        let yaml = r"
roots:
  temp: /var/tmp/app
  data: /srv/data
  web: /var/www
restrictions:
  label: app
  paths:
    - /srv/data/readonly
    - path: /srv/data
      write: true
traversal:
  recurse: true
  follow_symlinks: false
  follow_hidden: false
  extension_allow: [jpg, png]
  extension_deny: [exe]
  skip: [/srv/data/cache]
  ignore_action_errors: true
  temporary_mode: 384
mounts:
  table_path: /proc/self/mounts
max_symlink_depth: 16
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        let roots = config.roots.unwrap();
        let named: Vec<_> = roots.named().map(|(name, _)| name).collect();
        assert_eq!(named, vec!["temp", "data", "web"]);

        let restrictions = config.restrictions.unwrap();
        assert_eq!(restrictions.label.as_deref(), Some("app"));
        assert_eq!(restrictions.paths.unwrap().len(), 2);

        let traversal = config.traversal.unwrap();
        assert_eq!(traversal.recurse, Some(true));
        assert_eq!(traversal.temporary_mode, Some(0o600));
        assert_eq!(traversal.extension_allow.unwrap(), vec!["jpg", "png"]);

        assert_eq!(
            config.mounts.unwrap().table_path,
            Some(PathBuf::from("/proc/self/mounts"))
        );
        assert_eq!(config.max_symlink_depth, Some(16));
    }

    #[test]
    fn test_roots_named_skips_unset() {
        let roots = RootsConfig {
            web: Some(PathBuf::from("/var/www")),
            ..Default::default()
        };
        let named: Vec<_> = roots.named().collect();
        assert_eq!(named, vec![("web", &PathBuf::from("/var/www"))]);
    }
}
