//! Traversal parameters and results.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::TraversalConfig;

/// Everything one traversal run needs to know.
///
/// The spec is immutable for the duration of a run and is shared by
/// reference through the whole recursion.
///
/// # Examples
///
/// ```
/// use pathward::TraversalSpec;
///
/// let spec = TraversalSpec::new(["/srv/uploads"])
///     .with_recurse(true)
///     .with_allowed_extensions(["JPG", ".png"])
///     .with_skip_prefix("/srv/uploads/cache");
///
/// assert!(spec.extension_allow.as_ref().unwrap().contains("jpg"));
/// assert!(spec.extension_allow.as_ref().unwrap().contains("png"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct TraversalSpec {
    /// Starting paths, deduplicated, in insertion order.
    pub roots: Vec<PathBuf>,

    /// Descend into nested directories.
    pub recurse: bool,

    /// Follow symlinked entries instead of skipping them.
    pub follow_symlinks: bool,

    /// Include entries whose name starts with a dot.
    pub follow_hidden: bool,

    /// When set, only files with one of these extensions are processed.
    pub extension_allow: Option<HashSet<String>>,

    /// When set, files with one of these extensions are skipped.
    pub extension_deny: Option<HashSet<String>>,

    /// Paths never visited, along with everything beneath them.
    pub skip_prefixes: Vec<PathBuf>,

    /// Permission mode applied around each action invocation.
    pub temporary_mode: Option<u32>,

    /// Record action failures and keep going instead of stopping.
    pub ignore_action_errors: bool,
}

impl TraversalSpec {
    /// Create a spec for `roots` with every option off.
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut spec = Self::default();
        for root in roots {
            spec = spec.with_root(root);
        }
        spec
    }

    /// Create a spec for `roots` with options taken from configuration.
    #[must_use]
    pub fn from_config<I, P>(roots: I, config: &TraversalConfig) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut spec = Self::new(roots)
            .with_recurse(config.recurse.unwrap_or(false))
            .with_follow_symlinks(config.follow_symlinks.unwrap_or(false))
            .with_follow_hidden(config.follow_hidden.unwrap_or(false))
            .with_ignore_action_errors(config.ignore_action_errors.unwrap_or(false))
            .with_temporary_mode(config.temporary_mode);

        if let Some(allow) = &config.extension_allow {
            spec = spec.with_allowed_extensions(allow);
        }
        if let Some(deny) = &config.extension_deny {
            spec = spec.with_denied_extensions(deny);
        }
        for prefix in config.skip.iter().flatten() {
            spec = spec.with_skip_prefix(prefix);
        }
        spec
    }

    /// Add a root unless it is already present.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
        self
    }

    /// Set whether nested directories are descended into.
    #[must_use]
    pub const fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    /// Set whether symlinked entries are followed.
    #[must_use]
    pub const fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set whether dot-entries are included.
    #[must_use]
    pub const fn with_follow_hidden(mut self, follow: bool) -> Self {
        self.follow_hidden = follow;
        self
    }

    /// Add extensions to the allow-list, creating it if needed.
    ///
    /// Extensions are matched case-insensitively; a leading dot is ignored.
    #[must_use]
    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extension_allow
            .get_or_insert_with(HashSet::new)
            .extend(extensions.into_iter().map(|e| normalize_extension(e.as_ref())));
        self
    }

    /// Add extensions to the deny-list, creating it if needed.
    #[must_use]
    pub fn with_denied_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extension_deny
            .get_or_insert_with(HashSet::new)
            .extend(extensions.into_iter().map(|e| normalize_extension(e.as_ref())));
        self
    }

    /// Add a skip prefix. It is canonicalized when the run starts.
    #[must_use]
    pub fn with_skip_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.skip_prefixes.push(prefix.into());
        self
    }

    /// Set the permission mode applied around each action.
    #[must_use]
    pub const fn with_temporary_mode(mut self, mode: Option<u32>) -> Self {
        self.temporary_mode = mode;
        self
    }

    /// Set whether action failures are recorded instead of stopping the run.
    #[must_use]
    pub const fn with_ignore_action_errors(mut self, ignore: bool) -> Self {
        self.ignore_action_errors = ignore;
        self
    }
}

/// Lower-case an extension and strip a leading dot.
pub(crate) fn normalize_extension(extension: &str) -> String {
    extension
        .trim()
        .trim_start_matches('.')
        .to_ascii_lowercase()
}

/// Counters accumulated over one traversal run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalSummary {
    /// Entries the action was invoked on, whether or not it succeeded.
    pub processed: usize,

    /// Entries excluded by skip, hidden, symlink or extension policy, plus
    /// dead entries.
    pub skipped: usize,

    /// Action failures recorded while ignoring action errors.
    pub action_failures: usize,
}
