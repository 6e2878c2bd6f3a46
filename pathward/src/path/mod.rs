//! Path normalization, canonicalization and containment checks.
//!
//! # Key Concepts
//!
//! ## Normalization
//!
//! Normalization converts user input into an absolute path by:
//! - Rejecting empty input
//! - Expanding a leading tilde (~) to the home directory
//! - Converting relative paths to absolute paths
//! - Resolving `.` and `..` components and collapsing repeated separators
//!
//! ## Canonicalization
//!
//! Canonicalization follows symlinks to get the real path on the
//! filesystem. Paths that do not exist yet are canonicalized up to their
//! longest existing ancestor, so a path about to be created compares the
//! same way as one that already exists. Symlink chains are followed with a
//! hop bound, which turns cyclic links into [`crate::Error::SymlinkLoop`].
//!
//! Every prefix comparison in the crate (restrictions, skip lists, mount
//! lookups) happens on canonical paths.
//!
//! # Examples
//!
//! ```no_run
//! use pathward::path::{PathRelationship, PathResolver};
//! use std::path::Path;
//!
//! let resolver = PathResolver::new();
//! let upload = resolver.canonical(Path::new("/srv/uploads/../uploads/a.png")).unwrap();
//! let root = resolver.canonical(Path::new("/srv/uploads")).unwrap();
//! assert!(PathRelationship::is_within(&upload, &root));
//! ```

pub mod canonicalize;
pub mod normalize;
pub mod relationship;
pub mod resolver;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use relationship::PathRelationship;
pub use resolver::PathResolver;
pub use types::NormalizedPath;
