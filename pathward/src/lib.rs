#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathward
//!
//! Path-restricted filesystem access, guarded directory traversal and
//! mount-table inspection.
//!
//! Every filesystem operation in this crate is checked against a
//! [`RestrictionSet`]: an ordered list of allowed path prefixes, each with its
//! own write permission. Paths are normalized and their symlinks resolved
//! before they are compared, so `..` segments and symlinks cannot be used to
//! reach outside an allowed prefix.
//!
//! ## Core Types
//!
//! - [`PathResolver`], [`NormalizedPath`] and [`PathRelationship`]: lexical
//!   normalization and symlink-aware canonicalization
//! - [`RestrictionSet`] and [`RestrictionEntry`]: prefix-based access policy
//! - [`TraversalEngine`], [`TraversalSpec`] and [`TraversalSummary`]:
//!   filtered, restriction-checked walks that run an action per entry
//! - [`DuplicateResolver`]: deletes all but the first file of each
//!   duplicate group
//! - [`mount::MountTable`]: indexed snapshot of the kernel mount table
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use pathward::{RestrictionSet, TraversalEngine, TraversalSpec};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("a.txt"), "a").unwrap();
//! std::fs::write(dir.path().join("b.exe"), "b").unwrap();
//!
//! let mut restrictions = RestrictionSet::new("uploads");
//! restrictions.add_path(dir.path(), false).unwrap();
//!
//! let spec = TraversalSpec::new([dir.path()]).with_denied_extensions(["exe"]);
//! let mut seen = Vec::new();
//! let summary = TraversalEngine::new(&restrictions)
//!     .run(&spec, |path| {
//!         seen.push(path.file_name().unwrap().to_owned());
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(seen, vec!["a.txt"]);
//! assert_eq!(summary.processed, 1);
//! assert_eq!(summary.skipped, 1);
//! ```

pub mod config;
pub mod dedup;
pub mod error;
pub mod fs;
pub mod logging;
pub mod mount;
pub mod path;
pub mod restriction;
pub mod traversal;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use dedup::{DuplicateGroup, DuplicateOutcome, DuplicateResolver};
pub use error::{ActionError, Error, Result};
pub use fs::{FileHandle, LocalFile, TemporaryMode};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{NormalizedPath, PathRelationship, PathResolver};
pub use restriction::{RestrictionEntry, RestrictionSet};
pub use traversal::{ActionResult, TraversalEngine, TraversalSpec, TraversalSummary};
