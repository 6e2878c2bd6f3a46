//! Restricted directory traversal.
//!
//! The [`TraversalEngine`] walks the roots of a [`TraversalSpec`] depth-first
//! and calls a caller-supplied action on each entry that survives the
//! filters. Every root is authorized against the engine's
//! [`RestrictionSet`](crate::RestrictionSet) before anything is touched, and
//! every discovered entry is authorized before it is used.
//!
//! Per entry the engine applies, in order:
//!
//! 1. the skip list (a skipped directory is never listed)
//! 2. the hidden-entry policy
//! 3. the symlink policy (followed links are resolved with loop protection)
//! 4. the extension allow-list and deny-list, both always consulted
//!
//! Policy exclusions and entries that vanish mid-walk are logged at warning
//! level and counted in [`TraversalSummary::skipped`]; they never fail a run.
//! Restriction errors always do.
//!
//! # Examples
//!
//! ```no_run
//! use pathward::{RestrictionSet, TraversalEngine, TraversalSpec};
//!
//! let mut site = RestrictionSet::new("site");
//! site.add_path("/var/www", true).unwrap();
//!
//! let spec = TraversalSpec::new(["/var/www/uploads"])
//!     .with_recurse(true)
//!     .with_denied_extensions(["php"])
//!     .with_temporary_mode(Some(0o600))
//!     .with_ignore_action_errors(true);
//!
//! let summary = TraversalEngine::new(&site)
//!     .run(&spec, |path| {
//!         std::fs::read(path)?;
//!         Ok(())
//!     })
//!     .unwrap();
//! println!("{} files, {} skipped", summary.processed, summary.skipped);
//! ```

mod engine;
mod spec;


pub use engine::TraversalEngine;
pub use spec::{TraversalSpec, TraversalSummary};

/// What a traversal action returns.
pub type ActionResult = std::result::Result<(), crate::error::ActionError>;
