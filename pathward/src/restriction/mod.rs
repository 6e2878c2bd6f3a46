//! Path restriction sets.
//!
//! A [`RestrictionSet`] is an ordered allow-list of canonical path prefixes,
//! each carrying its own write permission, plus a label used in error
//! messages. Every filesystem operation the crate performs on behalf of a
//! caller is authorized against one.
//!
//! # Matching rules
//!
//! - Candidate paths are canonicalized before matching, so `..` tricks and
//!   symlinked aliases resolve to the location they actually touch.
//! - Prefixes match whole components: `/srv/data` covers `/srv/data/x` but
//!   not `/srv/database`.
//! - The **first** matching entry decides. Entries are never merged, which
//!   lets callers place a narrow read-only entry ahead of a broad writable one.
//! - A set with no entries denies everything. Unrestricted access is the
//!   separate [`RestrictionSet::allow_all`] policy.
//!
//! # Examples
//!
//! ```no_run
//! use pathward::RestrictionSet;
//!
//! let mut set = RestrictionSet::new("uploads");
//! set.add_path("/srv/uploads/archive", false).unwrap();
//! set.add_path("/srv/uploads", true).unwrap();
//!
//! assert!(set.check_write("/srv/uploads/new.png").is_ok());
//! assert!(set.check_read("/srv/uploads/archive/old.png").is_ok());
//! assert!(set.check_write("/srv/uploads/archive/old.png").is_err());
//! assert!(set.check_read("/etc/shadow").is_err());
//! ```

mod set;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use set::{RestrictionEntry, RestrictionSet, ALLOW_ALL_LABEL};
