//! Mount-table inspection.
//!
//! Mount state belongs to the kernel, so this module never edits a table in
//! place: [`MountTable`] is an immutable snapshot parsed from a
//! [`MountSource`] and rebuilt wholesale on every refresh. Malformed input
//! fails the whole parse rather than producing a partial table.
//!
//! Target lookups are exact matches on canonical paths;
//! [`MountTable::containing_mount`] answers the prefix question instead.

mod entry;
mod shared;
mod source;
mod table;

pub use entry::MountEntry;
pub use shared::SharedMountTable;
pub use source::{MountSource, ProcMounts, StaticMountSource, PROC_MOUNTS};
pub use table::MountTable;
