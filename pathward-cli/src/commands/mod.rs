//! CLI command implementations.
//!
//! - `normalize`: Lexically normalize a path
//! - `resolve`: Follow a symlink chain with loop protection
//! - `check`: Check read or write access against the restriction set
//! - `walk`: Guarded traversal of one or more roots
//! - `mounts`: Mount-table lookups by target, source or containment
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod check;
pub mod completions;
pub mod mounts;
pub mod normalize;
pub mod resolve;
pub mod validate;
pub mod walk;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use mounts::MountsCommand;
pub use normalize::NormalizeCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
pub use walk::WalkCommand;
