//! shardgrid-runtime — sizes work items from historical runtimes.
//!
//! The planner expects items that already carry weights. This crate is the
//! collaborator that supplies them: it reads a runtime log (`id:seconds`
//! per line), filters out ignored tags, and fills gaps for items the log
//! has never seen, failing when too many are missing.

pub mod error;
pub mod log;
pub mod sizing;

pub use error::{RuntimeError, RuntimeResult};
pub use log::RuntimeLog;
pub use sizing::{DEFAULT_ALLOWED_MISSING_PERCENT, SizingOptions, attach_weights};
