//! The inference engine: from observed exchanges to document updates.
//!
//! [`update::Updater`] is the entry point. The other modules are its building blocks, from
//! schema inference for a single JSON value up to merging whole operations.

pub mod diff;
pub mod media_type;
pub mod naming;
pub mod operation;
pub mod parameters;
pub mod paths;
pub mod schema;
pub mod update;
