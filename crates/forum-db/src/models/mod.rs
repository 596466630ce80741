//! Database models - SQLx-compatible structs for PostgreSQL rows

mod reaction;

pub use reaction::{ReactionCountModel, ReactionModel};
