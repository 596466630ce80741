//! Model to entity mappers
//!
//! - `ReactionModel::into_entity`: convert database rows to domain objects
//! - `ReactionInsert`: prepare entity data for database writes
//! - `ReactionTable`: per-kind table and column selection

mod reaction;
mod subject;

pub use reaction::ReactionInsert;
pub use subject::ReactionTable;
