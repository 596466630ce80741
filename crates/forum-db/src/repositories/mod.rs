//! Repository implementations
//!
//! PostgreSQL implementations of the store traits defined in forum-core.

mod error;
mod reaction;
mod subject;

pub use reaction::{PgReactionRepository, PgReactionTransaction};
pub use subject::PgSubjectRepository;
