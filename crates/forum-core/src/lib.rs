//! # forum-core
//!
//! Domain layer for forum reactions: entities, value objects, store traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    sign_value, Reaction, ReactionCounts, ReactionKey, ReactionTransition, Sign, SubjectKind,
};
pub use error::DomainError;
pub use traits::{ReactionRepository, ReactionTransaction, RepoResult, SubjectRepository};
pub use value_objects::UserId;
