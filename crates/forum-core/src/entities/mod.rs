//! Domain entities - core business objects

mod reaction;

pub use reaction::{
    sign_value, Reaction, ReactionCounts, ReactionKey, ReactionTransition, Sign, SubjectKind,
};
