//! Store traits (ports) implemented by the infrastructure layer

mod repositories;

pub use repositories::{ReactionRepository, ReactionTransaction, RepoResult, SubjectRepository};
