//! Store traits (ports) - define the interface for reaction persistence
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Reaction, ReactionCounts, ReactionKey, Sign, SubjectKind};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Stored sign for a key, `None` when the user has not reacted
    async fn get_sign(&self, key: &ReactionKey) -> RepoResult<Option<Sign>>;

    /// Insert a new reaction. Fails with `ReactionAlreadyExists` if the key is taken.
    async fn insert(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Overwrite the sign of an existing reaction. Fails with `ReactionNotFound`.
    async fn update_sign(&self, key: &ReactionKey, sign: Sign) -> RepoResult<()>;

    /// Remove an existing reaction. Fails with `ReactionNotFound`.
    async fn delete(&self, key: &ReactionKey) -> RepoResult<()>;

    /// Like and dislike counts for a subject
    async fn count_by_sign(&self, kind: SubjectKind, subject_id: i64) -> RepoResult<ReactionCounts>;

    /// Open a unit of work holding exclusive access to `key`
    ///
    /// Concurrent `begin` calls for the same key wait for the holder to commit or
    /// drop its transaction; other keys are unaffected.
    async fn begin(&self, key: &ReactionKey) -> RepoResult<Box<dyn ReactionTransaction>>;

    /// Cheap connectivity check for readiness probes
    async fn ping(&self) -> RepoResult<()>;
}

/// Key-scoped unit of work returned by [`ReactionRepository::begin`]
///
/// Dropping the transaction without calling `commit` discards its writes.
#[async_trait]
pub trait ReactionTransaction: Send {
    /// Stored sign for the locked key
    async fn current_sign(&mut self) -> RepoResult<Option<Sign>>;

    async fn insert(&mut self, sign: Sign) -> RepoResult<()>;

    async fn update_sign(&mut self, sign: Sign) -> RepoResult<()>;

    async fn delete(&mut self) -> RepoResult<()>;

    /// Make the transaction's writes visible and release the key
    async fn commit(self: Box<Self>) -> RepoResult<()>;
}

// ============================================================================
// Subject Repository
// ============================================================================

/// Existence lookups for posts and comments owned by the content layer
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    async fn exists(&self, kind: SubjectKind, subject_id: i64) -> RepoResult<bool>;
}
