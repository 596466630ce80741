//! Reaction service
//!
//! Records like/dislike votes on posts and comments and answers count and
//! per-user queries. Each vote is a read-then-write on one (kind, subject,
//! user) key, executed inside a key-scoped store transaction so concurrent
//! votes for the same key observe each other's result.

use forum_core::entities::{ReactionCounts, ReactionKey, ReactionTransition, Sign, SubjectKind};
use forum_core::error::DomainError;
use forum_core::value_objects::UserId;
use tracing::{info, instrument, warn};

use crate::dto::ReactionSummaryResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// What a vote did and the sign left behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub transition: ReactionTransition,
    /// Stored sign after the vote, `None` once toggled off
    pub sign: Option<Sign>,
}

impl ReactionOutcome {
    pub fn new(transition: ReactionTransition) -> Self {
        Self {
            transition,
            sign: transition.resulting_sign(),
        }
    }
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply a vote for `user_id` on a subject
    ///
    /// `requested` must be 1 or -1. Repeating the stored vote removes it, the
    /// opposite vote flips it, and a first vote inserts it.
    ///
    /// # Errors
    /// `InvalidSign` before any store access; store failures unchanged.
    #[instrument(skip(self, user_id), fields(user_id = %user_id))]
    pub async fn submit_reaction(
        &self,
        kind: SubjectKind,
        subject_id: i64,
        user_id: &UserId,
        requested: i64,
    ) -> ServiceResult<ReactionOutcome> {
        let requested = Sign::try_from(requested)?;
        let key = ReactionKey::new(kind, subject_id, user_id.clone());

        let mut tx = self.ctx.reaction_repo().begin(&key).await?;
        let existing = tx.current_sign().await?;
        let transition = ReactionTransition::plan(existing, requested);

        let applied = match transition {
            ReactionTransition::Insert(sign) => tx.insert(sign).await,
            ReactionTransition::Swap(sign) => tx.update_sign(sign).await,
            ReactionTransition::Remove => tx.delete().await,
        };
        if let Err(err) = applied {
            if err.is_conflict() {
                warn!(key = %key, "Reaction row appeared inside a locked transaction");
            }
            return Err(err.into());
        }

        tx.commit().await?;

        let outcome = ReactionOutcome::new(transition);
        info!(
            key = %key,
            action = transition.as_str(),
            sign = forum_core::sign_value(outcome.sign),
            "Reaction applied"
        );

        Ok(outcome)
    }

    /// Like and dislike counts for a subject
    #[instrument(skip(self))]
    pub async fn get_reaction_counts(
        &self,
        kind: SubjectKind,
        subject_id: i64,
    ) -> ServiceResult<ReactionCounts> {
        Ok(self.ctx.reaction_repo().count_by_sign(kind, subject_id).await?)
    }

    /// A user's current vote on a subject, `None` if there is none
    #[instrument(skip(self, user_id), fields(user_id = %user_id))]
    pub async fn get_reaction_sign(
        &self,
        user_id: &UserId,
        kind: SubjectKind,
        subject_id: i64,
    ) -> ServiceResult<Option<Sign>> {
        let key = ReactionKey::new(kind, subject_id, user_id.clone());
        Ok(self.ctx.reaction_repo().get_sign(&key).await?)
    }

    /// Counts plus the viewer's vote; anonymous viewers get no sign
    pub async fn get_reaction_summary(
        &self,
        viewer: Option<&UserId>,
        kind: SubjectKind,
        subject_id: i64,
    ) -> ServiceResult<ReactionSummaryResponse> {
        let counts = self.get_reaction_counts(kind, subject_id).await?;
        let sign = match viewer {
            Some(user_id) => self.get_reaction_sign(user_id, kind, subject_id).await?,
            None => None,
        };

        Ok(ReactionSummaryResponse::new(kind, subject_id, counts, sign))
    }

    /// Fail with `PostNotFound` / `CommentNotFound` unless the subject exists
    pub async fn require_subject(&self, kind: SubjectKind, subject_id: i64) -> ServiceResult<()> {
        if self.ctx.subject_repo().exists(kind, subject_id).await? {
            return Ok(());
        }

        let err = match kind {
            SubjectKind::Post => DomainError::PostNotFound(subject_id),
            SubjectKind::Comment => DomainError::CommentNotFound(subject_id),
        };
        Err(err.into())
    }

    // === Kind wrappers ===

    pub async fn submit_post_reaction(
        &self,
        post_id: i64,
        user_id: &UserId,
        sign: i64,
    ) -> ServiceResult<ReactionOutcome> {
        self.submit_reaction(SubjectKind::Post, post_id, user_id, sign).await
    }

    pub async fn submit_comment_reaction(
        &self,
        comment_id: i64,
        user_id: &UserId,
        sign: i64,
    ) -> ServiceResult<ReactionOutcome> {
        self.submit_reaction(SubjectKind::Comment, comment_id, user_id, sign).await
    }

    pub async fn post_reaction_counts(&self, post_id: i64) -> ServiceResult<ReactionCounts> {
        self.get_reaction_counts(SubjectKind::Post, post_id).await
    }

    pub async fn comment_reaction_counts(&self, comment_id: i64) -> ServiceResult<ReactionCounts> {
        self.get_reaction_counts(SubjectKind::Comment, comment_id).await
    }

    pub async fn post_reaction_sign(&self, user_id: &UserId, post_id: i64) -> ServiceResult<Option<Sign>> {
        self.get_reaction_sign(user_id, SubjectKind::Post, post_id).await
    }

    pub async fn comment_reaction_sign(
        &self,
        user_id: &UserId,
        comment_id: i64,
    ) -> ServiceResult<Option<Sign>> {
        self.get_reaction_sign(user_id, SubjectKind::Comment, comment_id).await
    }
}
