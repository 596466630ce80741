//! Reaction database models

use sqlx::FromRow;

/// Row of `posts_reactions` / `comments_reactions`
///
/// The subject column is aliased to `subject_id` so both partitions share one model.
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub user_id: String,
    pub subject_id: i64,
    pub sign: i16,
}

/// Aggregated like/dislike count (from query)
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ReactionCountModel {
    pub likes: i64,
    pub dislikes: i64,
}
