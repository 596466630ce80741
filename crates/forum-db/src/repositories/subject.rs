//! PostgreSQL implementation of SubjectRepository
//!
//! Reads the content layer's `posts` / `comments` tables; this crate never writes them.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::SubjectKind;
use forum_core::traits::{RepoResult, SubjectRepository};

use crate::mappers::ReactionTable;

use super::error::map_db_error;

/// PostgreSQL implementation of SubjectRepository
#[derive(Clone)]
pub struct PgSubjectRepository {
    pool: PgPool,
}

impl PgSubjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectRepository for PgSubjectRepository {
    #[instrument(skip(self))]
    async fn exists(&self, kind: SubjectKind, subject_id: i64) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(ReactionTable::for_kind(kind).subject_exists)
            .bind(subject_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
