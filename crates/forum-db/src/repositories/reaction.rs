//! PostgreSQL implementation of ReactionRepository
//!
//! Key-scoped transactions take a transaction-level advisory lock on the
//! reaction key before reading, so two writers for the same (kind, subject,
//! user) run one after the other even when no row exists yet. Writers on other
//! keys hash to other locks and never wait on each other.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use forum_core::entities::{Reaction, ReactionCounts, ReactionKey, Sign, SubjectKind};
use forum_core::error::DomainError;
use forum_core::traits::{ReactionRepository, ReactionTransaction, RepoResult};

use crate::mappers::{ReactionInsert, ReactionTable};
use crate::models::{ReactionCountModel, ReactionModel};

use super::error::{map_db_error, map_unique_violation, reaction_not_found};

const LOCK_KEY_SQL: &str = "SELECT pg_advisory_xact_lock(hashtextextended($1, 0))";

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the stored reaction for a key
    #[instrument(skip(self))]
    pub async fn find(&self, key: &ReactionKey) -> RepoResult<Option<Reaction>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        fetch_reaction(&mut conn, key).await
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn get_sign(&self, key: &ReactionKey) -> RepoResult<Option<Sign>> {
        Ok(self.find(key).await?.map(|reaction| reaction.sign))
    }

    #[instrument(skip(self))]
    async fn insert(&self, reaction: &Reaction) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        insert_row(&mut conn, reaction).await
    }

    #[instrument(skip(self))]
    async fn update_sign(&self, key: &ReactionKey, sign: Sign) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        update_row(&mut conn, key, sign).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &ReactionKey) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        delete_row(&mut conn, key).await
    }

    #[instrument(skip(self))]
    async fn count_by_sign(&self, kind: SubjectKind, subject_id: i64) -> RepoResult<ReactionCounts> {
        let counts = sqlx::query_as::<_, ReactionCountModel>(ReactionTable::for_kind(kind).count_by_sign)
            .bind(subject_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(counts.into())
    }

    #[instrument(skip(self))]
    async fn begin(&self, key: &ReactionKey) -> RepoResult<Box<dyn ReactionTransaction>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(LOCK_KEY_SQL)
            .bind(key.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        debug!(key = %key, "Reaction key locked");

        Ok(Box::new(PgReactionTransaction {
            tx,
            key: key.clone(),
        }))
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

/// Database transaction holding the advisory lock for one reaction key
///
/// Dropping it without `commit` rolls back and releases the lock.
pub struct PgReactionTransaction {
    tx: Transaction<'static, Postgres>,
    key: ReactionKey,
}

#[async_trait]
impl ReactionTransaction for PgReactionTransaction {
    async fn current_sign(&mut self) -> RepoResult<Option<Sign>> {
        Ok(fetch_reaction(&mut self.tx, &self.key)
            .await?
            .map(|reaction| reaction.sign))
    }

    async fn insert(&mut self, sign: Sign) -> RepoResult<()> {
        let reaction = Reaction::new(self.key.clone(), sign);
        insert_row(&mut self.tx, &reaction).await
    }

    async fn update_sign(&mut self, sign: Sign) -> RepoResult<()> {
        update_row(&mut self.tx, &self.key, sign).await
    }

    async fn delete(&mut self) -> RepoResult<()> {
        delete_row(&mut self.tx, &self.key).await
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let this = *self;
        this.tx.commit().await.map_err(map_db_error)
    }
}

// ============================================================================
// Statements shared by pooled and transactional paths
// ============================================================================

async fn fetch_reaction(conn: &mut PgConnection, key: &ReactionKey) -> RepoResult<Option<Reaction>> {
    let row = sqlx::query_as::<_, ReactionModel>(ReactionTable::for_kind(key.kind).select_one)
        .bind(key.user_id.as_str())
        .bind(key.subject_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

    row.map(|model| model.into_entity(key.kind)).transpose()
}

async fn insert_row(conn: &mut PgConnection, reaction: &Reaction) -> RepoResult<()> {
    let values = ReactionInsert::new(reaction);

    sqlx::query(ReactionTable::for_kind(reaction.kind).insert)
        .bind(values.user_id)
        .bind(values.subject_id)
        .bind(values.sign)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ReactionAlreadyExists))?;

    Ok(())
}

async fn update_row(conn: &mut PgConnection, key: &ReactionKey, sign: Sign) -> RepoResult<()> {
    let result = sqlx::query(ReactionTable::for_kind(key.kind).update_sign)
        .bind(key.user_id.as_str())
        .bind(key.subject_id)
        .bind(sign.value())
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(reaction_not_found());
    }
    Ok(())
}

async fn delete_row(conn: &mut PgConnection, key: &ReactionKey) -> RepoResult<()> {
    let result = sqlx::query(ReactionTable::for_kind(key.kind).delete)
        .bind(key.user_id.as_str())
        .bind(key.subject_id)
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(reaction_not_found());
    }
    Ok(())
}
