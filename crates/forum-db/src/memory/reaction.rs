//! In-process reaction store
//!
//! One `DashMap` per subject kind plays the role of the two reaction tables.
//! Key-scoped transactions hold a per-key async mutex and stage their write,
//! which is applied to the partition only on commit.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::instrument;

use forum_core::entities::{Reaction, ReactionCounts, ReactionKey, Sign, SubjectKind};
use forum_core::error::DomainError;
use forum_core::traits::{ReactionRepository, ReactionTransaction, RepoResult};
use forum_core::value_objects::UserId;

/// Row key inside one partition: (subject id, user id)
type RowKey = (i64, UserId);

#[derive(Default)]
struct Inner {
    posts: DashMap<RowKey, Sign>,
    comments: DashMap<RowKey, Sign>,
    locks: DashMap<ReactionKey, Arc<Mutex<()>>>,
}

impl Inner {
    fn partition(&self, kind: SubjectKind) -> &DashMap<RowKey, Sign> {
        match kind {
            SubjectKind::Post => &self.posts,
            SubjectKind::Comment => &self.comments,
        }
    }

    fn stored(&self, key: &ReactionKey) -> Option<Sign> {
        self.partition(key.kind)
            .get(&row_key(key))
            .map(|sign| *sign)
    }
}

fn row_key(key: &ReactionKey) -> RowKey {
    (key.subject_id, key.user_id.clone())
}

/// Reaction store kept entirely in memory
///
/// Cloning shares the underlying state.
#[derive(Clone, Default)]
pub struct MemoryReactionStore {
    inner: Arc<Inner>,
}

impl MemoryReactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reactions in a partition
    pub fn len(&self, kind: SubjectKind) -> usize {
        self.inner.partition(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        SubjectKind::ALL
            .iter()
            .all(|kind| self.inner.partition(*kind).is_empty())
    }

    /// Number of per-key locks currently tracked
    pub fn tracked_locks(&self) -> usize {
        self.inner.locks.len()
    }

    async fn lock(&self, key: &ReactionKey) -> KeyLock {
        // Declared before the mutex handle so a cancelled wait drops the
        // handle first and the guard can still prune the entry.
        let mut lock = KeyLock {
            guard: None,
            inner: Arc::clone(&self.inner),
            key: key.clone(),
        };

        let mutex = self
            .inner
            .locks
            .entry(key.clone())
            .or_default()
            .value()
            .clone();

        lock.guard = Some(mutex.lock_owned().await);
        lock
    }
}

#[async_trait]
impl ReactionRepository for MemoryReactionStore {
    async fn get_sign(&self, key: &ReactionKey) -> RepoResult<Option<Sign>> {
        Ok(self.inner.stored(key))
    }

    #[instrument(skip(self))]
    async fn insert(&self, reaction: &Reaction) -> RepoResult<()> {
        let key = reaction.key();
        match self.inner.partition(key.kind).entry(row_key(&key)) {
            Entry::Occupied(_) => Err(DomainError::ReactionAlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(reaction.sign);
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn update_sign(&self, key: &ReactionKey, sign: Sign) -> RepoResult<()> {
        let partition = self.inner.partition(key.kind);
        let mut stored = partition
            .get_mut(&row_key(key))
            .ok_or(DomainError::ReactionNotFound)?;
        *stored = sign;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &ReactionKey) -> RepoResult<()> {
        self.inner
            .partition(key.kind)
            .remove(&row_key(key))
            .map(|_| ())
            .ok_or(DomainError::ReactionNotFound)
    }

    async fn count_by_sign(&self, kind: SubjectKind, subject_id: i64) -> RepoResult<ReactionCounts> {
        let mut counts = ReactionCounts::default();
        for entry in self.inner.partition(kind).iter() {
            if entry.key().0 == subject_id {
                counts.record(*entry.value());
            }
        }
        Ok(counts)
    }

    async fn begin(&self, key: &ReactionKey) -> RepoResult<Box<dyn ReactionTransaction>> {
        let lock = self.lock(key).await;
        Ok(Box::new(MemoryReactionTransaction {
            key: key.clone(),
            lock,
            staged: None,
        }))
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

/// Exclusive hold on one key, or a pending wait for it
///
/// Dropping it forgets the key's mutex once nobody else wants it.
struct KeyLock {
    guard: Option<OwnedMutexGuard<()>>,
    inner: Arc<Inner>,
    key: ReactionKey,
}

impl Drop for KeyLock {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the map's own reference left means no waiter holds this mutex.
        self.inner
            .locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

/// Staged write for one key. `staged = Some(state)` is the row state after commit.
struct MemoryReactionTransaction {
    key: ReactionKey,
    lock: KeyLock,
    staged: Option<Option<Sign>>,
}

impl MemoryReactionTransaction {
    fn visible(&self) -> Option<Sign> {
        self.staged
            .unwrap_or_else(|| self.lock.inner.stored(&self.key))
    }
}

#[async_trait]
impl ReactionTransaction for MemoryReactionTransaction {
    async fn current_sign(&mut self) -> RepoResult<Option<Sign>> {
        Ok(self.visible())
    }

    async fn insert(&mut self, sign: Sign) -> RepoResult<()> {
        if self.visible().is_some() {
            return Err(DomainError::ReactionAlreadyExists);
        }
        self.staged = Some(Some(sign));
        Ok(())
    }

    async fn update_sign(&mut self, sign: Sign) -> RepoResult<()> {
        if self.visible().is_none() {
            return Err(DomainError::ReactionNotFound);
        }
        self.staged = Some(Some(sign));
        Ok(())
    }

    async fn delete(&mut self) -> RepoResult<()> {
        if self.visible().is_none() {
            return Err(DomainError::ReactionNotFound);
        }
        self.staged = Some(None);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        if let Some(state) = self.staged {
            let partition = self.lock.inner.partition(self.key.kind);
            match state {
                Some(sign) => {
                    partition.insert(row_key(&self.key), sign);
                }
                None => {
                    partition.remove(&row_key(&self.key));
                }
            }
        }
        Ok(())
    }
}
