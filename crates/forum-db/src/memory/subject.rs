//! In-memory SubjectRepository: a set of registered post and comment ids

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashSet;

use forum_core::entities::SubjectKind;
use forum_core::traits::{RepoResult, SubjectRepository};

/// Registry of subjects known to exist
#[derive(Clone, Default)]
pub struct MemorySubjectDirectory {
    subjects: Arc<DashSet<(SubjectKind, i64)>>,
}

impl MemorySubjectDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a subject exists
    pub fn register(&self, kind: SubjectKind, subject_id: i64) {
        self.subjects.insert((kind, subject_id));
    }

    /// Forget a subject; returns whether it was registered
    pub fn remove(&self, kind: SubjectKind, subject_id: i64) -> bool {
        self.subjects.remove(&(kind, subject_id)).is_some()
    }

    /// Builder-style registration
    #[must_use]
    pub fn with(self, kind: SubjectKind, subject_id: i64) -> Self {
        self.register(kind, subject_id);
        self
    }
}

#[async_trait]
impl SubjectRepository for MemorySubjectDirectory {
    async fn exists(&self, kind: SubjectKind, subject_id: i64) -> RepoResult<bool> {
        Ok(self.subjects.contains(&(kind, subject_id)))
    }
}
