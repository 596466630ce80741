//! Service context - dependency container for services
//!
//! Holds the reaction store and the subject directory the engine depends on.

use std::sync::Arc;

use forum_core::traits::{ReactionRepository, SubjectRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Built once at startup and shared by every request. Cloning is cheap.
#[derive(Clone)]
pub struct ServiceContext {
    reaction_repo: Arc<dyn ReactionRepository>,
    subject_repo: Arc<dyn SubjectRepository>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        reaction_repo: Arc<dyn ReactionRepository>,
        subject_repo: Arc<dyn SubjectRepository>,
    ) -> Self {
        Self {
            reaction_repo,
            subject_repo,
        }
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the subject repository
    pub fn subject_repo(&self) -> &dyn SubjectRepository {
        self.subject_repo.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("reaction_repo", &"dyn ReactionRepository")
            .field("subject_repo", &"dyn SubjectRepository")
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    subject_repo: Option<Arc<dyn SubjectRepository>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn subject_repo(mut self, repo: Arc<dyn SubjectRepository>) -> Self {
        self.subject_repo = Some(repo);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.subject_repo
                .ok_or_else(|| ServiceError::validation("subject_repo is required"))?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_db::{MemoryReactionStore, MemorySubjectDirectory};

    #[test]
    fn test_builder_requires_all_dependencies() {
        let err = ServiceContextBuilder::new()
            .reaction_repo(Arc::new(MemoryReactionStore::new()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("subject_repo"));
    }

    #[test]
    fn test_builder_builds() {
        let ctx = ServiceContextBuilder::new()
            .reaction_repo(Arc::new(MemoryReactionStore::new()))
            .subject_repo(Arc::new(MemorySubjectDirectory::new()))
            .build();
        assert!(ctx.is_ok());
    }
}
