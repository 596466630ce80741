//! Response DTOs for API endpoints
//!
//! Signs are serialized as integers: 1 like, -1 dislike, 0 no reaction.

use chrono::{DateTime, Utc};
use forum_core::{sign_value, ReactionCounts, Sign, SubjectKind};
use serde::Serialize;

use crate::services::ReactionOutcome;

// ============================================================================
// Reaction Responses
// ============================================================================

/// Result of a vote submission
#[derive(Debug, Clone, Serialize)]
pub struct ReactionOutcomeResponse {
    /// `insert`, `swap` or `remove`
    pub action: &'static str,
    /// Viewer's sign after the vote
    pub sign: i16,
}

impl From<ReactionOutcome> for ReactionOutcomeResponse {
    fn from(outcome: ReactionOutcome) -> Self {
        Self {
            action: outcome.transition.as_str(),
            sign: sign_value(outcome.sign),
        }
    }
}

/// Counts for a subject plus the viewer's own vote
#[derive(Debug, Clone, Serialize)]
pub struct ReactionSummaryResponse {
    pub subject: SubjectKind,
    pub subject_id: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub sign: i16,
    pub is_liked: bool,
    pub is_disliked: bool,
}

impl ReactionSummaryResponse {
    pub fn new(kind: SubjectKind, subject_id: i64, counts: ReactionCounts, sign: Option<Sign>) -> Self {
        Self {
            subject: kind,
            subject_id,
            likes: counts.likes,
            dislikes: counts.dislikes,
            sign: sign_value(sign),
            is_liked: sign == Some(Sign::Like),
            is_disliked: sign == Some(Sign::Dislike),
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool) -> Self {
        Self {
            status: if store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_core::ReactionTransition;

    #[test]
    fn test_outcome_response() {
        let swapped = ReactionOutcomeResponse::from(ReactionOutcome::new(ReactionTransition::Swap(
            Sign::Dislike,
        )));
        assert_eq!(swapped.action, "swap");
        assert_eq!(swapped.sign, -1);

        let removed = ReactionOutcomeResponse::from(ReactionOutcome::new(ReactionTransition::Remove));
        assert_eq!(removed.action, "remove");
        assert_eq!(removed.sign, 0);
    }

    #[test]
    fn test_summary_flags() {
        let summary =
            ReactionSummaryResponse::new(SubjectKind::Post, 42, ReactionCounts::new(3, 1), Some(Sign::Like));
        assert_eq!(summary.sign, 1);
        assert!(summary.is_liked);
        assert!(!summary.is_disliked);

        let anonymous = ReactionSummaryResponse::new(SubjectKind::Comment, 7, ReactionCounts::default(), None);
        assert_eq!(anonymous.sign, 0);
        assert!(!anonymous.is_liked && !anonymous.is_disliked);
    }

    #[test]
    fn test_summary_serialization() {
        let summary =
            ReactionSummaryResponse::new(SubjectKind::Comment, 7, ReactionCounts::new(0, 2), Some(Sign::Dislike));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["subject"], "comment");
        assert_eq!(json["dislikes"], 2);
        assert_eq!(json["sign"], -1);
        assert_eq!(json["is_disliked"], true);
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true);
        assert!(ready.is_ready());
        assert_eq!(ready.checks.store, "healthy");

        let not_ready = ReadinessResponse::ready(false);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.store, "unhealthy");
    }
}
