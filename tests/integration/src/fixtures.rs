//! Test fixtures and data generators

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// Counter for unique subject ids
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique suffix for test data
pub fn unique_id() -> i64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Fresh user id for one test
pub fn unique_user() -> String {
    format!("user-{}", uuid::Uuid::new_v4())
}

/// Vote submission body
#[derive(Debug, Serialize)]
pub struct ReactionRequest {
    pub sign: i64,
}

impl ReactionRequest {
    pub fn like() -> Self {
        Self { sign: 1 }
    }

    pub fn dislike() -> Self {
        Self { sign: -1 }
    }

    pub fn raw(sign: i64) -> Self {
        Self { sign }
    }
}

/// Vote submission response
#[derive(Debug, Deserialize)]
pub struct OutcomeResponse {
    pub action: String,
    pub sign: i16,
}

/// Reaction summary response
#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    pub subject: String,
    pub subject_id: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub sign: i16,
    pub is_liked: bool,
    pub is_disliked: bool,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
