//! Reaction handlers
//!
//! Vote submission and reaction summaries for posts and comments.

use axum::{extract::State, Json};
use forum_core::SubjectKind;
use forum_service::dto::{ReactionOutcomeResponse, ReactionSummaryResponse, SubmitReactionRequest};
use forum_service::ReactionService;

use crate::extractors::{AuthUser, IdPath, JsonBody, OptionalAuthUser};
use crate::response::ApiResult;
use crate::state::AppState;

/// Like or dislike a post
///
/// POST /posts/{post_id}/reactions
pub async fn react_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    JsonBody(request): JsonBody<SubmitReactionRequest>,
) -> ApiResult<Json<ReactionOutcomeResponse>> {
    submit(&state, SubjectKind::Post, post_id, &auth, request).await
}

/// Like or dislike a comment
///
/// POST /comments/{comment_id}/reactions
pub async fn react_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
    JsonBody(request): JsonBody<SubmitReactionRequest>,
) -> ApiResult<Json<ReactionOutcomeResponse>> {
    submit(&state, SubjectKind::Comment, comment_id, &auth, request).await
}

/// Reaction counts for a post, plus the caller's own vote
///
/// GET /posts/{post_id}/reactions
pub async fn get_post_reactions(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    summary(&state, SubjectKind::Post, post_id, &viewer).await
}

/// Reaction counts for a comment, plus the caller's own vote
///
/// GET /comments/{comment_id}/reactions
pub async fn get_comment_reactions(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    summary(&state, SubjectKind::Comment, comment_id, &viewer).await
}

async fn submit(
    state: &AppState,
    kind: SubjectKind,
    subject_id: i64,
    auth: &AuthUser,
    request: SubmitReactionRequest,
) -> ApiResult<Json<ReactionOutcomeResponse>> {
    let service = ReactionService::new(state.service_context());
    service.require_subject(kind, subject_id).await?;

    let outcome = service
        .submit_reaction(kind, subject_id, &auth.user_id, request.sign)
        .await?;
    Ok(Json(outcome.into()))
}

async fn summary(
    state: &AppState,
    kind: SubjectKind,
    subject_id: i64,
    viewer: &OptionalAuthUser,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let service = ReactionService::new(state.service_context());
    service.require_subject(kind, subject_id).await?;

    let summary = service
        .get_reaction_summary(viewer.user_id(), kind, subject_id)
        .await?;
    Ok(Json(summary))
}
