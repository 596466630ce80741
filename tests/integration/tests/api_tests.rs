//! API Integration Tests
//!
//! Each test starts its own server over the in-memory store; no external
//! services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use forum_core::SubjectKind;
use futures::future::join_all;
use integration_tests::{
    assert_json, assert_status, fixtures::*, reactions_path, TestServer,
};
use reqwest::StatusCode;

const POST: SubjectKind = SubjectKind::Post;
const COMMENT: SubjectKind = SubjectKind::Comment;

async fn server_with(subjects: &[(SubjectKind, i64)]) -> TestServer {
    TestServer::start(subjects).await.expect("Failed to start server")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = server_with(&[]).await;
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = server_with(&[]).await;
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["store"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = server_with(&[]).await;
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Vote Submission Tests
// ============================================================================

#[tokio::test]
async fn test_like_toggle_and_swap() {
    let post_id = unique_id();
    let server = server_with(&[(POST, post_id)]).await;
    let user = unique_user();
    let path = reactions_path(POST, post_id);

    let response = server.post_as(&path, &user, &ReactionRequest::like()).await.unwrap();
    let outcome: OutcomeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((outcome.action.as_str(), outcome.sign), ("insert", 1));

    let response = server.post_as(&path, &user, &ReactionRequest::dislike()).await.unwrap();
    let outcome: OutcomeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((outcome.action.as_str(), outcome.sign), ("swap", -1));

    let response = server.post_as(&path, &user, &ReactionRequest::dislike()).await.unwrap();
    let outcome: OutcomeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((outcome.action.as_str(), outcome.sign), ("remove", 0));

    let response = server.get_as(&path, &user).await.unwrap();
    let summary: SummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((summary.likes, summary.dislikes, summary.sign), (0, 0, 0));
}

#[tokio::test]
async fn test_summary_for_viewer_and_anonymous() {
    let comment_id = unique_id();
    let server = server_with(&[(COMMENT, comment_id)]).await;
    let path = reactions_path(COMMENT, comment_id);
    let (alice, bob, carol) = (unique_user(), unique_user(), unique_user());

    server.post_as(&path, &alice, &ReactionRequest::like()).await.unwrap();
    server.post_as(&path, &bob, &ReactionRequest::like()).await.unwrap();
    server.post_as(&path, &carol, &ReactionRequest::dislike()).await.unwrap();

    let response = server.get_as(&path, &carol).await.unwrap();
    let summary: SummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.subject, "comment");
    assert_eq!(summary.subject_id, comment_id);
    assert_eq!((summary.likes, summary.dislikes), (2, 1));
    assert_eq!(summary.sign, -1);
    assert!(summary.is_disliked && !summary.is_liked);

    let response = server.get(&path).await.unwrap();
    let anonymous: SummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((anonymous.likes, anonymous.dislikes), (2, 1));
    assert_eq!(anonymous.sign, 0);
    assert!(!anonymous.is_liked && !anonymous.is_disliked);
}

#[tokio::test]
async fn test_post_and_comment_with_same_id_are_separate() {
    let id = unique_id();
    let server = server_with(&[(POST, id), (COMMENT, id)]).await;
    let user = unique_user();

    server
        .post_as(&reactions_path(POST, id), &user, &ReactionRequest::like())
        .await
        .unwrap();

    let response = server.get_as(&reactions_path(COMMENT, id), &user).await.unwrap();
    let summary: SummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((summary.likes, summary.dislikes, summary.sign), (0, 0, 0));
}

#[tokio::test]
async fn test_concurrent_identical_votes() {
    let post_id = unique_id();
    let server = server_with(&[(POST, post_id)]).await;
    let user = unique_user();
    let path = reactions_path(POST, post_id);
    let like = ReactionRequest::like();

    let responses = join_all((0..5).map(|_| server.post_as(&path, &user, &like))).await;
    for response in responses {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let response = server.get_as(&path, &user).await.unwrap();
    let summary: SummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((summary.likes, summary.dislikes, summary.sign), (1, 0, 1));
}

// ============================================================================
// Error Tests
// ============================================================================

#[tokio::test]
async fn test_invalid_sign_rejected() {
    let post_id = unique_id();
    let server = server_with(&[(POST, post_id)]).await;
    let user = unique_user();
    let path = reactions_path(POST, post_id);

    for sign in [0, 7, 4_294_967_297] {
        let response = server.post_as(&path, &user, &ReactionRequest::raw(sign)).await.unwrap();
        let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(body.error.code, "INVALID_SIGN");
    }

    let response = server.get_as(&path, &user).await.unwrap();
    let summary: SummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((summary.likes, summary.dislikes), (0, 0));
}

#[tokio::test]
async fn test_vote_requires_identity() {
    let post_id = unique_id();
    let server = server_with(&[(POST, post_id)]).await;

    let response = server
        .post(&reactions_path(POST, post_id), &ReactionRequest::like())
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTH");
}

#[tokio::test]
async fn test_unknown_subject_not_found() {
    let server = server_with(&[]).await;
    let user = unique_user();

    let response = server
        .post_as(&reactions_path(POST, 404), &user, &ReactionRequest::like())
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_POST");

    let response = server.get(&reactions_path(COMMENT, 404)).await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_COMMENT");
}

#[tokio::test]
async fn test_non_numeric_id_rejected() {
    let server = server_with(&[]).await;
    let response = server.get("/api/v1/posts/abc/reactions").await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let post_id = unique_id();
    let server = server_with(&[(POST, post_id)]).await;

    let response = server
        .post_as(
            &reactions_path(POST, post_id),
            &unique_user(),
            &serde_json::json!({ "sign": "up" }),
        )
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_BODY");
    assert!(!body.error.message.is_empty());
}
