//! Data transfer objects for API requests and responses

pub mod requests;
pub mod responses;

pub use requests::SubmitReactionRequest;
pub use responses::{
    HealthChecks, HealthResponse, ReactionOutcomeResponse, ReactionSummaryResponse,
    ReadinessResponse,
};
