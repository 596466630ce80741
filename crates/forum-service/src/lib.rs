//! # forum-service
//!
//! Application layer containing the reaction engine, its error type, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    ReactionOutcome, ReactionService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
