//! Axum extractors for request handling

mod auth;
mod body;
mod path;

pub use auth::{AuthUser, OptionalAuthUser, USER_HEADER};
pub use body::JsonBody;
pub use path::IdPath;
