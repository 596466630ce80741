//! # forum-db
//!
//! Reaction store implementations for the traits defined in `forum-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations (PostgreSQL via SQLx)
//! - Database models with SQLx `FromRow` derives
//! - Model ↔ entity mappers and per-kind table selection
//! - `PgReactionRepository` / `PgSubjectRepository`
//! - `MemoryReactionStore` / `MemorySubjectDirectory` for tests and local runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forum_db::pool::{create_pool, DatabaseConfig};
//! use forum_db::PgReactionRepository;
//! use forum_core::traits::ReactionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let reactions = PgReactionRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryReactionStore, MemorySubjectDirectory};
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgReactionRepository, PgSubjectRepository};
