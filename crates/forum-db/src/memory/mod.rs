//! In-memory store implementations
//!
//! Used by tests and by `STORE_BACKEND=memory` local runs.

mod reaction;
mod subject;

pub use reaction::MemoryReactionStore;
pub use subject::MemorySubjectDirectory;
