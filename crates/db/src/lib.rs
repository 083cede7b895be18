//! Document store plumbing: the MongoDB client factory, per-call deadlines,
//! and an in-memory collection with the same not-found semantics.

pub mod deadline;
pub mod error;
pub mod memory;
pub mod mongo;

pub use deadline::Deadline;
pub use error::{Result, StoreError};
pub use memory::MemoryCollection;
pub use mongo::DocumentStore;
