//! # Document Store
//!
//! Key-document persistence used by the request handlers. Handlers see only
//! the [`DocumentStore`] trait; a store instance is built once at startup and
//! injected into the router.

pub mod backend;
pub mod document;
pub mod errors;
pub mod file;
pub mod memory;

pub use backend::DocumentStore;
pub use document::{Document, Filter, StagedWrite, WriteBatch};
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
