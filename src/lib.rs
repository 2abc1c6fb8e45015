//! casa-modelia - HTTP API backing the Casa Modelia hotel website
//!
//! Homepage hero content, room listing and lookup, availability, and a
//! secret-guarded bulk room upsert, over a pluggable document store.

pub mod cli;
pub mod content;
pub mod http_server;
pub mod normalize;
pub mod observability;
pub mod store;
