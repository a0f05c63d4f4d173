//! Main bucketdb crate providing a bucket-scoped JSON record store.
//!
//! This crate is the primary entry point for users of bucketdb. It
//! re-exports the core types from the sub-crates and provides convenient
//! access to the bundled in-memory engine.
//!
//! # Features
//!
//! - **Named buckets** - Isolated collections of JSON records over one
//!   shared key-value engine
//! - **Four operations per bucket** - `insert` (with generated
//!   identifier), `update` (never creates), `remove` (idempotent) and
//!   `query` (equality filtering over arbitrary fields)
//! - **Pluggable engine** - Any implementation of the `KvEngine` traits;
//!   an in-memory engine ships in the box
//! - **Explicit lifecycle** - A storage context opens the engine lazily on
//!   first use and can destroy it (close + full wipe) at any time
//!
//! # Quick Start
//!
//! ```ignore
//! use bucketdb::prelude::*;
//! use bucketdb::memory::MemoryEngine;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = StorageContext::new(MemoryEngine::new(), "/var/lib/app/db");
//!     let people = context.store("person").await?;
//!
//!     // Insert: the store injects a generated id.
//!     let mut andre = people.insert(json!({ "name": "Andre" })).await?;
//!     let id = andre["id"].as_str().unwrap().to_string();
//!
//!     // Update: only works for records that already exist.
//!     andre["city"] = json!("Hamburg");
//!     people.update(andre).await?;
//!
//!     // Query: equality over arbitrary fields; {} matches everything.
//!     let hits = people.query(json!({ "city": "Hamburg" })).await?;
//!     assert_eq!(hits.len(), 1);
//!
//!     // Remove, then tear the whole storage layer down.
//!     people.remove(&id).await?;
//!     context.destroy().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod prelude;

pub use bucketdb_core::{bucket, context, engine, error, filter, store};

/// In-memory engine implementation.
pub mod memory {
    pub use bucketdb_memory::{MemoryEngine, MemoryHandle, MemoryNamespace};
}
