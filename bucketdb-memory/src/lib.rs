//! In-memory key-value engine backend for bucketdb.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! engine traits from `bucketdb-core`. It keeps one ordered database per
//! path behind async-aware read-write locks, so the open/destroy lifecycle
//! of the storage context behaves exactly like it would over a persistent
//! engine — within the lifetime of the engine value.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Ordered namespaces** - Value streams arrive in stable key order
//! - **Full lifecycle** - Lazy open, close and destructive wipe per path
//!
//! # Quick Start
//!
//! ```ignore
//! use bucketdb_core::context::StorageContext;
//! use bucketdb_memory::MemoryEngine;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = StorageContext::new(MemoryEngine::new(), "/tmp/db");
//!     let people = context.store("person").await?;
//!
//!     let andre = people.insert(json!({ "name": "Andre" })).await?;
//!     println!("stored with id {}", andre["id"]);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as bucketdb_memory;

pub mod engine;

pub use engine::{MemoryEngine, MemoryHandle, MemoryNamespace};
