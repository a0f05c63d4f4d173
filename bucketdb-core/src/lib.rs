//! A bucket-scoped JSON record store layered on top of a pluggable
//! key-value engine.
//!
//! This crate is the core of the bucketdb project and provides:
//!
//! - **Engine abstraction** ([`engine`]) - Traits the underlying ordered
//!   key-value engine must implement
//! - **Storage context** ([`context`]) - Lifecycle of the single engine
//!   instance: lazy open, per-bucket namespacing, full destroy
//! - **Buckets** ([`bucket`]) - Raw namespaced `put`/`get`/`delete`/stream
//!   primitives
//! - **Record store** ([`store`]) - The public insert/update/remove/query
//!   surface with identifier generation
//! - **Query filtering** ([`filter`]) - Pure equality predicate over records
//! - **Error handling** ([`error`]) - Engine and store error taxonomies
//!
//! # Example
//!
//! ```ignore
//! use bucketdb_core::context::StorageContext;
//! use bucketdb_memory::MemoryEngine;
//! use serde_json::json;
//!
//! let context = StorageContext::new(MemoryEngine::new(), "/var/lib/app/db");
//! let people = context.store("person").await?;
//!
//! let andre = people.insert(json!({ "name": "Andre" })).await?;
//! assert!(andre["id"].is_string());
//!
//! let hits = people.query(json!({ "name": "Andre" })).await?;
//! assert_eq!(hits.len(), 1);
//! # Ok::<(), bucketdb_core::error::BucketDbError>(())
//! ```

#[allow(unused_extern_crates)]
extern crate self as bucketdb_core;

pub mod bucket;
pub mod context;
pub mod engine;
pub mod error;
pub mod filter;
pub mod store;

mod ident;

#[cfg(test)]
mod testkit;
