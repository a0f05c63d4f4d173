//! Key-value engine abstraction for the record store.
//!
//! This module defines the traits that abstract over the underlying
//! ordered, byte-keyed persistent engine. The engine's internals (on-disk
//! format, write-ahead log, compaction) are entirely its own business; the
//! record store only relies on the contract expressed here.
//!
//! # Overview
//!
//! - [`KvEngine`]: opens a handle for a path and can irreversibly wipe a path
//! - [`KvHandle`]: a live engine instance, sliced into namespaces
//! - [`KvNamespace`]: raw `put`/`get`/`delete`/`value_stream` primitives
//!
//! All implementations must be thread-safe (`Send + Sync`) and support
//! concurrent access. Every operation is an async unit of work that
//! completes exactly once with a result or an [`EngineError`].

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;
use std::{fmt::Debug, path::Path};

use crate::error::EngineResult;

/// A lazy, ordered sequence of values in a namespace.
///
/// The stream is finite, single-pass and not restartable. Values arrive in
/// the engine's natural key order: implementation-defined, but stable
/// within a single snapshot. I/O failures are delivered as a terminal
/// `Err` item rather than silent truncation.
pub type ValueStream = BoxStream<'static, EngineResult<Value>>;

/// Factory interface for a key-value engine.
///
/// An engine is constructed once and injected into a
/// [`StorageContext`](crate::context::StorageContext), which controls when
/// handles are opened and destroyed.
#[async_trait]
pub trait KvEngine: Send + Sync + Debug + 'static {
    /// The live instance type this engine opens.
    type Handle: KvHandle;

    /// Opens (or creates) the engine state at `path` and returns a handle.
    ///
    /// Opening is idempotent with respect to on-disk state: opening an
    /// existing path sees the data persisted there. Values are encoded as
    /// JSON.
    async fn open(&self, path: &Path) -> EngineResult<Self::Handle>;

    /// Permanently erases all engine state at `path`.
    ///
    /// Must be safe to call when no handle for `path` was ever opened.
    /// Any still-open handle for the same path must be closed first;
    /// using one afterwards is undefined.
    ///
    /// # Warning
    ///
    /// This operation is irreversible.
    async fn destroy(&self, path: &Path) -> EngineResult<()>;
}

/// A live engine instance bound to one path.
#[async_trait]
pub trait KvHandle: Send + Sync + Debug + 'static {
    /// The namespaced view type this handle produces.
    type Namespace: KvNamespace;

    /// Returns a namespaced view of the key space.
    ///
    /// Keys in different namespaces never collide, even when equal.
    /// The namespace is created on first reference and lives for the
    /// lifetime of the engine state.
    fn namespace(&self, name: &str) -> Self::Namespace;

    /// Closes this instance, releasing engine resources.
    ///
    /// Namespaces derived from a closed handle must not be used.
    async fn close(&self) -> EngineResult<()>;
}

/// Raw primitives over one namespace of the key space.
#[async_trait]
pub trait KvNamespace: Send + Sync + Debug + 'static {
    /// Upserts `value` under `key`. Only I/O can fail.
    async fn put(&self, key: &str, value: Value) -> EngineResult<()>;

    /// Returns the value stored under `key`, or `None`.
    async fn get(&self, key: &str) -> EngineResult<Option<Value>>;

    /// Deletes `key`. Deleting a non-existent key is not an error.
    async fn delete(&self, key: &str) -> EngineResult<()>;

    /// Opens a [`ValueStream`] over every value in this namespace.
    async fn value_stream(&self) -> EngineResult<ValueStream>;
}
