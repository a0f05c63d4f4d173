//! Bucket types for raw access to one namespace of the key space.
//!
//! A [`Bucket`] is a thin accessor over a [`KvNamespace`] scoped to one
//! collection name. It exposes the raw primitives the
//! [`RecordStore`](crate::store::RecordStore) builds on; most callers want
//! the record store rather than this layer.

use serde_json::Value;

use crate::{
    engine::{KvNamespace, ValueStream},
    error::EngineResult,
};

/// A namespaced view into the storage layer scoped to one bucket name.
///
/// Buckets are handed out by
/// [`StorageContext::bucket`](crate::context::StorageContext::bucket).
/// After the context has been destroyed, previously handed-out buckets are
/// logically invalid and must be re-acquired.
#[derive(Debug)]
pub struct Bucket<N: KvNamespace> {
    name: String,
    namespace: N,
}

impl<N: KvNamespace> Bucket<N> {
    pub(crate) fn new(name: String, namespace: N) -> Self {
        Self { name, namespace }
    }

    /// Returns the name of this bucket.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upserts `value` under `key`.
    ///
    /// # Errors
    ///
    /// Fails only on underlying engine I/O errors.
    pub async fn put(&self, key: &str, value: Value) -> EngineResult<()> {
        self.namespace.put(key, value).await
    }

    /// Returns the value stored under `key`, or `None`.
    pub async fn get(&self, key: &str) -> EngineResult<Option<Value>> {
        self.namespace.get(key).await
    }

    /// Deletes `key`. Idempotent: deleting a non-existent key succeeds.
    pub async fn delete(&self, key: &str) -> EngineResult<()> {
        self.namespace.delete(key).await
    }

    /// Opens a lazy stream over every value stored in this bucket.
    ///
    /// See [`ValueStream`] for ordering and error delivery semantics.
    pub async fn value_stream(&self) -> EngineResult<ValueStream> {
        self.namespace.value_stream().await
    }
}
