//! Storage context owning the lifecycle of the single engine instance.
//!
//! The original design around this kind of store keeps one implicit,
//! process-global engine handle. Here the context is an explicit value:
//! construct it once at startup with an engine and a path, share it by
//! reference, and initialization order and test isolation stay visible.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use mea::mutex::Mutex;
use tracing::debug;

use crate::{
    bucket::Bucket,
    engine::{KvEngine, KvHandle},
    error::{BucketDbError, BucketDbResult, EngineResult},
    store::RecordStore,
};

/// The namespace type an engine's handle produces.
pub type NamespaceOf<E> = <<E as KvEngine>::Handle as KvHandle>::Namespace;

/// Owns the single live engine instance for one configured path.
///
/// The engine is opened lazily on the first bucket request and at most one
/// handle is ever live per context; the open is guarded by an async mutex
/// so concurrent first uses cannot double-initialize. The path is fixed at
/// construction and never changes.
///
/// [`destroy`](StorageContext::destroy) closes the handle and wipes all
/// on-disk state at the path; the next bucket request re-opens a fresh,
/// empty engine. Destroy must not run concurrently with in-flight bucket
/// operations — callers are responsible for quiescing traffic first; this
/// layer provides no internal barrier.
///
/// # Example
///
/// ```ignore
/// use bucketdb_core::context::StorageContext;
/// use bucketdb_memory::MemoryEngine;
///
/// let context = StorageContext::new(MemoryEngine::new(), "/tmp/db");
/// let people = context.store("person").await?;
///
/// let record = people.insert(serde_json::json!({ "name": "Andre" })).await?;
/// # Ok::<(), bucketdb_core::error::BucketDbError>(())
/// ```
#[derive(Debug)]
pub struct StorageContext<E: KvEngine> {
    engine: E,
    path: PathBuf,
    handle: Mutex<Option<Arc<E::Handle>>>,
}

impl<E: KvEngine> StorageContext<E> {
    /// Creates a context for `engine` state living at `path`.
    ///
    /// No I/O happens here; the engine is opened on first use.
    pub fn new(engine: E, path: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            path: path.into(),
            handle: Mutex::new(None),
        }
    }

    /// Returns the configured on-disk location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the live handle, opening the engine if none exists yet.
    async fn handle(&self) -> EngineResult<Arc<E::Handle>> {
        let mut slot = self.handle.lock().await;

        if let Some(handle) = slot.as_ref() {
            return Ok(handle.clone());
        }

        debug!(path = %self.path.display(), "opening key-value engine instance");

        let handle = Arc::new(self.engine.open(&self.path).await?);
        *slot = Some(handle.clone());

        Ok(handle)
    }

    /// Returns a [`Bucket`] bound to `name`, lazily opening the engine.
    ///
    /// # Errors
    ///
    /// - [`BucketDbError::InvalidArgument`] if `name` is empty, detected
    ///   before any I/O
    /// - [`BucketDbError::Open`] if the lazy engine open fails
    pub async fn bucket(&self, name: &str) -> BucketDbResult<Bucket<NamespaceOf<E>>> {
        if name.is_empty() {
            return Err(BucketDbError::InvalidArgument(
                "please provide a proper bucket name".to_string(),
            ));
        }

        let handle = self
            .handle()
            .await
            .map_err(|source| BucketDbError::Open {
                bucket: name.to_string(),
                source,
            })?;

        Ok(Bucket::new(name.to_string(), handle.namespace(name)))
    }

    /// Returns a [`RecordStore`] bound to the bucket `name`.
    pub async fn store(&self, name: &str) -> BucketDbResult<RecordStore<NamespaceOf<E>>> {
        Ok(RecordStore::new(self.bucket(name).await?))
    }

    /// Closes the live engine instance (if any) and permanently erases all
    /// data at the configured path.
    ///
    /// Safe to call before anything was ever opened: the wipe is performed
    /// regardless. On success every previously handed-out [`Bucket`] and
    /// [`RecordStore`] is logically invalid and must be re-acquired; the
    /// next bucket request opens a fresh, empty engine.
    ///
    /// # Errors
    ///
    /// [`BucketDbError::Teardown`] wrapping the underlying close or wipe
    /// failure.
    pub async fn destroy(&self) -> BucketDbResult<()> {
        let mut slot = self.handle.lock().await;

        if let Some(handle) = slot.take() {
            handle
                .close()
                .await
                .map_err(BucketDbError::Teardown)?;
        }

        debug!(path = %self.path.display(), "destroying storage layer");

        self.engine
            .destroy(&self.path)
            .await
            .map_err(BucketDbError::Teardown)
    }
}
