//! In-memory key-value engine implementation.
//!
//! Data lives in ordered maps behind async-aware read-write locks. The
//! engine keeps one database per path for as long as the engine value is
//! alive, so the open/close/destroy lifecycle behaves like a persistent
//! engine within a single process: re-opening a path sees the previous
//! data until the path is destroyed.

use async_trait::async_trait;
use futures::{StreamExt, stream};
use mea::rwlock::RwLock;
use serde_json::Value;
use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tracing::trace;

use bucketdb_core::{
    engine::{KvEngine, KvHandle, KvNamespace, ValueStream},
    error::{EngineError, EngineResult},
};

/// Ordered records of one namespace. BTreeMap keys give the stable,
/// implementation-defined value stream order the store layer expects.
type NamespaceMap = BTreeMap<String, Value>;
type Database = Arc<RwLock<HashMap<String, NamespaceMap>>>;

/// Thread-safe in-memory key-value engine.
///
/// `MemoryEngine` is cloneable and uses `Arc`-wrapped internal state;
/// clones share the same databases. It is ideal for development and
/// testing, and plays the role a persistent log-structured engine plays in
/// production deployments.
///
/// # Example
///
/// ```ignore
/// use bucketdb_core::context::StorageContext;
/// use bucketdb_memory::MemoryEngine;
///
/// let context = StorageContext::new(MemoryEngine::new(), "/tmp/db");
/// let people = context.store("person").await?;
/// # Ok::<(), bucketdb_core::error::BucketDbError>(())
/// ```
#[derive(Default, Clone, Debug)]
pub struct MemoryEngine {
    databases: Arc<RwLock<HashMap<PathBuf, Database>>>,
}

impl MemoryEngine {
    /// Creates an engine with no databases.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvEngine for MemoryEngine {
    type Handle = MemoryHandle;

    async fn open(&self, path: &Path) -> EngineResult<MemoryHandle> {
        let database = self
            .databases
            .write()
            .await
            .entry(path.to_path_buf())
            .or_default()
            .clone();

        trace!(path = %path.display(), "opened in-memory database");

        Ok(MemoryHandle {
            database,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    async fn destroy(&self, path: &Path) -> EngineResult<()> {
        self.databases.write().await.remove(path);

        trace!(path = %path.display(), "destroyed in-memory database");

        Ok(())
    }
}

/// A live instance of one in-memory database.
///
/// Handles opened for the same path before a destroy share their state.
/// Closing a handle invalidates it and every namespace derived from it;
/// later operations through them fail with [`EngineError::Closed`].
#[derive(Clone, Debug)]
pub struct MemoryHandle {
    database: Database,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl KvHandle for MemoryHandle {
    type Namespace = MemoryNamespace;

    fn namespace(&self, name: &str) -> MemoryNamespace {
        MemoryNamespace {
            name: name.to_string(),
            database: self.database.clone(),
            closed: self.closed.clone(),
        }
    }

    async fn close(&self) -> EngineResult<()> {
        self.closed.store(true, Ordering::SeqCst);

        trace!("closed in-memory database handle");

        Ok(())
    }
}

/// One namespace of an in-memory database.
#[derive(Clone, Debug)]
pub struct MemoryNamespace {
    name: String,
    database: Database,
    closed: Arc<AtomicBool>,
}

impl MemoryNamespace {
    fn ensure_open(&self) -> EngineResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(EngineError::Closed);
        }

        Ok(())
    }
}

#[async_trait]
impl KvNamespace for MemoryNamespace {
    async fn put(&self, key: &str, value: Value) -> EngineResult<()> {
        self.ensure_open()?;

        self.database
            .write()
            .await
            .entry(self.name.clone())
            .or_default()
            .insert(key.to_string(), value);

        Ok(())
    }

    async fn get(&self, key: &str) -> EngineResult<Option<Value>> {
        self.ensure_open()?;

        Ok(self
            .database
            .read()
            .await
            .get(&self.name)
            .and_then(|records| records.get(key).cloned()))
    }

    async fn delete(&self, key: &str) -> EngineResult<()> {
        self.ensure_open()?;

        if let Some(records) = self.database.write().await.get_mut(&self.name) {
            records.remove(key);
        }

        Ok(())
    }

    async fn value_stream(&self) -> EngineResult<ValueStream> {
        self.ensure_open()?;

        // Snapshot under the read lock; the stream itself never observes
        // writes issued after this point.
        let values: Vec<EngineResult<Value>> = self
            .database
            .read()
            .await
            .get(&self.name)
            .map(|records| records.values().cloned().map(Ok).collect())
            .unwrap_or_default();

        Ok(stream::iter(values).boxed())
    }
}
