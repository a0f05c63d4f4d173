//! Minimal engine stub for exercising the context and store layers in
//! unit tests, with injectable failure modes.

use async_trait::async_trait;
use futures::{StreamExt, stream};
use serde_json::Value;
use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::{
    engine::{KvEngine, KvHandle, KvNamespace, ValueStream},
    error::{EngineError, EngineResult},
};

type Namespaces = Arc<Mutex<HashMap<String, BTreeMap<String, Value>>>>;

/// What the stub should do when an operation is requested.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) enum Failure {
    #[default]
    None,
    /// Every `put` fails with a backend error.
    Puts,
    /// The first `put` succeeds, every later one fails.
    LatePuts,
    /// Value streams yield one value and then a terminal error.
    Streams,
    /// `open` fails before producing a handle.
    Opens,
    /// `close` fails on the handle.
    Close,
    /// `destroy` fails before wiping anything.
    Destroy,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TestEngine {
    databases: Arc<Mutex<HashMap<PathBuf, Namespaces>>>,
    opens: Arc<AtomicUsize>,
    puts: Arc<AtomicUsize>,
    failure: Failure,
}

impl TestEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing(failure: Failure) -> Self {
        Self { failure, ..Self::default() }
    }

    pub(crate) fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub(crate) fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KvEngine for TestEngine {
    type Handle = TestHandle;

    async fn open(&self, path: &Path) -> EngineResult<TestHandle> {
        self.opens.fetch_add(1, Ordering::SeqCst);

        if self.failure == Failure::Opens {
            return Err(EngineError::Backend("injected open failure".to_string()));
        }

        let data = self
            .databases
            .lock()
            .unwrap()
            .entry(path.to_path_buf())
            .or_default()
            .clone();

        Ok(TestHandle {
            data,
            puts: self.puts.clone(),
            failure: self.failure,
        })
    }

    async fn destroy(&self, path: &Path) -> EngineResult<()> {
        if self.failure == Failure::Destroy {
            return Err(EngineError::Backend("injected destroy failure".to_string()));
        }

        self.databases.lock().unwrap().remove(path);

        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct TestHandle {
    data: Namespaces,
    puts: Arc<AtomicUsize>,
    failure: Failure,
}

#[async_trait]
impl KvHandle for TestHandle {
    type Namespace = TestNamespace;

    fn namespace(&self, name: &str) -> TestNamespace {
        TestNamespace {
            name: name.to_string(),
            data: self.data.clone(),
            puts: self.puts.clone(),
            failure: self.failure,
        }
    }

    async fn close(&self) -> EngineResult<()> {
        if self.failure == Failure::Close {
            return Err(EngineError::Backend("injected close failure".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct TestNamespace {
    name: String,
    data: Namespaces,
    puts: Arc<AtomicUsize>,
    failure: Failure,
}

#[async_trait]
impl KvNamespace for TestNamespace {
    async fn put(&self, key: &str, value: Value) -> EngineResult<()> {
        let earlier_puts = self.puts.fetch_add(1, Ordering::SeqCst);

        if self.failure == Failure::Puts
            || (self.failure == Failure::LatePuts && earlier_puts > 0)
        {
            return Err(EngineError::Backend("injected put failure".to_string()));
        }

        self.data
            .lock()
            .unwrap()
            .entry(self.name.clone())
            .or_default()
            .insert(key.to_string(), value);

        Ok(())
    }

    async fn get(&self, key: &str) -> EngineResult<Option<Value>> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .get(&self.name)
            .and_then(|records| records.get(key).cloned()))
    }

    async fn delete(&self, key: &str) -> EngineResult<()> {
        if let Some(records) = self.data.lock().unwrap().get_mut(&self.name) {
            records.remove(key);
        }

        Ok(())
    }

    async fn value_stream(&self) -> EngineResult<ValueStream> {
        if self.failure == Failure::Streams {
            let items = vec![
                Ok(serde_json::json!({ "partial": true })),
                Err(EngineError::Backend("injected stream failure".to_string())),
            ];

            return Ok(stream::iter(items).boxed());
        }

        let values: Vec<EngineResult<Value>> = self
            .data
            .lock()
            .unwrap()
            .get(&self.name)
            .map(|records| records.values().cloned().map(Ok).collect())
            .unwrap_or_default();

        Ok(stream::iter(values).boxed())
    }
}
