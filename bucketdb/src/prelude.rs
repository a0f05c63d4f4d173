//! Convenient re-exports of commonly used types from bucketdb.
//!
//! Import this prelude module to quickly access the most frequently used
//! types and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use bucketdb::prelude::*;
//! ```

pub use bucketdb_core::{
    bucket::Bucket,
    context::{NamespaceOf, StorageContext},
    engine::{KvEngine, KvHandle, KvNamespace, ValueStream},
    error::{BucketDbError, BucketDbResult, EngineError, EngineResult},
    store::{ID_FIELD, RecordStore},
};
