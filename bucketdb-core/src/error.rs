//! Error types and result types for record store operations.
//!
//! Errors come in two layers: [`EngineError`] is what the underlying
//! key-value engine reports, and [`BucketDbError`] is the caller-facing
//! taxonomy that wraps engine failures with operation context. The engine
//! cause is chained via `#[source]` and stays inspectable through
//! [`std::error::Error::source`].

use serde_json::Value;
use thiserror::Error;

/// Failures originating in the underlying key-value engine.
///
/// The record store never inspects these beyond wrapping them; retry
/// policy, if desired, is the caller's responsibility.
#[derive(Error, Debug)]
pub enum EngineError {
    /// An I/O failure while reading or writing engine state.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A stored value could not be encoded or decoded as JSON.
    #[error("value encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    /// The engine handle was used after being closed.
    #[error("engine handle is closed")]
    Closed,
    /// Any other backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for engine-level operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Represents all possible errors surfaced by the record store.
///
/// Validation failures ([`InvalidArgument`](BucketDbError::InvalidArgument))
/// are detected synchronously before any I/O is attempted. All other
/// variants wrap an [`EngineError`] with the bucket and record context of
/// the failed operation. Nothing is swallowed or retried internally.
#[derive(Error, Debug)]
pub enum BucketDbError {
    /// The caller passed a malformed or missing required parameter.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// `update` targeted a record with no id, or an id not in storage.
    #[error("record not found: {0}")]
    NotFound(String),
    /// Lazily opening the engine for a bucket request failed.
    #[error("failed to open the storage layer for bucket {bucket}")]
    Open {
        bucket: String,
        #[source]
        source: EngineError,
    },
    /// Persisting a record during `insert` failed.
    /// Carries a snapshot of the offending record for diagnostics.
    #[error("failed to insert record {record} into bucket {bucket}")]
    Insert {
        bucket: String,
        record: Value,
        #[source]
        source: EngineError,
    },
    /// Overwriting an existing record during `update` failed.
    #[error("failed to update record {id} in bucket {bucket}")]
    Update {
        bucket: String,
        id: String,
        #[source]
        source: EngineError,
    },
    /// Deleting a record during `remove` failed.
    #[error("failed to remove record {id} from bucket {bucket}")]
    Remove {
        bucket: String,
        id: String,
        #[source]
        source: EngineError,
    },
    /// Streaming or filtering bucket values during `query` failed.
    /// Partial results are discarded; callers never see a truncated list.
    #[error("failed to query bucket {bucket}")]
    Query {
        bucket: String,
        #[source]
        source: EngineError,
    },
    /// Closing or wiping the storage layer during `destroy` failed.
    #[error("failed to destroy the storage layer")]
    Teardown(#[source] EngineError),
}

/// A specialized `Result` type for record store operations.
pub type BucketDbResult<T> = Result<T, BucketDbError>;
