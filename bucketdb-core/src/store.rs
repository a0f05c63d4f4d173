//! The public-facing record store.
//!
//! A [`RecordStore`] composes a [`Bucket`] with the equality
//! [`filter`](crate::filter) to implement the four per-bucket operations:
//! `insert` (with generated identifier), `update` (requires a pre-existing
//! record), `remove` and `query`.

use futures::StreamExt;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::{
    bucket::Bucket,
    engine::KvNamespace,
    error::{BucketDbError, BucketDbResult},
    filter, ident,
};

/// The caller-visible identifier field every persisted record carries.
pub const ID_FIELD: &str = "id";

/// A document-oriented store over one bucket of JSON records.
///
/// Records are JSON objects. Once persisted, every record carries a unique
/// string field `id`; before first insertion the field may be absent.
///
/// Note the intentional asymmetry between the write operations: `insert`
/// is upsert-like (absent id means create, present id means
/// overwrite-or-create), while `update` never creates a record that did
/// not previously exist.
///
/// # Concurrency
///
/// Operations issued concurrently against the same bucket interleave at
/// the granularity the underlying engine provides; the store adds no
/// locking, versioning or optimistic-concurrency tokens on top.
#[derive(Debug)]
pub struct RecordStore<N: KvNamespace> {
    bucket: Bucket<N>,
}

impl<N: KvNamespace> RecordStore<N> {
    /// Creates a record store over `bucket`.
    pub fn new(bucket: Bucket<N>) -> Self {
        Self { bucket }
    }

    /// Returns the name of the underlying bucket.
    pub fn bucket_name(&self) -> &str {
        self.bucket.name()
    }

    /// Inserts a record, generating an identifier when none is set.
    ///
    /// If `record.id` is absent, `null` or empty, a fresh identifier is
    /// generated and injected before persisting. A record that already
    /// carries a string `id` is persisted under exactly that id,
    /// overwriting any stored record with the same id. Any other `id`
    /// value is rejected.
    ///
    /// # Returns
    ///
    /// The record, now guaranteed to carry `id`; all other fields are
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`BucketDbError::InvalidArgument`] if `record` is not a JSON
    ///   object or carries a non-string, non-null `id`, before any I/O
    /// - [`BucketDbError::Insert`] wrapping any engine failure, carrying
    ///   the bucket name and a snapshot of the record
    pub async fn insert(&self, record: Value) -> BucketDbResult<Value> {
        let Value::Object(mut fields) = record else {
            return Err(BucketDbError::InvalidArgument(
                "please provide a proper record object".to_string(),
            ));
        };

        let id = match record_id(&fields)? {
            Some(id) => id.to_string(),
            None => {
                let id = ident::generate();
                fields.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                id
            }
        };

        let record = Value::Object(fields);

        self.bucket
            .put(&id, record.clone())
            .await
            .map_err(|source| BucketDbError::Insert {
                bucket: self.bucket.name().to_string(),
                record: record.clone(),
                source,
            })?;

        debug!(bucket = self.bucket.name(), %id, "inserted record");

        Ok(record)
    }

    /// Overwrites a previously persisted record.
    ///
    /// The record has to exist before it can be updated: a record without
    /// an `id` fails immediately, and an `id` with no stored counterpart
    /// fails after the existence check. The check-then-write sequence is
    /// not atomic; a concurrent `remove` between the check and the write
    /// can resurrect a record believed deleted. That race is accepted and
    /// not detected.
    ///
    /// # Errors
    ///
    /// - [`BucketDbError::InvalidArgument`] if `record` is not a JSON
    ///   object or carries a non-string, non-null `id`, before any I/O
    /// - [`BucketDbError::NotFound`] if `record.id` is absent/empty or no
    ///   stored record carries it
    /// - [`BucketDbError::Query`] if the existence check itself fails
    /// - [`BucketDbError::Update`] wrapping an engine failure on the write
    pub async fn update(&self, record: Value) -> BucketDbResult<Value> {
        let Some(fields) = record.as_object() else {
            return Err(BucketDbError::InvalidArgument(
                "please provide a proper record object".to_string(),
            ));
        };

        let Some(id) = record_id(fields)?.map(str::to_string) else {
            return Err(BucketDbError::NotFound(
                "the record does not have an id and therefore does not exist".to_string(),
            ));
        };

        let found = self.query(json!({ ID_FIELD: id })).await?;

        if found.is_empty() {
            return Err(BucketDbError::NotFound(
                "unable to update a non-existing record".to_string(),
            ));
        }

        self.bucket
            .put(&id, record.clone())
            .await
            .map_err(|source| BucketDbError::Update {
                bucket: self.bucket.name().to_string(),
                id: id.clone(),
                source,
            })?;

        debug!(bucket = self.bucket.name(), %id, "updated record");

        Ok(record)
    }

    /// Removes the record stored under `id`.
    ///
    /// Removing a non-existent id completes successfully; the idempotence
    /// of the underlying delete primitive is inherited.
    ///
    /// # Errors
    ///
    /// - [`BucketDbError::InvalidArgument`] if `id` is empty, before any I/O
    /// - [`BucketDbError::Remove`] wrapping any engine failure
    pub async fn remove(&self, id: &str) -> BucketDbResult<()> {
        if id.is_empty() {
            return Err(BucketDbError::InvalidArgument(
                "please provide the id of the record which should be removed".to_string(),
            ));
        }

        self.bucket
            .delete(id)
            .await
            .map_err(|source| BucketDbError::Remove {
                bucket: self.bucket.name().to_string(),
                id: id.to_string(),
                source,
            })?;

        debug!(bucket = self.bucket.name(), %id, "removed record");

        Ok(())
    }

    /// Returns every record in the bucket matching `query`.
    ///
    /// The query is a JSON object of field/value pairs; a record matches
    /// when every queried field deep-equals the record's value (see
    /// [`filter::matches`]). An empty object matches everything and skips
    /// the filtering pass entirely. Zero matches are a successful empty
    /// result, not an error.
    ///
    /// Delivery is all-or-nothing: a mid-stream failure discards the
    /// partial results and fails the whole call.
    ///
    /// # Errors
    ///
    /// - [`BucketDbError::InvalidArgument`] if `query` is not a JSON
    ///   object, before any I/O
    /// - [`BucketDbError::Query`] wrapping any stream failure
    pub async fn query(&self, query: Value) -> BucketDbResult<Vec<Value>> {
        let Value::Object(query) = query else {
            return Err(BucketDbError::InvalidArgument(
                "please provide a proper query object".to_string(),
            ));
        };

        let wrap = |source| BucketDbError::Query {
            bucket: self.bucket.name().to_string(),
            source,
        };

        let mut stream = self.bucket.value_stream().await.map_err(wrap)?;
        let mut results = Vec::new();

        while let Some(value) = stream.next().await {
            let value = value.map_err(wrap)?;

            if query.is_empty() || filter::matches(&query, &value) {
                results.push(value);
            }
        }

        Ok(results)
    }
}

/// Extracts the record's id, if one is set.
///
/// A missing, `null` or empty-string id counts as absent. Any other
/// non-string id is a malformed record and rejected before I/O.
fn record_id(fields: &Map<String, Value>) -> BucketDbResult<Option<&str>> {
    match fields.get(ID_FIELD) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id.as_str()).filter(|id| !id.is_empty())),
        Some(other) => Err(BucketDbError::InvalidArgument(format!(
            "record id must be a string, got {other}"
        ))),
    }
}
