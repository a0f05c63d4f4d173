//! Record identifier generation.
//!
//! Identifiers are 40-hex-character digests over a mix of wall-clock time,
//! a process-monotonic timer and a random nonce, which keeps them
//! practically unique across rapid successive calls within and across
//! processes. They are opaque strings; no ordering or parsing semantics
//! attach to them.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::{
    sync::LazyLock,
    time::Instant,
};
use tracing::trace;

static PROCESS_START: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Generates a fresh record identifier.
pub fn generate() -> String {
    let wall = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default();
    let mono = PROCESS_START.elapsed().as_nanos();
    let nonce: u64 = rand::random();

    let mut hasher = Sha256::new();
    hasher.update(wall.to_le_bytes());
    hasher.update(mono.to_le_bytes());
    hasher.update(nonce.to_le_bytes());

    let mut id = format!("{:x}", hasher.finalize());
    id.truncate(40);

    trace!(%id, "generated record id");

    id
}
