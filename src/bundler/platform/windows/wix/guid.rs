//! Component GUID sources.
//!
//! Every component gets a fresh GUID per build, never one derived from its
//! path. The source is injected so tests can pin the values.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};
use uuid::Uuid;

/// Produces component GUIDs.
pub trait GuidSource: Send + Sync + fmt::Debug {
    /// Returns the next GUID.
    fn next_guid(&self) -> Uuid;
}

/// Random (v4) GUIDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomGuids;

impl GuidSource for RandomGuids {
    fn next_guid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Reproducible GUIDs: name-based (v5) over a seed and a running counter.
#[derive(Debug)]
pub struct SequentialGuids {
    seed: String,
    counter: AtomicU64,
}

impl SequentialGuids {
    /// Creates a source whose sequence is fully determined by `seed`.
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl GuidSource for SequentialGuids {
    fn next_guid(&self) -> Uuid {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        Uuid::new_v5(
            &Uuid::NAMESPACE_OID,
            format!("{}:{}", self.seed, n).as_bytes(),
        )
    }
}

/// Renders a GUID the way WiX sources spell them: uppercase, hyphenated.
pub fn format_guid(guid: Uuid) -> String {
    guid.hyphenated().to_string().to_uppercase()
}
