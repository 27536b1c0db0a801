//! Run summary and failure breakdown

use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use crate::core::error::{Result, UaCheckError};
use crate::core::types::{FailedCandidate, FailureKind};

/// Aggregate counts for one run. Built once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    total: usize,
    active_count: usize,
    failed_count: usize,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    elapsed: Duration,
}

fn serialize_millis<S: Serializer>(
    elapsed: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed.as_millis() as u64)
}

impl RunSummary {
    /// Fails with [`UaCheckError::Incomplete`] unless `active + failed == total`.
    pub fn new(
        total: usize,
        active_count: usize,
        failed_count: usize,
        elapsed: Duration,
    ) -> Result<Self> {
        let received = active_count + failed_count;
        if received != total {
            return Err(UaCheckError::Incomplete {
                expected: total,
                received,
            });
        }
        Ok(Self {
            total,
            active_count,
            failed_count,
            elapsed,
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn failed_count(&self) -> usize {
        self.failed_count
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Share of active candidates, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.active_count as f64 * 100.0 / self.total as f64
    }

    pub fn all_active(&self) -> bool {
        self.failed_count == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {}, Active: {}, Failed: {}, Time: {:.2}s",
            self.total,
            self.active_count,
            self.failed_count,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Count failures per kind, in [`FailureKind::ALL`] order, skipping empty kinds.
pub fn failure_breakdown(failed: &[FailedCandidate]) -> Vec<(FailureKind, usize)> {
    let mut counts: FxHashMap<FailureKind, usize> = FxHashMap::default();
    for entry in failed {
        *counts.entry(entry.kind()).or_insert(0) += 1;
    }

    FailureKind::ALL
        .iter()
        .filter_map(|kind| counts.get(kind).map(|count| (*kind, *count)))
        .collect()
}
