//! Invocation counters, mirroring `via_indexer::metrics`'s use of `vise`
//! for process-wide gauges rather than hand-rolled counters.

use vise::{Counter, Gauge, Metrics};

#[derive(Debug, Metrics)]
#[metrics(prefix = "oracle_indexer")]
pub struct OracleMetrics {
    /// Total invocations processed, successful or not.
    pub invocations_total: Counter,
    /// Invocations that rolled back (`Truncation`/`InvariantViolation`).
    pub invocations_rolled_back: Counter,
    /// Invocations abandoned outright on `EntityStoreFailure`.
    pub invocations_fatal: Counter,
    /// Mirrors the canonical `GlobalState.activeNetworkCount` after the
    /// last successful commit.
    pub active_network_count: Gauge<i64>,
    /// Mirrors the canonical `GlobalState.latestValidEpoch` after the last
    /// successful commit, or `-1` before any epoch has been set.
    pub latest_valid_epoch: Gauge<i64>,
}

#[vise::register]
pub static ORACLE_METRICS: vise::Global<OracleMetrics> = vise::Global::new();
