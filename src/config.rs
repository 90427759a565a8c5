//! Fixed constants the spec requires the implementation to expose.
//!
//! Mirrors the teacher's `EcanConfig` shape (a small tunable struct with a
//! `Default` impl) for the handful of knobs that are genuinely configurable,
//! plus bare `pub const`s for the ones the spec pins down exactly.

/// Attentional-focus cardinality.
pub const AF_SIZE: usize = 7;

/// Starting balance of the bank's shared STI fund pool.
pub const STI_FUNDS_INITIAL: f64 = 100.0;

/// Below this, the pipeline diagnoses `budget-exhausted`.
pub const BUDGET_EXHAUSTED_THRESHOLD: f64 = -120.0;

/// Length of the rolling grounding-rate window used by metrics and rescue.
pub const METRICS_WINDOW: usize = 20;

/// Capacity of the external evidence log (kept for interface parity; the
/// log itself lives outside the core per spec §1).
pub const EVIDENCE_LOG_CAPACITY: usize = 100;

/// STI is clamped to `[-STI_FLOOR, STI_MAX]` by `AttentionBank::stimulate`.
/// The spec leaves the exact bound implementation-defined; this one is
/// generous enough that none of the documented scenarios saturate it.
pub const STI_FLOOR: f64 = 200.0;
pub const STI_MAX: f64 = 200.0;

/// Fraction of a source atom's STI redistributed per `spread_activation` call.
pub const SPREAD_FRACTION_DEFAULT: f64 = 0.3;

#[derive(Debug, Clone, Copy)]
pub struct BankConfig {
    pub af_size: usize,
    pub sti_funds_initial: f64,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            af_size: AF_SIZE,
            sti_funds_initial: STI_FUNDS_INITIAL,
        }
    }
}

/// Step function mapping current funds to a stimulation-scaling factor
/// (spec §4.3.4 step 2).
pub fn fund_scale(funds: f64) -> f64 {
    if funds > 40.0 {
        1.0
    } else if funds > 15.0 {
        0.65
    } else if funds > 0.0 {
        0.4
    } else if funds > -40.0 {
        0.2
    } else {
        0.08
    }
}

/// Step function mapping current funds to the commit-time decay rate
/// (spec §4.3.4 step 5).
pub fn commit_decay_rate(funds: f64) -> f64 {
    if funds < -80.0 {
        0.45
    } else if funds < -40.0 {
        0.32
    } else if funds < 0.0 {
        0.22
    } else {
        0.1
    }
}
