//! Rating aggregation.
//!
//! All statistics are derived at read time from rating rows; nothing here is
//! ever stored. The three dashboards deliberately do NOT share one averaging
//! scope: the owner dashboard averages per-store averages (two-level mean)
//! while the user and admin dashboards take the flat mean over every rating
//! row in the system. This asymmetry is a compatibility requirement, not an
//! oversight to unify.

use serde::Serialize;

/// Per-store aggregate, derived from the store's rating values.
///
/// `average` is `None` when the store has no ratings — never `0.0`, so
/// clients can distinguish "unrated" from a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StoreAggregate {
    pub average: Option<f64>,
    pub count: u64,
}

impl StoreAggregate {
    pub const EMPTY: Self = Self {
        average: None,
        count: 0,
    };
}

/// Round to one decimal place, the display precision for store averages.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Round to two decimal places, used for the owner dashboard overall mean.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Aggregate one store's rating values.
pub fn store_aggregate(values: &[u8]) -> StoreAggregate {
    if values.is_empty() {
        return StoreAggregate::EMPTY;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    let average = round1(sum as f64 / values.len() as f64);
    StoreAggregate {
        average: Some(average),
        count: values.len() as u64,
    }
}

/// Flat mean over every rating row, `0.0` when there are none.
///
/// Used by the user and admin dashboards.
pub fn flat_mean(values: &[u8]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    sum as f64 / values.len() as f64
}

/// Owner-dashboard overall average: the mean of each owned store's own
/// average, with unrated stores contributing `0`. Rounded to two decimals,
/// `0.0` when the owner has no stores.
pub fn owner_overall_average(per_store: &[Option<f64>]) -> f64 {
    if per_store.is_empty() {
        return 0.0;
    }
    let sum: f64 = per_store.iter().map(|avg| avg.unwrap_or(0.0)).sum();
    round2(sum / per_store.len() as f64)
}

/// Count of each rating value 1..=5, indexed by `value - 1`.
/// Out-of-range values are skipped.
pub fn distribution(values: &[u8]) -> [u64; 5] {
    let mut counts = [0u64; 5];
    for &v in values {
        if (1..=5).contains(&v) {
            counts[usize::from(v) - 1] += 1;
        }
    }
    counts
}
