//! Position aggregation: per-currency and per-convertibility-category totals.

pub mod aggregator;
pub mod totals;
