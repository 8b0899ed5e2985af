//! # pooling-engine
//!
//! Multi-client, multi-currency liquidity aggregation and treasury
//! pooling simulation engine.
//!
//! Given a book of client cash and borrowing positions across countries,
//! the engine computes per-currency and per-convertibility totals,
//! simulates whether balances can be pooled into a central treasury
//! location (the RTC) under per-country convertibility rules, and derives
//! what-if savings figures.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: currencies, countries, client entries, reference data
//! - **aggregation** — Per-currency and per-convertibility-category totals
//! - **pooling** — Flow graph construction and RTC eligibility metrics
//! - **analysis** — What-if haircut/rate/savings calculations
//! - **engine** — Wholesale recomputation of all derived state
//! - **snapshot** — Named form-state snapshots
//! - **simulation** — Random client-book generation for testing

pub mod aggregation;
pub mod analysis;
pub mod core;
pub mod engine;
pub mod pooling;
pub mod simulation;
pub mod snapshot;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::aggregation::aggregator::PositionAggregator;
    pub use crate::aggregation::totals::AggregateResult;
    pub use crate::analysis::what_if::{WhatIfCalculator, WhatIfParams, WhatIfResult};
    pub use crate::core::country::{ConvertibilityCategory, CountryCode};
    pub use crate::core::currency::CurrencyCode;
    pub use crate::core::entry::{BorrowingTenor, ClientEntry, CurrencyPosition, EntrySet};
    pub use crate::core::reference::ReferenceData;
    pub use crate::engine::{compute_derived_state, DerivedState};
    pub use crate::pooling::flow_graph::{PoolingGraph, RESTRICTED_NODE_ID, RTC_NODE_ID};
    pub use crate::pooling::simulator::{PoolingOutcome, PoolingSimulator, RtcMetrics};
    pub use crate::snapshot::SnapshotStore;
}
