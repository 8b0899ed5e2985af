//! Wholesale recomputation of all derived state from an entry snapshot.
//!
//! The caller owns the entry collection and calls [`compute_derived_state`]
//! after every mutation. There is no incremental-update path and no
//! observer mechanism: one pass reads the snapshot and the reference
//! tables, and produces the complete derived picture.

use crate::aggregation::aggregator::PositionAggregator;
use crate::aggregation::totals::{ConvertibilityTotals, CurrencyTotals};
use crate::analysis::what_if::{WhatIfCalculator, WhatIfParams, WhatIfResult};
use crate::core::country::ConvertibilityCategory;
use crate::core::currency::CurrencyCode;
use crate::core::entry::EntrySet;
use crate::core::reference::ReferenceData;
use crate::pooling::flow_graph::PoolingGraph;
use crate::pooling::simulator::{PoolingSimulator, RtcMetrics};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The complete derived picture for one entry snapshot: aggregation
/// totals, the pooling flow graph, RTC metrics, and what-if figures.
/// A plain read-only value — callers hand out either the previous
/// complete state or the new one, never an interleaving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedState {
    pub currency_totals: HashMap<CurrencyCode, CurrencyTotals>,
    pub convertibility_totals: HashMap<ConvertibilityCategory, ConvertibilityTotals>,
    pub pooling_graph: PoolingGraph,
    pub rtc_metrics: RtcMetrics,
    pub what_if: WhatIfResult,
}

/// Recompute every derived structure from scratch.
///
/// Pure, side-effect-free, and idempotent: the same entries, reference
/// tables, and parameters always produce an identical `DerivedState`.
/// Runs in O(total currency positions).
///
/// # Examples
///
/// ```
/// use pooling_engine::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let mut entries = EntrySet::new();
/// entries.add(ClientEntry::new(
///     "Globex",
///     CountryCode::new("Singapore"),
///     vec![CurrencyPosition::new(
///         CurrencyCode::new("USD"),
///         dec!(500_000), dec!(2.0), dec!(0), dec!(0),
///     )],
/// ));
///
/// let state = compute_derived_state(
///     &entries,
///     &ReferenceData::standard(),
///     &WhatIfParams::default(),
/// );
/// assert_eq!(state.rtc_metrics.potential_upstream_to_rtc, dec!(500_000));
/// ```
pub fn compute_derived_state(
    entries: &EntrySet,
    reference: &ReferenceData,
    params: &WhatIfParams,
) -> DerivedState {
    let aggregates = PositionAggregator::aggregate(entries, reference);
    let outcome = PoolingSimulator::simulate(entries, reference);
    let what_if =
        WhatIfCalculator::evaluate(&outcome.graph, &aggregates, entries, reference, params);

    DerivedState {
        currency_totals: aggregates.currency_totals,
        convertibility_totals: aggregates.convertibility_totals,
        pooling_graph: outcome.graph,
        rtc_metrics: outcome.metrics,
        what_if,
    }
}
