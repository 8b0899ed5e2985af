use crate::core::entry::EntrySet;
use crate::core::reference::ReferenceData;
use crate::pooling::flow_graph::{FlowLink, PoolingGraph, RESTRICTED_NODE_ID, RTC_NODE_ID};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// RTC eligibility metrics accumulated during a simulation pass.
///
/// All figures use the unfloored source amounts — the rendering floor on
/// link weights never leaks into the metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RtcMetrics {
    /// Cash from freely convertible countries, upstreamable as-is.
    pub potential_upstream_to_rtc: Decimal,
    /// Cash trapped in restricted countries.
    pub restricted_funds: Decimal,
    /// Cash from partially convertible countries, in source currency,
    /// awaiting FX conversion.
    pub pending_conversion: Decimal,
}

/// Combined output of one pooling simulation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolingOutcome {
    pub graph: PoolingGraph,
    pub metrics: RtcMetrics,
}

/// Builds the pooling flow graph and RTC metrics from a client entry
/// snapshot.
///
/// Routing is by gross cash: each cash-positive currency position of each
/// complete, known-country entry produces exactly one link to a sink,
/// chosen by the country's pooling rule. Borrowing balances are ignored
/// here — only the gross cash balance is eligible for upstreaming.
///
/// # Examples
///
/// ```
/// use pooling_engine::core::country::CountryCode;
/// use pooling_engine::core::currency::CurrencyCode;
/// use pooling_engine::core::entry::{ClientEntry, CurrencyPosition, EntrySet};
/// use pooling_engine::core::reference::ReferenceData;
/// use pooling_engine::pooling::flow_graph::RTC_NODE_ID;
/// use pooling_engine::pooling::simulator::PoolingSimulator;
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
/// let outcome = PoolingSimulator::simulate(&entries, &ReferenceData::standard());
/// assert_eq!(outcome.metrics.potential_upstream_to_rtc, dec!(500_000));
/// assert_eq!(outcome.graph.links[0].target, RTC_NODE_ID);
/// ```
pub struct PoolingSimulator;

impl PoolingSimulator {
    /// Run one simulation pass. Pure and idempotent; link order follows
    /// entry and position iteration order, with no sorting applied.
    pub fn simulate(entries: &EntrySet, reference: &ReferenceData) -> PoolingOutcome {
        let mut graph = PoolingGraph::default();
        let mut metrics = RtcMetrics::default();

        for entry in entries.entries() {
            if !entry.is_complete() {
                continue;
            }
            let country = entry.operating_country();
            let Some(category) = reference.category_of(country) else {
                log::debug!("country {country} not in reference table, excluded from pooling");
                continue;
            };

            graph.ensure_node(country.as_str(), category);
            let rule = reference.pooling_rule(category);

            for position in entry.currencies() {
                if position.cash_amount <= Decimal::ZERO {
                    continue;
                }
                let cash = position.cash_amount;
                let currency = position.currency.clone();

                if !rule.can_pool {
                    graph.links.push(FlowLink::new(
                        country.as_str(),
                        RESTRICTED_NODE_ID,
                        cash,
                        currency,
                    ));
                    metrics.restricted_funds += cash;
                } else if rule.requires_conversion {
                    let target = rule.target_or_usd();
                    let rate = reference.fx_rates().rate_or_identity(&currency, &target);
                    let converted = cash * rate;
                    graph.links.push(
                        FlowLink::new(country.as_str(), RTC_NODE_ID, cash, currency)
                            .with_converted_value(converted),
                    );
                    metrics.pending_conversion += cash;
                    graph.rtc_total += converted;
                } else {
                    graph.links.push(FlowLink::new(
                        country.as_str(),
                        RTC_NODE_ID,
                        cash,
                        currency,
                    ));
                    metrics.potential_upstream_to_rtc += cash;
                    graph.rtc_total += cash;
                }
            }
        }

        graph.append_sinks();

        PoolingOutcome { graph, metrics }
    }
}
