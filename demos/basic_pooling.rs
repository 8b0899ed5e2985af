//! Basic aggregation and pooling example.
//!
//! Builds a small APAC client book and walks it through the full
//! pipeline: totals, flow graph, and RTC metrics.

use pooling_engine::prelude::*;
use rust_decimal_macros::dec;

fn main() {
    println!("╔════════════════════════════════════════════╗");
    println!("║  pooling-engine: Basic Pooling Example     ║");
    println!("╚════════════════════════════════════════════╝\n");

    let mut entries = EntrySet::new();
    entries.add(ClientEntry::new(
        "Acme Manufacturing",
        CountryCode::new("China"),
        vec![CurrencyPosition::new(
            CurrencyCode::new("CNY"),
            dec!(2_000_000),
            dec!(1.5),
            dec!(1_000_000),
            dec!(2.5),
        )],
    ));
    entries.add(ClientEntry::new(
        "Initech Holdings",
        CountryCode::new("Malaysia"),
        vec![CurrencyPosition::new(
            CurrencyCode::new("MYR"),
            dec!(1_000_000),
            dec!(2.1),
            dec!(400_000),
            dec!(3.8),
        )],
    ));
    entries.add(ClientEntry::new(
        "Globex Trading",
        CountryCode::new("Singapore"),
        vec![CurrencyPosition::new(
            CurrencyCode::new("USD"),
            dec!(500_000),
            dec!(2.0),
            dec!(0),
            dec!(0),
        )],
    ));

    let reference = ReferenceData::standard();

    // --- Aggregation ---
    println!("━━━ Currency Totals ━━━\n");
    let aggregates = PositionAggregator::aggregate(&entries, &reference);
    let mut currencies: Vec<_> = aggregates.currency_totals.iter().collect();
    currencies.sort_by(|a, b| a.0.cmp(b.0));
    for (currency, totals) in currencies {
        println!(
            "  {}: cash {} / borrowing {} / net {}",
            currency, totals.total_cash, totals.total_borrowing, totals.net_position
        );
    }

    // --- Pooling simulation ---
    println!("\n━━━ Pooling Flows ━━━\n");
    let outcome = PoolingSimulator::simulate(&entries, &reference);
    for link in &outcome.graph.links {
        match link.converted_value {
            Some(converted) => println!(
                "  {} → {} : {} {} (≈ {} USD)",
                link.source, link.target, link.value, link.currency, converted
            ),
            None => println!(
                "  {} → {} : {} {}",
                link.source, link.target, link.value, link.currency
            ),
        }
    }

    println!("\n━━━ RTC Metrics ━━━\n");
    println!(
        "  Upstream to RTC:    {}",
        outcome.metrics.potential_upstream_to_rtc
    );
    println!(
        "  Pending conversion: {}",
        outcome.metrics.pending_conversion
    );
    println!("  Restricted funds:   {}", outcome.metrics.restricted_funds);
    println!("  RTC total:          {}", outcome.graph.rtc_total);
}
