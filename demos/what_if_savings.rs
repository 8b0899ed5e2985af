//! What-if savings example.
//!
//! Shows how the haircut and rate parameters drive pre/post-pooling
//! interest expense and net savings.

use pooling_engine::analysis::what_if::{WhatIfCalculator, WhatIfParams};
use pooling_engine::prelude::*;
use rust_decimal_macros::dec;

fn main() {
    println!("╔════════════════════════════════════════════╗");
    println!("║  pooling-engine: What-If Savings Example   ║");
    println!("╚════════════════════════════════════════════╝\n");

    let mut entries = EntrySet::new();
    entries.add(ClientEntry::new(
        "Umbrella Logistics",
        CountryCode::new("India"),
        vec![CurrencyPosition::new(
            CurrencyCode::new("INR"),
            dec!(50_000_000),
            dec!(4.0),
            dec!(20_000_000),
            dec!(6.5),
        )],
    ));
    entries.add(ClientEntry::new(
        "Globex Trading",
        CountryCode::new("Singapore"),
        vec![CurrencyPosition::new(
            CurrencyCode::new("USD"),
            dec!(1_000_000),
            dec!(2.0),
            dec!(250_000),
            dec!(4.2),
        )],
    ));

    let reference = ReferenceData::standard();
    let aggregates = PositionAggregator::aggregate(&entries, &reference);
    let outcome = PoolingSimulator::simulate(&entries, &reference);

    for haircut in [dec!(0), dec!(5), dec!(10)] {
        let params = WhatIfParams::new(haircut, dec!(2.5), dec!(3.5));
        let result = WhatIfCalculator::evaluate(
            &outcome.graph,
            &aggregates,
            &entries,
            &reference,
            &params,
        );
        println!("━━━ Haircut {}% ━━━\n", haircut);
        println!("{}", result);
    }
}
