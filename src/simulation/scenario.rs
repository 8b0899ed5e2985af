//! Random client-book generation.
//!
//! Produces entry sets with a configurable spread of countries and
//! currencies to exercise aggregation and pooling under load.

use crate::core::country::CountryCode;
use crate::core::currency::CurrencyCode;
use crate::core::entry::{ClientEntry, CurrencyPosition, EntrySet};
use crate::core::reference::ReferenceData;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random client book.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Number of client entries to generate.
    pub client_count: usize,
    /// Countries to draw from. Defaults to the standard reference set.
    pub countries: Vec<CountryCode>,
    /// Currency positions per client.
    pub currencies_per_client: usize,
    /// Minimum cash amount per position.
    pub min_cash: Decimal,
    /// Maximum cash amount per position.
    pub max_cash: Decimal,
    /// Minimum borrowing amount per position.
    pub min_borrowing: Decimal,
    /// Maximum borrowing amount per position.
    pub max_borrowing: Decimal,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let mut countries: Vec<CountryCode> = ReferenceData::standard()
            .countries()
            .map(|(c, _)| c.clone())
            .collect();
        countries.sort();
        Self {
            client_count: 10,
            countries,
            currencies_per_client: 2,
            min_cash: Decimal::from(10_000),
            max_cash: Decimal::from(10_000_000),
            min_borrowing: Decimal::ZERO,
            max_borrowing: Decimal::from(5_000_000),
        }
    }
}

/// Generate a random client book for testing.
///
/// Each client is placed in a random country and holds that country's
/// suggested currencies (falling back to USD), with random cash and
/// borrowing balances.
pub fn generate_random_entries(config: &ScenarioConfig) -> EntrySet {
    let mut rng = rand::thread_rng();
    let reference = ReferenceData::standard();
    let mut set = EntrySet::new();

    let min_cash: f64 = config.min_cash.to_string().parse().unwrap_or(10_000.0);
    let max_cash: f64 = config.max_cash.to_string().parse().unwrap_or(10_000_000.0);
    let min_borrowing: f64 = config.min_borrowing.to_string().parse().unwrap_or(0.0);
    let max_borrowing: f64 = config
        .max_borrowing
        .to_string()
        .parse()
        .unwrap_or(5_000_000.0);

    for i in 0..config.client_count {
        let country = if config.countries.is_empty() {
            CountryCode::new("Singapore")
        } else {
            config.countries[rng.gen_range(0..config.countries.len())].clone()
        };

        let suggested = reference.suggested_currencies(&country);
        let mut positions = Vec::with_capacity(config.currencies_per_client);
        for p in 0..config.currencies_per_client {
            let currency = if suggested.is_empty() {
                CurrencyCode::new("USD")
            } else {
                suggested[p % suggested.len()].clone()
            };

            let cash = random_amount(&mut rng, min_cash, max_cash);
            let borrowing = random_amount(&mut rng, min_borrowing, max_borrowing);
            let cash_rate = Decimal::from_f64_retain(rng.gen_range(0.1..5.0))
                .unwrap_or(Decimal::ONE)
                .round_dp(2);
            let borrowing_rate = Decimal::from_f64_retain(rng.gen_range(1.0..8.0))
                .unwrap_or(Decimal::TWO)
                .round_dp(2);

            positions.push(CurrencyPosition::new(
                currency,
                cash,
                cash_rate,
                borrowing,
                borrowing_rate,
            ));
        }

        set.add(ClientEntry::new(
            format!("CLIENT-{:03}", i),
            country,
            positions,
        ));
    }

    set
}

fn random_amount(rng: &mut impl Rng, min: f64, max: f64) -> Decimal {
    let value = rng.gen_range(min..max.max(min + 1.0));
    Decimal::from_f64_retain(value)
        .unwrap_or(Decimal::from(1_000))
        .round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregator::PositionAggregator;
    use crate::pooling::simulator::PoolingSimulator;

    #[test]
    fn test_random_book_generation() {
        let config = ScenarioConfig {
            client_count: 5,
            currencies_per_client: 3,
            ..Default::default()
        };

        let set = generate_random_entries(&config);
        assert_eq!(set.len(), 5);
        for entry in set.entries() {
            assert!(entry.is_complete());
            assert_eq!(entry.currencies().len(), 3);
        }
    }

    #[test]
    fn test_amounts_respect_configured_bounds() {
        let config = ScenarioConfig {
            client_count: 10,
            min_cash: Decimal::from(1_000),
            max_cash: Decimal::from(2_000),
            min_borrowing: Decimal::from(100),
            max_borrowing: Decimal::from(200),
            ..Default::default()
        };

        let set = generate_random_entries(&config);
        for entry in set.entries() {
            for pos in entry.currencies() {
                assert!(pos.cash_amount >= Decimal::from(1_000));
                assert!(pos.cash_amount <= Decimal::from(2_000));
                assert!(pos.borrowing_amount >= Decimal::from(100));
                assert!(pos.borrowing_amount <= Decimal::from(200));
            }
        }
    }

    #[test]
    fn test_random_book_through_pipeline() {
        let config = ScenarioConfig {
            client_count: 20,
            ..Default::default()
        };

        let set = generate_random_entries(&config);
        let reference = ReferenceData::standard();

        let aggregates = PositionAggregator::aggregate(&set, &reference);
        assert_eq!(aggregates.total_cash(), set.gross_cash());

        let outcome = PoolingSimulator::simulate(&set, &reference);
        // Every generated country is known, so metrics partition all cash
        let routed = outcome.metrics.potential_upstream_to_rtc
            + outcome.metrics.restricted_funds
            + outcome.metrics.pending_conversion;
        assert_eq!(routed, set.gross_cash());
    }
}
