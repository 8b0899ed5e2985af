use crate::aggregation::totals::{AggregateResult, ConvertibilityTotals, CurrencyTotals};
use crate::core::entry::EntrySet;
use crate::core::reference::ReferenceData;

/// Folds client entries into per-currency and per-category totals.
///
/// The pass never fails: incomplete entries are skipped, positions with
/// an empty currency code are ignored, and entries in countries missing
/// from the reference table contribute to currency totals only.
///
/// # Examples
///
/// ```
/// use pooling_engine::core::country::CountryCode;
/// use pooling_engine::core::currency::CurrencyCode;
/// use pooling_engine::core::entry::{ClientEntry, CurrencyPosition, EntrySet};
/// use pooling_engine::core::reference::ReferenceData;
/// use pooling_engine::aggregation::aggregator::PositionAggregator;
/// use rust_decimal_macros::dec;
///
/// let mut entries = EntrySet::new();
/// entries.add(ClientEntry::new(
///     "Acme",
///     CountryCode::new("China"),
///     vec![CurrencyPosition::new(
///         CurrencyCode::new("CNY"),
///         dec!(2_000_000), dec!(1.5), dec!(1_000_000), dec!(2.5),
///     )],
/// ));
///
/// let result = PositionAggregator::aggregate(&entries, &ReferenceData::standard());
/// let cny = &result.currency_totals[&CurrencyCode::new("CNY")];
/// assert_eq!(cny.net_position, dec!(1_000_000));
/// ```
pub struct PositionAggregator;

impl PositionAggregator {
    /// Compute currency and convertibility totals for one entry snapshot.
    ///
    /// Pure and idempotent: the same input always produces the same
    /// output, and the input is never mutated.
    pub fn aggregate(entries: &EntrySet, reference: &ReferenceData) -> AggregateResult {
        let mut result = AggregateResult::default();

        for entry in entries.entries() {
            if !entry.is_complete() {
                log::debug!("skipping incomplete entry {}", entry.id());
                continue;
            }

            for position in entry.currencies() {
                if position.currency.is_empty() {
                    continue;
                }
                result
                    .currency_totals
                    .entry(position.currency.clone())
                    .and_modify(|totals| {
                        totals.accumulate(
                            position.cash_amount,
                            position.cash_interest_rate,
                            position.borrowing_amount,
                            position.borrowing_interest_rate,
                            position.tenor,
                        )
                    })
                    .or_insert_with(|| {
                        CurrencyTotals::first_sighting(
                            position.cash_amount,
                            position.cash_interest_rate,
                            position.borrowing_amount,
                            position.borrowing_interest_rate,
                            position.tenor,
                        )
                    });
            }

            // Unknown countries are excluded from convertibility totals
            // but still counted in the currency totals above.
            let Some(category) = reference.category_of(entry.operating_country()) else {
                log::debug!(
                    "country {} not in reference table, excluded from convertibility totals",
                    entry.operating_country()
                );
                continue;
            };

            let bucket = result
                .convertibility_totals
                .entry(category)
                .or_insert_with(ConvertibilityTotals::default);
            bucket.contribute(
                entry.operating_country(),
                entry.total_cash(),
                entry.total_borrowing(),
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::country::{ConvertibilityCategory, CountryCode};
    use crate::core::currency::CurrencyCode;
    use crate::core::entry::{ClientEntry, CurrencyPosition};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn position(
        currency: &str,
        cash: Decimal,
        cash_rate: Decimal,
        borrowing: Decimal,
        borrowing_rate: Decimal,
    ) -> CurrencyPosition {
        CurrencyPosition::new(
            CurrencyCode::new(currency),
            cash,
            cash_rate,
            borrowing,
            borrowing_rate,
        )
    }

    #[test]
    fn test_china_scenario() {
        let mut entries = EntrySet::new();
        entries.add(ClientEntry::new(
            "Acme",
            CountryCode::new("China"),
            vec![position("CNY", dec!(2_000_000), dec!(1.5), dec!(1_000_000), dec!(2.5))],
        ));

        let result = PositionAggregator::aggregate(&entries, &ReferenceData::standard());

        let cny = &result.currency_totals[&CurrencyCode::new("CNY")];
        assert_eq!(cny.total_cash, dec!(2_000_000));
        assert_eq!(cny.total_borrowing, dec!(1_000_000));
        assert_eq!(cny.net_position, dec!(1_000_000));
        assert_eq!(cny.cash_interest_rate, dec!(1.5));
        assert_eq!(cny.borrowing_interest_rate, dec!(2.5));

        let restricted = &result.convertibility_totals[&ConvertibilityCategory::Restricted];
        assert_eq!(restricted.countries, vec![CountryCode::new("China")]);
        assert_eq!(restricted.total_cash, dec!(2_000_000));
    }

    #[test]
    fn test_incomplete_entries_skipped() {
        let mut entries = EntrySet::new();
        entries.add(ClientEntry::new(
            "",
            CountryCode::new("China"),
            vec![position("CNY", dec!(100), dec!(1), dec!(0), dec!(0))],
        ));
        entries.add(ClientEntry::new("Acme", CountryCode::new("China"), vec![]));

        let result = PositionAggregator::aggregate(&entries, &ReferenceData::standard());
        assert!(result.currency_totals.is_empty());
        assert!(result.convertibility_totals.is_empty());
    }

    #[test]
    fn test_empty_currency_code_ignored() {
        let mut entries = EntrySet::new();
        entries.add(ClientEntry::new(
            "Acme",
            CountryCode::new("Singapore"),
            vec![
                position("", dec!(999), dec!(1), dec!(0), dec!(0)),
                position("USD", dec!(500), dec!(2), dec!(0), dec!(0)),
            ],
        ));

        let result = PositionAggregator::aggregate(&entries, &ReferenceData::standard());
        assert_eq!(result.currency_totals.len(), 1);
        assert_eq!(
            result.currency_totals[&CurrencyCode::new("USD")].total_cash,
            dec!(500)
        );
    }

    #[test]
    fn test_unknown_country_currency_totals_only() {
        let mut entries = EntrySet::new();
        entries.add(ClientEntry::new(
            "Offshore Co",
            CountryCode::new("Atlantis"),
            vec![position("USD", dec!(750), dec!(1), dec!(250), dec!(2))],
        ));

        let result = PositionAggregator::aggregate(&entries, &ReferenceData::standard());
        assert_eq!(
            result.currency_totals[&CurrencyCode::new("USD")].total_cash,
            dec!(750)
        );
        assert!(result.convertibility_totals.is_empty());
    }

    #[test]
    fn test_max_rate_across_entries() {
        let mut entries = EntrySet::new();
        entries.add(ClientEntry::new(
            "A",
            CountryCode::new("Singapore"),
            vec![position("USD", dec!(100), dec!(3.0), dec!(100), dec!(4.0))],
        ));
        entries.add(ClientEntry::new(
            "B",
            CountryCode::new("Hong Kong"),
            vec![position("USD", dec!(100), dec!(2.0), dec!(100), dec!(5.0))],
        ));

        let result = PositionAggregator::aggregate(&entries, &ReferenceData::standard());
        let usd = &result.currency_totals[&CurrencyCode::new("USD")];
        assert_eq!(usd.cash_interest_rate, dec!(3.0));
        assert_eq!(usd.borrowing_interest_rate, dec!(5.0));
        assert_eq!(usd.total_cash, dec!(200));
    }

    #[test]
    fn test_category_partition_no_double_count() {
        let mut entries = EntrySet::new();
        for country in ["China", "Malaysia", "Singapore", "China"] {
            entries.add(ClientEntry::new(
                format!("Client-{country}"),
                CountryCode::new(country),
                vec![position("USD", dec!(100), dec!(1), dec!(0), dec!(0))],
            ));
        }

        let result = PositionAggregator::aggregate(&entries, &ReferenceData::standard());

        let mut seen = Vec::new();
        for totals in result.convertibility_totals.values() {
            for country in &totals.countries {
                assert!(!seen.contains(country), "{country} counted twice");
                seen.push(country.clone());
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let mut entries = EntrySet::new();
        entries.add(ClientEntry::new(
            "Acme",
            CountryCode::new("Malaysia"),
            vec![position("MYR", dec!(1_000_000), dec!(2.1), dec!(400_000), dec!(3.4))],
        ));

        let reference = ReferenceData::standard();
        let a = PositionAggregator::aggregate(&entries, &reference);
        let b = PositionAggregator::aggregate(&entries, &reference);
        assert_eq!(a, b);
    }
}
