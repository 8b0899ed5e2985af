use crate::aggregation::totals::AggregateResult;
use crate::core::country::ConvertibilityCategory;
use crate::core::entry::EntrySet;
use crate::core::reference::ReferenceData;
use crate::pooling::flow_graph::PoolingGraph;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scalar parameters for the what-if calculation, each independently
/// settable by the caller at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfParams {
    /// Percentage discount on pooled cash modeling conversion and
    /// settlement risk. Clamped to [0, 100].
    pub fx_haircut_pct: Decimal,
    /// Annualized credit rate earned on the pooled balance, percent.
    pub blended_credit_rate_pct: Decimal,
    /// Annualized USD debit rate charged on cash-pool borrowing, percent.
    pub usd_debit_rate_pct: Decimal,
}

impl WhatIfParams {
    pub fn new(
        fx_haircut_pct: Decimal,
        blended_credit_rate_pct: Decimal,
        usd_debit_rate_pct: Decimal,
    ) -> Self {
        Self {
            fx_haircut_pct: fx_haircut_pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
            blended_credit_rate_pct: blended_credit_rate_pct.max(Decimal::ZERO),
            usd_debit_rate_pct: usd_debit_rate_pct.max(Decimal::ZERO),
        }
    }
}

impl Default for WhatIfParams {
    /// Representative defaults: 2% haircut, 2.5% credit, 3.5% debit.
    fn default() -> Self {
        Self {
            fx_haircut_pct: Decimal::TWO,
            blended_credit_rate_pct: Decimal::new(25, 1),
            usd_debit_rate_pct: Decimal::new(35, 1),
        }
    }
}

/// Derived what-if figures: annualized interest economics of pooling
/// versus the status quo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    /// Pooled cash after the FX haircut.
    pub pooled_cash_after_haircut: Decimal,
    /// Annualized interest earned on the pooled balance.
    pub credit_interest: Decimal,
    /// Interest expense before pooling: every currency's borrowing at its
    /// bookkept rate, restricted countries included.
    pub pre_pooling_expense: Decimal,
    /// Cost of carrying the cash pool at the USD debit rate.
    pub cash_pool_borrowing_cost: Decimal,
    /// Extra borrowing cost when the pool does not cover residual
    /// borrowing needs.
    pub additional_borrowing_cost: Decimal,
    /// Total interest expense after pooling.
    pub post_pooling_expense: Decimal,
    /// Pre minus post expense.
    pub net_savings: Decimal,
}

impl WhatIfResult {
    /// Savings as a percentage of the pre-pooling expense
    /// (0 when there was no expense to begin with).
    pub fn savings_percent(&self) -> f64 {
        if self.pre_pooling_expense == Decimal::ZERO {
            return 0.0;
        }
        let pct = self.net_savings * Decimal::ONE_HUNDRED / self.pre_pooling_expense;
        pct.to_string().parse::<f64>().unwrap_or(0.0)
    }
}

impl std::fmt::Display for WhatIfResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== What-If Analysis ===")?;
        writeln!(f, "Pooled (post-haircut): {}", self.pooled_cash_after_haircut)?;
        writeln!(f, "Credit Interest:       {}", self.credit_interest)?;
        writeln!(f, "Pre-Pooling Expense:   {}", self.pre_pooling_expense)?;
        writeln!(f, "Post-Pooling Expense:  {}", self.post_pooling_expense)?;
        writeln!(f, "Net Savings:           {}", self.net_savings)?;
        writeln!(f, "Savings %:             {:.1}%", self.savings_percent())?;
        Ok(())
    }
}

/// Computes pooling economics from the simulator output plus the three
/// scalar parameters.
pub struct WhatIfCalculator;

impl WhatIfCalculator {
    /// Evaluate the what-if scenario. Pure function of its inputs:
    /// recomputing with the same snapshot yields an identical result.
    ///
    /// Pre-pooling expense is charged on all borrowing, restricted
    /// countries included. Post-pooling excludes restricted-country
    /// borrowing (that cash never reaches the pool, so its borrowing is
    /// assumed to remain locally funded); unknown-country borrowing stays
    /// in scope since it is not restricted.
    pub fn evaluate(
        graph: &PoolingGraph,
        aggregates: &AggregateResult,
        entries: &EntrySet,
        reference: &ReferenceData,
        params: &WhatIfParams,
    ) -> WhatIfResult {
        let haircut = params.fx_haircut_pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        let pooled_cash_after_haircut =
            graph.pooled_cash() * (Decimal::ONE - haircut / Decimal::ONE_HUNDRED);

        let credit_interest =
            pooled_cash_after_haircut * params.blended_credit_rate_pct / Decimal::ONE_HUNDRED;

        let pre_pooling_expense = aggregates.total_borrowing_expense();

        let poolable_borrowing: Decimal = entries
            .entries()
            .iter()
            .filter(|e| e.is_complete())
            .filter(|e| {
                reference.category_of(e.operating_country())
                    != Some(ConvertibilityCategory::Restricted)
            })
            .map(|e| e.total_borrowing())
            .sum();

        let net_position = pooled_cash_after_haircut - poolable_borrowing;
        let cash_pool_borrowing_cost =
            pooled_cash_after_haircut * params.usd_debit_rate_pct / Decimal::ONE_HUNDRED;
        let additional_borrowing_cost = if net_position < Decimal::ZERO {
            net_position.abs() * params.usd_debit_rate_pct / Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
        let post_pooling_expense = cash_pool_borrowing_cost + additional_borrowing_cost;

        WhatIfResult {
            pooled_cash_after_haircut,
            credit_interest,
            pre_pooling_expense,
            cash_pool_borrowing_cost,
            additional_borrowing_cost,
            post_pooling_expense,
            net_savings: pre_pooling_expense - post_pooling_expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregator::PositionAggregator;
    use crate::core::country::CountryCode;
    use crate::core::currency::CurrencyCode;
    use crate::core::entry::{ClientEntry, CurrencyPosition};
    use crate::pooling::simulator::PoolingSimulator;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn entry(
        client: &str,
        country: &str,
        currency: &str,
        cash: Decimal,
        borrowing: Decimal,
        borrowing_rate: Decimal,
    ) -> ClientEntry {
        ClientEntry::new(
            client,
            CountryCode::new(country),
            vec![CurrencyPosition::new(
                CurrencyCode::new(currency),
                cash,
                dec!(1.0),
                borrowing,
                borrowing_rate,
            )],
        )
    }

    fn evaluate(entries: &EntrySet, params: &WhatIfParams) -> WhatIfResult {
        let reference = ReferenceData::standard();
        let aggregates = PositionAggregator::aggregate(entries, &reference);
        let outcome = PoolingSimulator::simulate(entries, &reference);
        WhatIfCalculator::evaluate(&outcome.graph, &aggregates, entries, &reference, params)
    }

    #[test]
    fn test_haircut_arithmetic() {
        // 1,000,000 pooled at 10% haircut -> 900,000; 2.5% credit -> 22,500
        let mut entries = EntrySet::new();
        entries.add(entry(
            "Globex",
            "Singapore",
            "USD",
            dec!(1_000_000),
            Decimal::ZERO,
            Decimal::ZERO,
        ));

        let params = WhatIfParams::new(dec!(10), dec!(2.5), Decimal::ZERO);
        let result = evaluate(&entries, &params);

        assert_eq!(result.pooled_cash_after_haircut, dec!(900_000));
        assert_eq!(result.credit_interest, dec!(22_500));
    }

    #[test]
    fn test_zero_rates_zero_costs() {
        let mut entries = EntrySet::new();
        entries.add(entry(
            "Globex",
            "Singapore",
            "USD",
            dec!(1_000_000),
            dec!(500_000),
            dec!(3.0),
        ));

        let params = WhatIfParams::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        let result = evaluate(&entries, &params);

        assert_eq!(result.credit_interest, Decimal::ZERO);
        assert_eq!(result.cash_pool_borrowing_cost, Decimal::ZERO);
        assert_eq!(result.additional_borrowing_cost, Decimal::ZERO);
        assert_eq!(result.post_pooling_expense, Decimal::ZERO);
    }

    #[test]
    fn test_pre_expense_includes_restricted() {
        let mut entries = EntrySet::new();
        entries.add(entry(
            "Acme",
            "China",
            "CNY",
            dec!(2_000_000),
            dec!(1_000_000),
            dec!(2.5),
        ));
        entries.add(entry(
            "Globex",
            "Singapore",
            "USD",
            dec!(500_000),
            dec!(200_000),
            dec!(4.0),
        ));

        let result = evaluate(&entries, &WhatIfParams::default());
        // CNY: 1,000,000 * 2.5% = 25,000; USD: 200,000 * 4% = 8,000
        assert_eq!(result.pre_pooling_expense, dec!(33_000));
    }

    #[test]
    fn test_post_expense_excludes_restricted_borrowing() {
        let mut entries = EntrySet::new();
        entries.add(entry(
            "Acme",
            "China",
            "CNY",
            Decimal::ZERO,
            dec!(10_000_000),
            dec!(5.0),
        ));
        entries.add(entry(
            "Globex",
            "Singapore",
            "USD",
            dec!(1_000_000),
            dec!(400_000),
            dec!(4.0),
        ));

        let params = WhatIfParams::new(Decimal::ZERO, Decimal::ZERO, dec!(3.5));
        let result = evaluate(&entries, &params);

        // Pool covers the 400,000 of poolable borrowing: no shortfall cost
        assert_eq!(result.pooled_cash_after_haircut, dec!(1_000_000));
        assert_eq!(result.additional_borrowing_cost, Decimal::ZERO);
        assert_eq!(result.cash_pool_borrowing_cost, dec!(35_000));
    }

    #[test]
    fn test_shortfall_incurs_additional_cost() {
        let mut entries = EntrySet::new();
        entries.add(entry(
            "Globex",
            "Singapore",
            "USD",
            dec!(100_000),
            dec!(600_000),
            dec!(4.0),
        ));

        let params = WhatIfParams::new(Decimal::ZERO, Decimal::ZERO, dec!(2.0));
        let result = evaluate(&entries, &params);

        // Net position 100,000 - 600,000 = -500,000 at 2%
        assert_eq!(result.additional_borrowing_cost, dec!(10_000));
        assert_eq!(result.cash_pool_borrowing_cost, dec!(2_000));
        assert_eq!(result.post_pooling_expense, dec!(12_000));
    }

    #[test]
    fn test_savings_percent_zero_when_no_pre_expense() {
        let mut entries = EntrySet::new();
        entries.add(entry(
            "Globex",
            "Singapore",
            "USD",
            dec!(100_000),
            Decimal::ZERO,
            Decimal::ZERO,
        ));

        let result = evaluate(&entries, &WhatIfParams::default());
        assert_eq!(result.pre_pooling_expense, Decimal::ZERO);
        assert_relative_eq!(result.savings_percent(), 0.0);
    }

    #[test]
    fn test_savings_percent() {
        let mut entries = EntrySet::new();
        entries.add(entry(
            "Globex",
            "Singapore",
            "USD",
            dec!(1_000_000),
            dec!(500_000),
            dec!(4.0),
        ));

        // Pre: 500,000 * 4% = 20,000.
        // Post: pool 1,000,000 covers borrowing; cost 1,000,000 * 1% = 10,000.
        let params = WhatIfParams::new(Decimal::ZERO, Decimal::ZERO, dec!(1.0));
        let result = evaluate(&entries, &params);
        assert_eq!(result.net_savings, dec!(10_000));
        assert_relative_eq!(result.savings_percent(), 50.0, max_relative = 1e-9);
    }

    #[test]
    fn test_haircut_clamped() {
        let params = WhatIfParams::new(dec!(250), dec!(-1), dec!(-2));
        assert_eq!(params.fx_haircut_pct, dec!(100));
        assert_eq!(params.blended_credit_rate_pct, Decimal::ZERO);
        assert_eq!(params.usd_debit_rate_pct, Decimal::ZERO);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let mut entries = EntrySet::new();
        entries.add(entry(
            "Acme",
            "Malaysia",
            "MYR",
            dec!(1_000_000),
            dec!(300_000),
            dec!(3.8),
        ));

        let params = WhatIfParams::default();
        let a = evaluate(&entries, &params);
        let b = evaluate(&entries, &params);
        assert_eq!(a, b);
    }
}
