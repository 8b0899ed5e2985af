use crate::core::country::{ConvertibilityCategory, CountryCode};
use crate::core::currency::CurrencyCode;
use crate::core::entry::BorrowingTenor;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate balances for a single currency across all contributing entries.
///
/// Rate bookkeeping is monotonic-max: the first contributing position sets
/// the rate, and later positions replace it only when strictly greater.
/// This mirrors the upstream tool's behavior and is deliberately preserved
/// even though a weighted average would be the more defensible financial
/// semantics. The tenor is simply that of the last contributing position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyTotals {
    pub total_cash: Decimal,
    pub total_borrowing: Decimal,
    /// Cash minus borrowing.
    pub net_position: Decimal,
    /// Maximum observed cash interest rate, percent.
    pub cash_interest_rate: Decimal,
    /// Maximum observed borrowing interest rate, percent.
    pub borrowing_interest_rate: Decimal,
    /// Tenor of the last contributing position.
    pub tenor: BorrowingTenor,
}

impl CurrencyTotals {
    pub(crate) fn first_sighting(
        cash: Decimal,
        cash_rate: Decimal,
        borrowing: Decimal,
        borrowing_rate: Decimal,
        tenor: BorrowingTenor,
    ) -> Self {
        Self {
            total_cash: cash,
            total_borrowing: borrowing,
            net_position: cash - borrowing,
            cash_interest_rate: cash_rate,
            borrowing_interest_rate: borrowing_rate,
            tenor,
        }
    }

    pub(crate) fn accumulate(
        &mut self,
        cash: Decimal,
        cash_rate: Decimal,
        borrowing: Decimal,
        borrowing_rate: Decimal,
        tenor: BorrowingTenor,
    ) {
        self.total_cash += cash;
        self.total_borrowing += borrowing;
        self.net_position += cash - borrowing;
        if cash_rate > self.cash_interest_rate {
            self.cash_interest_rate = cash_rate;
        }
        if borrowing_rate > self.borrowing_interest_rate {
            self.borrowing_interest_rate = borrowing_rate;
        }
        self.tenor = tenor;
    }

    /// Annualized interest expense on the borrowed balance at the
    /// bookkept rate.
    pub fn borrowing_expense(&self) -> Decimal {
        self.total_borrowing * self.borrowing_interest_rate / Decimal::ONE_HUNDRED
    }
}

/// Aggregate balances for one convertibility category, with the set of
/// contributing countries in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertibilityTotals {
    pub total_cash: Decimal,
    pub total_borrowing: Decimal,
    pub net_position: Decimal,
    /// Contributing countries, insertion order, no duplicates.
    pub countries: Vec<CountryCode>,
}

impl ConvertibilityTotals {
    pub(crate) fn contribute(
        &mut self,
        country: &CountryCode,
        cash: Decimal,
        borrowing: Decimal,
    ) {
        if !self.countries.contains(country) {
            self.countries.push(country.clone());
        }
        self.total_cash += cash;
        self.total_borrowing += borrowing;
        self.net_position += cash - borrowing;
    }
}

/// Output of one aggregation pass: currency totals keyed by currency code
/// and convertibility totals keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub currency_totals: HashMap<CurrencyCode, CurrencyTotals>,
    pub convertibility_totals: HashMap<ConvertibilityCategory, ConvertibilityTotals>,
}

impl AggregateResult {
    /// Sum of cash across all currency buckets.
    pub fn total_cash(&self) -> Decimal {
        self.currency_totals.values().map(|t| t.total_cash).sum()
    }

    /// Sum of borrowing across all currency buckets.
    pub fn total_borrowing(&self) -> Decimal {
        self.currency_totals
            .values()
            .map(|t| t.total_borrowing)
            .sum()
    }

    /// Annualized interest expense across all currencies at the bookkept
    /// per-currency borrowing rates.
    pub fn total_borrowing_expense(&self) -> Decimal {
        self.currency_totals
            .values()
            .map(|t| t.borrowing_expense())
            .sum()
    }
}
