use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// ISO 4217-style currency code.
///
/// Supports standard fiat currencies (USD, CNY, MYR, SGD, etc.)
/// as well as arbitrary currency identifiers.
///
/// # Examples
///
/// ```
/// use pooling_engine::core::currency::CurrencyCode;
///
/// let usd = CurrencyCode::new("USD");
/// let cny = CurrencyCode::new("CNY");
/// assert_ne!(usd, cny);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors arising when building the FX rate table.
///
/// Lookups never fail — a missing pair falls back to the identity rate —
/// but the table refuses to store a non-positive rate at construction time.
#[derive(Debug, Error)]
pub enum FxError {
    #[error("FX rate must be positive, got {rate} for {from} -> {to}")]
    InvalidRate {
        from: CurrencyCode,
        to: CurrencyCode,
        rate: Decimal,
    },
}

/// FX rate table for converting pooled balances into a target currency.
///
/// Stores direct rates and derives inverse rates. Only direct-to-target
/// conversion is modeled; there is no multi-hop chaining. When no rate is
/// known for a pair, the table falls back to the identity rate `1` — the
/// pooling simulator treats an unknown pair as a silent no-op conversion
/// rather than an error.
///
/// # Examples
///
/// ```
/// use pooling_engine::core::currency::{CurrencyCode, FxRateTable};
/// use rust_decimal_macros::dec;
///
/// let mut rates = FxRateTable::new(CurrencyCode::new("USD"));
/// rates.set_rate(
///     CurrencyCode::new("MYR"),
///     CurrencyCode::new("USD"),
///     dec!(0.21),
/// ).unwrap();
///
/// let converted = rates.convert(
///     dec!(1_000_000),
///     &CurrencyCode::new("MYR"),
///     &CurrencyCode::new("USD"),
/// );
/// assert_eq!(converted, dec!(210_000));
///
/// // Unknown pair: identity fallback, never an error
/// let unchanged = rates.convert(
///     dec!(500),
///     &CurrencyCode::new("XYZ"),
///     &CurrencyCode::new("USD"),
/// );
/// assert_eq!(unchanged, dec!(500));
/// ```
#[derive(Debug, Clone)]
pub struct FxRateTable {
    /// The target currency balances are normalized into (typically USD).
    pub base_currency: CurrencyCode,
    /// Direct rates: (from, to) -> rate.
    rates: HashMap<(CurrencyCode, CurrencyCode), Decimal>,
}

impl FxRateTable {
    /// Create a new FX rate table with the given base currency.
    pub fn new(base_currency: CurrencyCode) -> Self {
        Self {
            base_currency,
            rates: HashMap::new(),
        }
    }

    /// Set a direct exchange rate: 1 unit of `from` = `rate` units of `to`.
    pub fn set_rate(
        &mut self,
        from: CurrencyCode,
        to: CurrencyCode,
        rate: Decimal,
    ) -> Result<(), FxError> {
        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate { from, to, rate });
        }
        // Store direct rate
        self.rates.insert((from.clone(), to.clone()), rate);
        // Store inverse
        self.rates.insert((to, from), Decimal::ONE / rate);
        Ok(())
    }

    /// Look up the rate for a pair, falling back to the identity rate
    /// when no direct rate is known.
    pub fn rate_or_identity(&self, from: &CurrencyCode, to: &CurrencyCode) -> Decimal {
        if from == to {
            return Decimal::ONE;
        }
        match self.rates.get(&(from.clone(), to.clone())) {
            Some(rate) => *rate,
            None => {
                log::debug!("no FX rate for {from} -> {to}, using identity");
                Decimal::ONE
            }
        }
    }

    /// Whether a direct rate exists for the pair.
    pub fn has_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> bool {
        from == to || self.rates.contains_key(&(from.clone(), to.clone()))
    }

    /// Convert an amount from one currency to another.
    pub fn convert(&self, amount: Decimal, from: &CurrencyCode, to: &CurrencyCode) -> Decimal {
        amount * self.rate_or_identity(from, to)
    }
}
