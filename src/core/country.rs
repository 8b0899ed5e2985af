use crate::core::currency::CurrencyCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for an operating country in the pooling network.
///
/// Country names are resolved against the convertibility reference table;
/// a code that is not present there still participates in generic currency
/// aggregation but is excluded from pooling.
///
/// # Examples
///
/// ```
/// use pooling_engine::core::country::CountryCode;
///
/// let china = CountryCode::new("China");
/// let singapore = CountryCode::new("Singapore");
/// assert_ne!(china, singapore);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CountryCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Country-level currency convertibility classification.
///
/// Governs whether and how a country's cash balances can be upstreamed
/// to the regional treasury centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConvertibilityCategory {
    /// Capital controls block pooling entirely; funds stay onshore.
    Restricted,
    /// Pooling allowed subject to FX conversion into the target currency.
    PartiallyConvertible,
    /// Funds can be upstreamed directly, no conversion required.
    FreelyConvertible,
}

impl ConvertibilityCategory {
    pub const ALL: [ConvertibilityCategory; 3] = [
        ConvertibilityCategory::Restricted,
        ConvertibilityCategory::PartiallyConvertible,
        ConvertibilityCategory::FreelyConvertible,
    ];

    /// The standard pooling policy for this category.
    pub fn default_rule(&self) -> PoolingRule {
        match self {
            ConvertibilityCategory::Restricted => PoolingRule {
                can_pool: false,
                requires_conversion: false,
                target_currency: None,
            },
            ConvertibilityCategory::PartiallyConvertible => PoolingRule {
                can_pool: true,
                requires_conversion: true,
                target_currency: Some(CurrencyCode::new("USD")),
            },
            ConvertibilityCategory::FreelyConvertible => PoolingRule {
                can_pool: true,
                requires_conversion: false,
                target_currency: None,
            },
        }
    }
}

impl fmt::Display for ConvertibilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConvertibilityCategory::Restricted => "Restricted",
            ConvertibilityCategory::PartiallyConvertible => "Partially Convertible",
            ConvertibilityCategory::FreelyConvertible => "Freely Convertible",
        };
        write!(f, "{}", s)
    }
}

/// Per-category pooling policy: can the balance be pooled at all,
/// and does it require FX conversion into a target currency first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolingRule {
    pub can_pool: bool,
    pub requires_conversion: bool,
    /// Conversion target when `requires_conversion` is set. Defaults to USD.
    pub target_currency: Option<CurrencyCode>,
}

impl PoolingRule {
    /// The conversion target, defaulting to USD when unset.
    pub fn target_or_usd(&self) -> CurrencyCode {
        self.target_currency
            .clone()
            .unwrap_or_else(|| CurrencyCode::new("USD"))
    }
}

/// A country's entry in the convertibility reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryProfile {
    pub category: ConvertibilityCategory,
    /// Explanatory note, e.g. the regulatory regime behind the classification.
    pub note: String,
}

impl CountryProfile {
    pub fn new(category: ConvertibilityCategory, note: impl Into<String>) -> Self {
        Self {
            category,
            note: note.into(),
        }
    }
}
