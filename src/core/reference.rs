use crate::core::country::{ConvertibilityCategory, CountryCode, CountryProfile, PoolingRule};
use crate::core::currency::{CurrencyCode, FxRateTable};
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Static reference tables consumed by the aggregation and pooling passes.
///
/// Loaded once at startup and never mutated: country convertibility
/// profiles, per-category pooling rules, the FX rate table, and suggested
/// currencies per country. The engine treats this as immutable
/// configuration for the lifetime of a computation pass.
///
/// # Examples
///
/// ```
/// use pooling_engine::core::country::{ConvertibilityCategory, CountryCode};
/// use pooling_engine::core::reference::ReferenceData;
///
/// let reference = ReferenceData::standard();
/// let profile = reference.country_profile(&CountryCode::new("China")).unwrap();
/// assert_eq!(profile.category, ConvertibilityCategory::Restricted);
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceData {
    countries: HashMap<CountryCode, CountryProfile>,
    rules: HashMap<ConvertibilityCategory, PoolingRule>,
    fx_rates: FxRateTable,
    suggested_currencies: HashMap<CountryCode, Vec<CurrencyCode>>,
}

impl ReferenceData {
    /// Build an empty reference set with default per-category rules.
    pub fn new(fx_rates: FxRateTable) -> Self {
        let rules = ConvertibilityCategory::ALL
            .iter()
            .map(|c| (*c, c.default_rule()))
            .collect();
        Self {
            countries: HashMap::new(),
            rules,
            fx_rates,
            suggested_currencies: HashMap::new(),
        }
    }

    /// Register a country's convertibility profile and suggested currencies.
    pub fn add_country(
        &mut self,
        country: CountryCode,
        profile: CountryProfile,
        suggested: Vec<CurrencyCode>,
    ) {
        self.suggested_currencies.insert(country.clone(), suggested);
        self.countries.insert(country, profile);
    }

    /// Override the pooling rule for a category.
    pub fn set_rule(&mut self, category: ConvertibilityCategory, rule: PoolingRule) {
        self.rules.insert(category, rule);
    }

    /// Look up a country's profile. `None` means the country is unknown:
    /// it still participates in currency aggregation but is excluded from
    /// convertibility totals and the pooling graph.
    pub fn country_profile(&self, country: &CountryCode) -> Option<&CountryProfile> {
        self.countries.get(country)
    }

    /// Convenience: a known country's convertibility category.
    pub fn category_of(&self, country: &CountryCode) -> Option<ConvertibilityCategory> {
        self.countries.get(country).map(|p| p.category)
    }

    /// The pooling rule for a category. Every category always has a rule;
    /// the default table is seeded at construction.
    pub fn pooling_rule(&self, category: ConvertibilityCategory) -> &PoolingRule {
        &self.rules[&category]
    }

    pub fn fx_rates(&self) -> &FxRateTable {
        &self.fx_rates
    }

    /// Suggested currencies for a country (empty slice when unknown).
    pub fn suggested_currencies(&self, country: &CountryCode) -> &[CurrencyCode] {
        self.suggested_currencies
            .get(country)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All known countries.
    pub fn countries(&self) -> impl Iterator<Item = (&CountryCode, &CountryProfile)> {
        self.countries.iter()
    }

    /// The standard APAC-centric reference set: representative country
    /// classifications and USD-quoted FX rates.
    pub fn standard() -> Self {
        let mut fx = FxRateTable::new(CurrencyCode::new("USD"));
        let usd_rates = [
            ("CNY", dec!(0.14)),
            ("INR", dec!(0.012)),
            ("MYR", dec!(0.21)),
            ("IDR", dec!(0.000065)),
            ("VND", dec!(0.000041)),
            ("THB", dec!(0.028)),
            ("PHP", dec!(0.018)),
            ("KRW", dec!(0.00075)),
            ("TWD", dec!(0.031)),
            ("SGD", dec!(0.74)),
            ("HKD", dec!(0.128)),
            ("JPY", dec!(0.0067)),
            ("AUD", dec!(0.65)),
            ("GBP", dec!(1.27)),
            ("EUR", dec!(1.08)),
        ];
        for (code, rate) in usd_rates {
            fx.set_rate(CurrencyCode::new(code), CurrencyCode::new("USD"), rate)
                .expect("standard FX rates are positive");
        }

        let mut reference = Self::new(fx);

        use ConvertibilityCategory::*;
        let countries: [(&str, ConvertibilityCategory, &str, &[&str]); 16] = [
            (
                "China",
                Restricted,
                "SAFE capital controls; CNY cannot be freely remitted offshore",
                &["CNY"],
            ),
            (
                "India",
                PartiallyConvertible,
                "FEMA approval required for capital account remittance",
                &["INR"],
            ),
            (
                "Malaysia",
                PartiallyConvertible,
                "BNM registration required; MYR convertible with documentation",
                &["MYR"],
            ),
            (
                "Indonesia",
                PartiallyConvertible,
                "Bank Indonesia reporting thresholds on IDR outflows",
                &["IDR"],
            ),
            (
                "Vietnam",
                PartiallyConvertible,
                "SBV approval required for VND capital account remittance",
                &["VND"],
            ),
            (
                "Thailand",
                PartiallyConvertible,
                "BOT measures on THB non-resident accounts",
                &["THB"],
            ),
            (
                "Philippines",
                PartiallyConvertible,
                "BSP registration for capital repatriation",
                &["PHP"],
            ),
            (
                "South Korea",
                PartiallyConvertible,
                "FX transaction reporting under FETA",
                &["KRW"],
            ),
            (
                "Taiwan",
                PartiallyConvertible,
                "CBC annual conversion quotas apply",
                &["TWD"],
            ),
            (
                "Singapore",
                FreelyConvertible,
                "No capital controls; regional treasury hub",
                &["SGD", "USD"],
            ),
            (
                "Hong Kong",
                FreelyConvertible,
                "No capital controls; linked exchange rate system",
                &["HKD", "USD"],
            ),
            (
                "Japan",
                FreelyConvertible,
                "Fully liberalized capital account",
                &["JPY"],
            ),
            (
                "Australia",
                FreelyConvertible,
                "Fully liberalized capital account",
                &["AUD"],
            ),
            (
                "United States",
                FreelyConvertible,
                "No capital controls",
                &["USD"],
            ),
            (
                "United Kingdom",
                FreelyConvertible,
                "No capital controls",
                &["GBP", "USD"],
            ),
            (
                "Germany",
                FreelyConvertible,
                "No capital controls; eurozone member",
                &["EUR"],
            ),
        ];

        for (name, category, note, suggested) in countries {
            reference.add_country(
                CountryCode::new(name),
                CountryProfile::new(category, note),
                suggested.iter().map(|c| CurrencyCode::new(*c)).collect(),
            );
        }

        reference
    }
}
