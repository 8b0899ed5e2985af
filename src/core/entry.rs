use crate::core::country::CountryCode;
use crate::core::currency::CurrencyCode;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenor of a borrowing position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorrowingTenor {
    #[default]
    ShortTerm,
    LongTerm,
}

/// Leniently parse a monetary amount or rate from raw form input.
///
/// This is a deliberate leniency contract, not an accident: the engine is
/// fed by an interactive form where partial or malformed input is the
/// common case, and a single bad field must never abort a recomputation
/// pass. Parse failures and negative values both degrade to zero.
///
/// # Examples
///
/// ```
/// use pooling_engine::core::entry::parse_non_negative;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_non_negative("2000000"), dec!(2000000));
/// assert_eq!(parse_non_negative("1,500,000"), dec!(1500000));
/// assert_eq!(parse_non_negative("abc"), dec!(0));
/// assert_eq!(parse_non_negative("-50"), dec!(0));
/// assert_eq!(parse_non_negative(""), dec!(0));
/// ```
pub fn parse_non_negative(input: &str) -> Decimal {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    match cleaned.parse::<Decimal>() {
        Ok(value) if value >= Decimal::ZERO => value,
        Ok(_) | Err(_) => {
            if !cleaned.is_empty() {
                log::debug!("lenient parse: '{input}' -> 0");
            }
            Decimal::ZERO
        }
    }
}

/// Leniently parse an annualized percentage rate, clamped to [0, 100].
pub fn parse_rate(input: &str) -> Decimal {
    parse_non_negative(input).min(Decimal::ONE_HUNDRED)
}

/// One currency balance held under one client/country.
///
/// Amounts are non-negative and rates are percentages in [0, 100];
/// both are enforced by the lenient boundary parser. Positions are
/// read-only inputs to the engine — aggregation never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyPosition {
    pub currency: CurrencyCode,
    pub cash_amount: Decimal,
    /// Annualized cash interest rate, percent.
    pub cash_interest_rate: Decimal,
    pub borrowing_amount: Decimal,
    /// Annualized borrowing interest rate, percent.
    pub borrowing_interest_rate: Decimal,
    pub tenor: BorrowingTenor,
}

impl CurrencyPosition {
    /// Create a position, clamping negative amounts/rates to zero.
    pub fn new(
        currency: CurrencyCode,
        cash_amount: Decimal,
        cash_interest_rate: Decimal,
        borrowing_amount: Decimal,
        borrowing_interest_rate: Decimal,
    ) -> Self {
        Self {
            currency,
            cash_amount: cash_amount.max(Decimal::ZERO),
            cash_interest_rate: cash_interest_rate.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
            borrowing_amount: borrowing_amount.max(Decimal::ZERO),
            borrowing_interest_rate: borrowing_interest_rate
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
            tenor: BorrowingTenor::default(),
        }
    }

    pub fn with_tenor(mut self, tenor: BorrowingTenor) -> Self {
        self.tenor = tenor;
        self
    }

    /// Cash minus borrowing for this position.
    pub fn net_position(&self) -> Decimal {
        self.cash_amount - self.borrowing_amount
    }
}

/// One client operating in one country, holding one or more currency positions.
///
/// # Examples
///
/// ```
/// use pooling_engine::core::country::CountryCode;
/// use pooling_engine::core::currency::CurrencyCode;
/// use pooling_engine::core::entry::{ClientEntry, CurrencyPosition};
/// use rust_decimal_macros::dec;
///
/// let entry = ClientEntry::new(
///     "Acme Manufacturing",
///     CountryCode::new("China"),
///     vec![CurrencyPosition::new(
///         CurrencyCode::new("CNY"),
///         dec!(2_000_000),
///         dec!(1.5),
///         dec!(1_000_000),
///         dec!(2.5),
///     )],
/// );
/// assert!(entry.is_complete());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientEntry {
    /// Unique identifier for this entry.
    id: Uuid,
    client_name: String,
    operating_country: CountryCode,
    currencies: Vec<CurrencyPosition>,
    created_at: DateTime<Utc>,
}

impl ClientEntry {
    pub fn new(
        client_name: impl Into<String>,
        operating_country: CountryCode,
        currencies: Vec<CurrencyPosition>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name: client_name.into(),
            operating_country,
            currencies,
            created_at: Utc::now(),
        }
    }

    /// Create an entry with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        client_name: impl Into<String>,
        operating_country: CountryCode,
        currencies: Vec<CurrencyPosition>,
    ) -> Self {
        Self {
            id,
            client_name: client_name.into(),
            operating_country,
            currencies,
            created_at: Utc::now(),
        }
    }

    /// An entry participates in aggregation and pooling only when it has
    /// a client name, an operating country, and at least one position.
    /// Incomplete entries are skipped silently, not rejected.
    pub fn is_complete(&self) -> bool {
        !self.client_name.is_empty()
            && !self.operating_country.is_empty()
            && !self.currencies.is_empty()
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn operating_country(&self) -> &CountryCode {
        &self.operating_country
    }

    pub fn currencies(&self) -> &[CurrencyPosition] {
        &self.currencies
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Total cash across this entry's positions.
    pub fn total_cash(&self) -> Decimal {
        self.currencies.iter().map(|p| p.cash_amount).sum()
    }

    /// Total borrowing across this entry's positions.
    pub fn total_borrowing(&self) -> Decimal {
        self.currencies.iter().map(|p| p.borrowing_amount).sum()
    }
}

/// The collection of client entries submitted to one computation pass.
///
/// The engine treats the set as an immutable snapshot for the duration
/// of a pass; all derived state is recomputed wholesale from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntrySet {
    entries: Vec<ClientEntry>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: ClientEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ClientEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total gross cash across all entries (including incomplete ones).
    pub fn gross_cash(&self) -> Decimal {
        self.entries.iter().map(|e| e.total_cash()).sum()
    }

    /// Total gross borrowing across all entries.
    pub fn gross_borrowing(&self) -> Decimal {
        self.entries.iter().map(|e| e.total_borrowing()).sum()
    }

    /// All unique currencies referenced in this set.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        let mut currencies: Vec<CurrencyCode> = self
            .entries
            .iter()
            .flat_map(|e| e.currencies().iter().map(|p| p.currency.clone()))
            .collect();
        currencies.sort();
        currencies.dedup();
        currencies
    }

    /// All unique operating countries referenced in this set.
    pub fn countries(&self) -> Vec<CountryCode> {
        let mut countries: Vec<CountryCode> = self
            .entries
            .iter()
            .map(|e| e.operating_country().clone())
            .collect();
        countries.sort();
        countries.dedup();
        countries
    }
}

impl FromIterator<ClientEntry> for EntrySet {
    fn from_iter<T: IntoIterator<Item = ClientEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Raw form/JSON shape of a currency position, with numeric fields as
/// strings so malformed input survives deserialization and degrades
/// through the lenient parser instead of failing the whole load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrencyPositionInput {
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub cash_amount: String,
    #[serde(default)]
    pub cash_interest_rate: String,
    #[serde(default)]
    pub borrowing_amount: String,
    #[serde(default)]
    pub borrowing_interest_rate: String,
    #[serde(default)]
    pub tenor: String,
}

impl CurrencyPositionInput {
    /// Convert raw input into a typed position via the lenient parser.
    pub fn into_position(self) -> CurrencyPosition {
        let tenor = match self.tenor.trim().to_ascii_lowercase().as_str() {
            "long" | "longterm" | "long_term" | "long-term" => BorrowingTenor::LongTerm,
            _ => BorrowingTenor::ShortTerm,
        };
        CurrencyPosition::new(
            CurrencyCode::new(self.currency.trim()),
            parse_non_negative(&self.cash_amount),
            parse_rate(&self.cash_interest_rate),
            parse_non_negative(&self.borrowing_amount),
            parse_rate(&self.borrowing_interest_rate),
        )
        .with_tenor(tenor)
    }
}

/// Raw form/JSON shape of a client entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientEntryInput {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub operating_country: String,
    #[serde(default)]
    pub currencies: Vec<CurrencyPositionInput>,
}

impl ClientEntryInput {
    pub fn into_entry(self) -> ClientEntry {
        ClientEntry::new(
            self.client_name.trim(),
            CountryCode::new(self.operating_country.trim()),
            self.currencies
                .into_iter()
                .map(CurrencyPositionInput::into_position)
                .collect(),
        )
    }

    /// Snapshot the typed entry back into its raw serialized shape.
    pub fn from_entry(entry: &ClientEntry) -> Self {
        Self {
            client_name: entry.client_name().to_string(),
            operating_country: entry.operating_country().to_string(),
            currencies: entry
                .currencies()
                .iter()
                .map(|p| CurrencyPositionInput {
                    currency: p.currency.to_string(),
                    cash_amount: p.cash_amount.to_string(),
                    cash_interest_rate: p.cash_interest_rate.to_string(),
                    borrowing_amount: p.borrowing_amount.to_string(),
                    borrowing_interest_rate: p.borrowing_interest_rate.to_string(),
                    tenor: match p.tenor {
                        BorrowingTenor::ShortTerm => "short".to_string(),
                        BorrowingTenor::LongTerm => "long".to_string(),
                    },
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_position() -> CurrencyPosition {
        CurrencyPosition::new(
            CurrencyCode::new("CNY"),
            dec!(2_000_000),
            dec!(1.5),
            dec!(1_000_000),
            dec!(2.5),
        )
    }

    #[test]
    fn test_parse_non_negative_plain() {
        assert_eq!(parse_non_negative("12345.67"), dec!(12345.67));
    }

    #[test]
    fn test_parse_non_negative_garbage_is_zero() {
        assert_eq!(parse_non_negative("not a number"), Decimal::ZERO);
        assert_eq!(parse_non_negative(""), Decimal::ZERO);
        assert_eq!(parse_non_negative("  "), Decimal::ZERO);
    }

    #[test]
    fn test_parse_non_negative_negative_is_zero() {
        assert_eq!(parse_non_negative("-1000"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_non_negative_thousands_separators() {
        assert_eq!(parse_non_negative("2,000,000"), dec!(2_000_000));
    }

    #[test]
    fn test_parse_rate_clamped() {
        assert_eq!(parse_rate("250"), dec!(100));
        assert_eq!(parse_rate("2.5"), dec!(2.5));
    }

    #[test]
    fn test_position_net() {
        let pos = sample_position();
        assert_eq!(pos.net_position(), dec!(1_000_000));
    }

    #[test]
    fn test_position_clamps_negative() {
        let pos = CurrencyPosition::new(
            CurrencyCode::new("USD"),
            dec!(-100),
            dec!(150),
            dec!(-50),
            dec!(-1),
        );
        assert_eq!(pos.cash_amount, Decimal::ZERO);
        assert_eq!(pos.cash_interest_rate, dec!(100));
        assert_eq!(pos.borrowing_amount, Decimal::ZERO);
        assert_eq!(pos.borrowing_interest_rate, Decimal::ZERO);
    }

    #[test]
    fn test_entry_completeness() {
        let complete = ClientEntry::new(
            "Acme",
            CountryCode::new("China"),
            vec![sample_position()],
        );
        assert!(complete.is_complete());

        let no_name = ClientEntry::new("", CountryCode::new("China"), vec![sample_position()]);
        assert!(!no_name.is_complete());

        let no_country = ClientEntry::new("Acme", CountryCode::new(""), vec![sample_position()]);
        assert!(!no_country.is_complete());

        let no_positions = ClientEntry::new("Acme", CountryCode::new("China"), vec![]);
        assert!(!no_positions.is_complete());
    }

    #[test]
    fn test_entry_set_totals() {
        let mut set = EntrySet::new();
        set.add(ClientEntry::new(
            "Acme",
            CountryCode::new("China"),
            vec![sample_position()],
        ));
        set.add(ClientEntry::new(
            "Globex",
            CountryCode::new("Singapore"),
            vec![CurrencyPosition::new(
                CurrencyCode::new("USD"),
                dec!(500_000),
                dec!(2.0),
                Decimal::ZERO,
                Decimal::ZERO,
            )],
        ));

        assert_eq!(set.len(), 2);
        assert_eq!(set.gross_cash(), dec!(2_500_000));
        assert_eq!(set.gross_borrowing(), dec!(1_000_000));
        assert_eq!(set.currencies().len(), 2);
        assert_eq!(set.countries().len(), 2);
    }

    #[test]
    fn test_input_conversion_lenient() {
        let input = ClientEntryInput {
            client_name: "  Acme ".to_string(),
            operating_country: "China".to_string(),
            currencies: vec![CurrencyPositionInput {
                currency: "CNY".to_string(),
                cash_amount: "2,000,000".to_string(),
                cash_interest_rate: "1.5".to_string(),
                borrowing_amount: "oops".to_string(),
                borrowing_interest_rate: "".to_string(),
                tenor: "long".to_string(),
            }],
        };

        let entry = input.into_entry();
        assert_eq!(entry.client_name(), "Acme");
        let pos = &entry.currencies()[0];
        assert_eq!(pos.cash_amount, dec!(2_000_000));
        assert_eq!(pos.borrowing_amount, Decimal::ZERO);
        assert_eq!(pos.tenor, BorrowingTenor::LongTerm);
    }

    #[test]
    fn test_input_round_trip() {
        let entry = ClientEntry::new(
            "Acme",
            CountryCode::new("China"),
            vec![sample_position().with_tenor(BorrowingTenor::LongTerm)],
        );
        let raw = ClientEntryInput::from_entry(&entry);
        let back = raw.into_entry();
        assert_eq!(back.client_name(), entry.client_name());
        assert_eq!(back.operating_country(), entry.operating_country());
        assert_eq!(back.currencies(), entry.currencies());
    }
}
