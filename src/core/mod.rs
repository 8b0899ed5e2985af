//! Foundational types: currencies, countries, client entries, reference data.

pub mod country;
pub mod currency;
pub mod entry;
pub mod reference;
