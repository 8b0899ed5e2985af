//! Named-snapshot store for form-state persistence.
//!
//! The store holds complete serialized entry snapshots: a mapping from a
//! user-chosen name to the saved entries plus a timestamp, and one
//! unnamed current-form-state slot for session continuity. Writes are
//! last-write-wins on a name, and every save or load moves a whole
//! snapshot at once — a reader observes either the previous complete
//! state or the new one, never a half-written mix.

use crate::core::entry::{ClientEntryInput, EntrySet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from snapshot (de)serialization.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One saved snapshot: the raw entry data and when it was saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSnapshot {
    pub data: Vec<ClientEntryInput>,
    pub saved_at: DateTime<Utc>,
}

impl SavedSnapshot {
    fn capture(entries: &EntrySet) -> Self {
        Self {
            data: entries
                .entries()
                .iter()
                .map(ClientEntryInput::from_entry)
                .collect(),
            saved_at: Utc::now(),
        }
    }

    /// Rebuild the typed entry set from the raw saved shape.
    pub fn to_entries(&self) -> EntrySet {
        self.data
            .iter()
            .cloned()
            .map(ClientEntryInput::into_entry)
            .collect()
    }
}

/// In-memory store of named snapshots plus the unnamed current form state.
///
/// # Examples
///
/// ```
/// use pooling_engine::core::country::CountryCode;
/// use pooling_engine::core::currency::CurrencyCode;
/// use pooling_engine::core::entry::{ClientEntry, CurrencyPosition, EntrySet};
/// use pooling_engine::snapshot::SnapshotStore;
/// use rust_decimal_macros::dec;
///
/// let mut entries = EntrySet::new();
/// entries.add(ClientEntry::new(
///     "Acme",
///     CountryCode::new("China"),
///     vec![CurrencyPosition::new(
///         CurrencyCode::new("CNY"),
///         dec!(1000), dec!(1.0), dec!(0), dec!(0),
///     )],
/// ));
///
/// let mut store = SnapshotStore::new();
/// store.save("q3-review", &entries);
/// let restored = store.load("q3-review").unwrap();
/// assert_eq!(restored.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotStore {
    /// Named snapshots, ordered by name for stable listing.
    snapshots: BTreeMap<String, SavedSnapshot>,
    /// The unnamed current-form-state slot.
    current: Option<SavedSnapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a complete snapshot under a name. Last write wins.
    pub fn save(&mut self, name: impl Into<String>, entries: &EntrySet) {
        self.snapshots
            .insert(name.into(), SavedSnapshot::capture(entries));
    }

    /// Load a named snapshot back into a typed entry set.
    pub fn load(&self, name: &str) -> Option<EntrySet> {
        self.snapshots.get(name).map(SavedSnapshot::to_entries)
    }

    /// Remove a named snapshot, returning whether it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.snapshots.remove(name).is_some()
    }

    /// Overwrite the unnamed current-form-state slot.
    pub fn save_current(&mut self, entries: &EntrySet) {
        self.current = Some(SavedSnapshot::capture(entries));
    }

    /// Restore the current-form-state slot, if any.
    pub fn load_current(&self) -> Option<EntrySet> {
        self.current.as_ref().map(SavedSnapshot::to_entries)
    }

    /// Names and timestamps of all saved snapshots, in name order.
    pub fn list(&self) -> Vec<(&str, DateTime<Utc>)> {
        self.snapshots
            .iter()
            .map(|(name, snap)| (name.as_str(), snap.saved_at))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Serialize the whole store to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuild a store from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
