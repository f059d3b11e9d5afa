//! In-memory ledger for testing.

use std::collections::BTreeMap;
use std::ops::Bound;

use parking_lot::RwLock;

use crate::{Ledger, Result};

/// In-memory ledger for testing and embedding.
///
/// All data is held in an ordered map and lost when the ledger is dropped.
/// Range scans come back in ascending key order, matching the facade
/// contract. Every operation succeeds; there is no failure injection.
pub struct MemoryLedger {
    /// Stored entries, ordered by key.
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes one entry, returning its previous value (for testing).
    ///
    /// The contract itself never deletes records; this exists so tests can
    /// manufacture corruption such as a dangling reference.
    pub fn delete(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.write().remove(key)
    }

    /// Clears all entries (for testing).
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for MemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let entries = self.entries.read();
        let range = (
            Bound::Included(start.to_string()),
            Bound::Excluded(end.to_string()),
        );
        Ok(entries
            .range(range)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn get_absent_key_is_none() {
        let ledger = MemoryLedger::new();
        assert_eq!(ledger.get("missing").unwrap(), None);
    }

    #[test]
    fn put_then_get() {
        let mut ledger = MemoryLedger::new();
        ledger.put("COM_C1", b"value".to_vec()).unwrap();
        assert_eq!(ledger.get("COM_C1").unwrap(), Some(b"value".to_vec()));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn put_replaces_existing_value() {
        let mut ledger = MemoryLedger::new();
        ledger.put("k", b"old".to_vec()).unwrap();
        ledger.put("k", b"new".to_vec()).unwrap();
        assert_eq!(ledger.get("k").unwrap(), Some(b"new".to_vec()));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn range_scan_is_half_open_and_ordered() {
        let mut ledger = MemoryLedger::new();
        for key in ["PRO_b", "PRO_a", "TRA_a", "COM_z"] {
            ledger.put(key, key.as_bytes().to_vec()).unwrap();
        }

        let hits = ledger.range_scan("PRO_", "PRO`").unwrap();
        let keys: Vec<&str> = hits.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["PRO_a", "PRO_b"]);
    }

    #[test]
    fn range_scan_excludes_end_key() {
        let mut ledger = MemoryLedger::new();
        ledger.put("a", vec![1]).unwrap();
        ledger.put("b", vec![2]).unwrap();
        let hits = ledger.range_scan("a", "b").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "a");
    }

    #[test]
    fn delete_removes_entry() {
        let mut ledger = MemoryLedger::new();
        ledger.put("k", vec![1]).unwrap();
        assert!(ledger.delete("k").is_some());
        assert_eq!(ledger.get("k").unwrap(), None);
        assert!(ledger.delete("k").is_none());
    }
}
