//! Sequential scan lookup
//!
//! Walks the ordered record sequence and compares ids one by one. O(n) per
//! query; it exists as the baseline the indexed lookup is measured against.

use crate::core::{Lookup, RecordStore};
use crate::types::{RecordId, TransactionRecord};

/// Linear search over the record sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialScan;

impl Lookup for SequentialScan {
    fn name(&self) -> &'static str {
        "Linear Search"
    }

    fn find<'s>(&self, store: &'s RecordStore, id: RecordId) -> Option<&'s TransactionRecord> {
        store.iter().find(|record| record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecordPayload, TransactionKind};

    fn store_with(count: usize) -> RecordStore {
        let mut store = RecordStore::new();
        for _ in 0..count {
            store
                .insert(RecordPayload {
                    kind: Some(TransactionKind::Payment),
                    ..RecordPayload::default()
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn test_scan_finds_each_record() {
        let store = store_with(5);
        for id in 1..=5 {
            assert_eq!(SequentialScan.find(&store, id).map(|r| r.id), Some(id));
        }
    }

    #[test]
    fn test_scan_misses_absent_id() {
        let store = store_with(2);
        assert!(SequentialScan.find(&store, 3).is_none());
        assert!(SequentialScan.find(&RecordStore::new(), 1).is_none());
    }

    #[test]
    fn test_scan_skips_deleted_record() {
        let mut store = store_with(3);
        store.delete(2).unwrap();
        assert!(SequentialScan.find(&store, 2).is_none());
        assert_eq!(SequentialScan.find(&store, 3).map(|r| r.id), Some(3));
    }
}
