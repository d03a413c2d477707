//! Indexed lookup
//!
//! Resolves an id with a single hash-index access on the store. O(1) expected.

use crate::core::{Lookup, RecordStore};
use crate::types::{RecordId, TransactionRecord};

/// Hash-index lookup on the record store
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedLookup;

impl Lookup for IndexedLookup {
    fn name(&self) -> &'static str {
        "Dictionary Lookup"
    }

    fn find<'s>(&self, store: &'s RecordStore, id: RecordId) -> Option<&'s TransactionRecord> {
        store.get(id)
    }
}
