//! In-memory record store with ordered and id-keyed views
//!
//! This module provides the RecordStore component that owns every parsed
//! transaction record. It serves two views over the same data:
//!
//! - the ordered sequence (load order, then append order) for bulk listing
//! - the identifier index for point lookup
//!
//! # Consistency
//!
//! Both views are backed by a single `IndexMap`, so there is only one copy of
//! each record. Insert, update and delete touch that one entry, which keeps
//! sequence membership, index membership and field values identical after
//! every operation.
//!
//! # Id Assignment
//!
//! Ids are never renumbered. New records take `max(existing) + 1`, or `1` in
//! an empty store; deleting a record leaves a permanent gap.
//!
//! # Concurrency
//!
//! The store is a plain owned value with `&mut self` mutations. Callers that
//! share it across threads must serialize access themselves (the HTTP layer
//! wraps it in a mutex).

use crate::types::{
    LedgerError, RecordId, RecordPayload, TransactionKind, TransactionRecord, DEFAULT_QUANTITY,
    UNKNOWN_PARTY,
};
use indexmap::IndexMap;
use tracing::debug;

/// Fields an insert payload must carry
///
/// Only `type` is required: every other field has a default, and the body
/// default is derived from the type.
pub const REQUIRED_INSERT_FIELDS: [&str; 1] = ["type"];

/// Owned collection of transaction records
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// Records keyed by id, iterated in insertion order
    records: IndexMap<RecordId, TransactionRecord>,
}

impl RecordStore {
    /// Create a new empty record store
    pub fn new() -> Self {
        RecordStore {
            records: IndexMap::new(),
        }
    }

    /// Build the store and its index in one pass over loaded records
    ///
    /// If two records share an id, the first occurrence is kept.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = TransactionRecord>,
    {
        let mut store = RecordStore::new();
        for record in records {
            store.records.entry(record.id).or_insert(record);
        }
        debug!(count = store.len(), "record index built");
        store
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in sequence order
    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> + '_ {
        self.records.values()
    }

    /// All records in sequence order
    pub fn all(&self) -> Vec<TransactionRecord> {
        self.records.values().cloned().collect()
    }

    /// Index lookup by id
    ///
    /// # Returns
    ///
    /// * `Some(&TransactionRecord)` - If the record exists
    /// * `None` - If the id is not in the store
    pub fn get(&self, id: RecordId) -> Option<&TransactionRecord> {
        self.records.get(&id)
    }

    /// Whether a record with this id exists
    pub fn contains(&self, id: RecordId) -> bool {
        self.records.contains_key(&id)
    }

    /// Id the next inserted record will receive
    pub fn next_id(&self) -> RecordId {
        self.records.keys().max().map_or(1, |max| max + 1)
    }

    /// Insert a new record built from a partial payload
    ///
    /// The id is always computed by the store; a payload `id` is ignored.
    /// Omitted fields take the extraction defaults, and an omitted body
    /// becomes `"<type> transaction"`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` listing the required fields the payload lacks.
    pub fn insert(&mut self, payload: RecordPayload) -> Result<TransactionRecord, LedgerError> {
        let RecordPayload {
            id: _,
            date,
            timestamp,
            body,
            kind,
            amount,
            sender,
            receiver,
            balance,
            fee,
            txid,
        } = payload;

        let kind: TransactionKind =
            kind.ok_or_else(|| LedgerError::validation(&REQUIRED_INSERT_FIELDS))?;

        let id = self.next_id();
        let record = TransactionRecord {
            id,
            date: date.unwrap_or_default(),
            timestamp: timestamp.unwrap_or_default(),
            body: body.unwrap_or_else(|| format!("{} transaction", kind)),
            kind,
            amount: amount.unwrap_or_else(|| DEFAULT_QUANTITY.to_string()),
            sender: sender.unwrap_or_else(|| UNKNOWN_PARTY.to_string()),
            receiver: receiver.unwrap_or_else(|| UNKNOWN_PARTY.to_string()),
            balance: balance.unwrap_or_else(|| DEFAULT_QUANTITY.to_string()),
            fee: fee.unwrap_or_else(|| DEFAULT_QUANTITY.to_string()),
            txid: txid.unwrap_or_default(),
        };

        self.records.insert(id, record.clone());
        debug!(id, kind = %record.kind, "record inserted");
        Ok(record)
    }

    /// Merge a partial payload into an existing record
    ///
    /// Supplied fields overwrite, others keep their prior values. The record
    /// keeps its id whatever the payload says.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record has this id.
    pub fn update(
        &mut self,
        id: RecordId,
        payload: RecordPayload,
    ) -> Result<TransactionRecord, LedgerError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or_else(|| LedgerError::record_not_found(id, "update"))?;

        if payload.id.is_some_and(|requested| requested != id) {
            debug!(id, requested = ?payload.id, "ignoring id in update payload");
        }

        record.apply(payload);
        debug!(id, "record updated");
        Ok(record.clone())
    }

    /// Remove a record from the sequence and the index
    ///
    /// Remaining records keep their ids and relative order.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record has this id.
    pub fn delete(&mut self, id: RecordId) -> Result<TransactionRecord, LedgerError> {
        let removed = self
            .records
            .shift_remove(&id)
            .ok_or_else(|| LedgerError::record_not_found(id, "delete"))?;
        debug!(id, "record deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record_builder::{build_records, RawMessage};

    fn loaded_store(count: usize) -> RecordStore {
        let messages = (0..count).map(|i| RawMessage {
            readable_date: format!("day {}", i),
            date: format!("{}", 1_700_000_000_000u64 + i as u64),
            body: format!("You have received {} RWF from Peer Number (250{})", i * 100, i),
        });
        RecordStore::from_records(build_records(messages))
    }

    fn ids(store: &RecordStore) -> Vec<RecordId> {
        store.iter().map(|r| r.id).collect()
    }

    fn payload_of_kind(kind: TransactionKind) -> RecordPayload {
        RecordPayload {
            kind: Some(kind),
            ..RecordPayload::default()
        }
    }

    #[test]
    fn test_from_records_builds_index() {
        let store = loaded_store(5);
        assert_eq!(store.len(), 5);
        for id in 1..=5 {
            assert_eq!(store.get(id).unwrap().id, id);
        }
        assert!(store.get(6).is_none());
        assert!(store.get(0).is_none());
    }

    #[test]
    fn test_from_records_duplicate_id_first_wins() {
        let mut records = build_records(vec![
            RawMessage {
                body: "first".to_string(),
                ..RawMessage::default()
            },
            RawMessage {
                body: "second".to_string(),
                ..RawMessage::default()
            },
        ]);
        records[1].id = 1;

        let store = RecordStore::from_records(records);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().body, "first");
    }

    #[test]
    fn test_all_preserves_order() {
        let store = loaded_store(4);
        let all = store.all();
        assert_eq!(all.len(), 4);
        assert_eq!(
            all.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn test_insert_into_empty_store_gets_id_one() {
        let mut store = RecordStore::new();
        let record = store.insert(payload_of_kind(TransactionKind::Payment)).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(store.get(1), Some(&record));
    }

    #[test]
    fn test_insert_fills_defaults() {
        let mut store = loaded_store(2);
        let record = store
            .insert(RecordPayload {
                amount: Some("1500".to_string()),
                ..payload_of_kind(TransactionKind::Deposit)
            })
            .unwrap();

        assert_eq!(record.id, 3);
        assert_eq!(record.body, "deposit transaction");
        assert_eq!(record.amount, "1500");
        assert_eq!(record.sender, "Unknown");
        assert_eq!(record.receiver, "Unknown");
        assert_eq!(record.balance, "0");
        assert_eq!(record.fee, "0");
        assert_eq!(record.txid, "");
        assert_eq!(record.date, "");
        assert_eq!(record.timestamp, "");
    }

    #[test]
    fn test_insert_ignores_payload_id() {
        let mut store = loaded_store(3);
        let record = store
            .insert(RecordPayload {
                id: Some(1),
                ..payload_of_kind(TransactionKind::Other)
            })
            .unwrap();

        assert_eq!(record.id, 4);
        assert_eq!(store.get(1).unwrap().kind, TransactionKind::Received);
    }

    #[test]
    fn test_insert_without_type_is_rejected() {
        let mut store = loaded_store(1);
        let result = store.insert(RecordPayload {
            amount: Some("10".to_string()),
            ..RecordPayload::default()
        });

        assert_eq!(
            result.unwrap_err(),
            LedgerError::ValidationError {
                missing: vec!["type".to_string()]
            }
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_uses_max_id_not_len() {
        let mut store = loaded_store(3);
        store.delete(1).unwrap();
        let record = store.insert(payload_of_kind(TransactionKind::Other)).unwrap();
        assert_eq!(record.id, 4);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut store = loaded_store(2);
        let before = store.get(2).unwrap().clone();

        let updated = store
            .update(
                2,
                RecordPayload {
                    fee: Some("25".to_string()),
                    receiver: Some("Merchant".to_string()),
                    ..RecordPayload::default()
                },
            )
            .unwrap();

        assert_eq!(updated.fee, "25");
        assert_eq!(updated.receiver, "Merchant");
        assert_eq!(updated.amount, before.amount);
        assert_eq!(updated.body, before.body);
        assert_eq!(store.get(2), Some(&updated));
        assert_eq!(store.all()[1], updated);
    }

    #[test]
    fn test_update_with_empty_payload_is_idempotent() {
        let mut store = loaded_store(3);
        let before = store.get(2).unwrap().clone();

        let updated = store.update(2, RecordPayload::default()).unwrap();
        assert_eq!(updated, before);
        assert_eq!(store.get(2), Some(&before));
    }

    #[test]
    fn test_update_keeps_id_when_payload_disagrees() {
        let mut store = loaded_store(3);
        let updated = store
            .update(
                2,
                RecordPayload {
                    id: Some(40),
                    amount: Some("9".to_string()),
                    ..RecordPayload::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, 2);
        assert!(store.get(40).is_none());
        assert_eq!(store.get(2).unwrap().amount, "9");
        assert_eq!(ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = loaded_store(1);
        let result = store.update(999, RecordPayload::default());
        assert!(matches!(
            result.unwrap_err(),
            LedgerError::RecordNotFound { id: 999, .. }
        ));
    }

    #[test]
    fn test_delete_removes_from_both_views() {
        let mut store = loaded_store(3);
        let removed = store.delete(2).unwrap();

        assert_eq!(removed.id, 2);
        assert!(store.get(2).is_none());
        assert!(!store.contains(2));
        assert_eq!(ids(&store), vec![1, 3]);
        assert_eq!(store.get(3).unwrap().id, 3);
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut store = loaded_store(2);
        let result = store.delete(7);
        assert!(matches!(
            result.unwrap_err(),
            LedgerError::RecordNotFound { id: 7, .. }
        ));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_delete_then_insert_skips_gap() {
        let mut store = loaded_store(3);
        store.delete(2).unwrap();
        let record = store.insert(payload_of_kind(TransactionKind::Payment)).unwrap();

        assert_eq!(record.id, 4);
        assert_eq!(ids(&store), vec![1, 3, 4]);
        assert!(store.get(2).is_none());
    }

    #[test]
    fn test_delete_last_then_insert_reuses_max_plus_one() {
        let mut store = loaded_store(3);
        store.delete(3).unwrap();
        let record = store.insert(payload_of_kind(TransactionKind::Other)).unwrap();
        assert_eq!(record.id, 3);
    }
}
