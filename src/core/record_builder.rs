//! Record assembly from raw source messages
//!
//! Pairs the metadata of each message with the fields extracted from its body
//! and assigns ids as 1-based positions in source order.

use crate::core::extractor::{extract, ExtractedFields};
use crate::types::{RecordId, TransactionRecord};

/// One message as read from the source, before extraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMessage {
    /// Human-readable time (`readable_date` attribute)
    pub readable_date: String,
    /// Machine time (`date` attribute)
    pub date: String,
    /// Free-text body
    pub body: String,
}

/// Build the ordered record list for a loaded source
///
/// Exactly one record per message, ids `1..=n` in iteration order.
pub fn build_records<I>(messages: I) -> Vec<TransactionRecord>
where
    I: IntoIterator<Item = RawMessage>,
{
    messages
        .into_iter()
        .zip(1..)
        .map(|(message, id)| build_record(id, message))
        .collect()
}

/// Assemble one record from its id and raw message
pub fn build_record(id: RecordId, message: RawMessage) -> TransactionRecord {
    let ExtractedFields {
        kind,
        amount,
        sender,
        receiver,
        balance,
        fee,
        txid,
    } = extract(&message.body);

    TransactionRecord {
        id,
        date: message.readable_date,
        timestamp: message.date,
        body: message.body,
        kind,
        amount,
        sender,
        receiver,
        balance,
        fee,
        txid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;

    fn message(body: &str, stamp: &str) -> RawMessage {
        RawMessage {
            readable_date: format!("readable {}", stamp),
            date: stamp.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_ids_follow_source_order() {
        let records = build_records(vec![
            message("You have received 10 RWF from A B (1)", "100"),
            message("Your payment of 20 RWF to C D 1", "200"),
            message("hello", "300"),
        ]);

        let ids: Vec<RecordId> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[0].kind, TransactionKind::Received);
        assert_eq!(records[1].kind, TransactionKind::Payment);
        assert_eq!(records[2].kind, TransactionKind::Other);
        assert_eq!(records[1].timestamp, "200");
    }

    #[test]
    fn test_metadata_maps_to_date_and_timestamp() {
        let record = build_record(4, message("deposit of 5 RWF", "1715351458724"));
        assert_eq!(record.id, 4);
        assert_eq!(record.date, "readable 1715351458724");
        assert_eq!(record.timestamp, "1715351458724");
        assert_eq!(record.body, "deposit of 5 RWF");
        assert_eq!(record.amount, "5");
    }

    #[test]
    fn test_empty_source_builds_nothing() {
        assert!(build_records(Vec::new()).is_empty());
    }
}
