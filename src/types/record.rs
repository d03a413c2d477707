//! Transaction record types for the MoMo ledger
//!
//! This module defines the parsed transaction record, its kind, and the
//! partial payload used by insert and update requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Record identifier
///
/// Assigned sequentially from 1 in source order; never reused by the store
/// while a larger id exists.
pub type RecordId = u64;

/// Default for quantities whose pattern is absent from the message body
pub const DEFAULT_QUANTITY: &str = "0";

/// Default for counterparties that no pattern could resolve
pub const UNKNOWN_PARTY: &str = "Unknown";

/// Kind of money-transfer event a message describes
///
/// Derived from keyword presence in the message body. Deserialization is
/// lenient: any unrecognized string becomes [`TransactionKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TransactionKind {
    /// Money received from a counterparty
    Received,

    /// Payment made to a merchant or person
    Payment,

    /// Transfer to another mobile number
    Transfer,

    /// Cash or bank deposit into the wallet
    Deposit,

    /// Anything the keyword rules do not recognize
    Other,
}

impl TransactionKind {
    /// Lowercase wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Received => "received",
            TransactionKind::Payment => "payment",
            TransactionKind::Transfer => "transfer",
            TransactionKind::Deposit => "deposit",
            TransactionKind::Other => "other",
        }
    }
}

impl From<String> for TransactionKind {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "received" => TransactionKind::Received,
            "payment" => TransactionKind::Payment,
            "transfer" => TransactionKind::Transfer,
            "deposit" => TransactionKind::Deposit,
            _ => TransactionKind::Other,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed transaction message
///
/// Quantities stay as decimal strings with group separators stripped, exactly
/// as extracted; no numeric validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier, the index key
    pub id: RecordId,

    /// Human-readable time, verbatim from source metadata
    pub date: String,

    /// Machine time (epoch milliseconds as text), verbatim from source metadata
    pub timestamp: String,

    /// Original message text
    pub body: String,

    /// Kind derived from the body keywords
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub amount: String,
    pub sender: String,
    pub receiver: String,
    pub balance: String,
    pub fee: String,

    /// External transaction reference, empty when absent
    pub txid: String,
}

impl TransactionRecord {
    /// Merge a partial payload into this record
    ///
    /// Supplied fields overwrite, omitted fields are kept. The payload `id`
    /// is never applied: the index key must not change through an update.
    pub fn apply(&mut self, payload: RecordPayload) {
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

        if let Some(date) = date {
            self.date = date;
        }
        if let Some(timestamp) = timestamp {
            self.timestamp = timestamp;
        }
        if let Some(body) = body {
            self.body = body;
        }
        if let Some(kind) = kind {
            self.kind = kind;
        }
        if let Some(amount) = amount {
            self.amount = amount;
        }
        if let Some(sender) = sender {
            self.sender = sender;
        }
        if let Some(receiver) = receiver {
            self.receiver = receiver;
        }
        if let Some(balance) = balance {
            self.balance = balance;
        }
        if let Some(fee) = fee {
            self.fee = fee;
        }
        if let Some(txid) = txid {
            self.txid = txid;
        }
    }
}

/// Partial record supplied by insert and update callers
///
/// Every key is optional; unknown keys in the incoming JSON are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_record() -> TransactionRecord {
        TransactionRecord {
            id: 7,
            date: "10 May 2024 4:30:58 PM".to_string(),
            timestamp: "1715351458724".to_string(),
            body: "You have received 2000 RWF from Jane Smith (*********013).".to_string(),
            kind: TransactionKind::Received,
            amount: "2000".to_string(),
            sender: "Jane Smith".to_string(),
            receiver: "You".to_string(),
            balance: "2000".to_string(),
            fee: "0".to_string(),
            txid: "76662021700".to_string(),
        }
    }

    #[rstest]
    #[case::received("received", TransactionKind::Received)]
    #[case::uppercase("PAYMENT", TransactionKind::Payment)]
    #[case::padded(" transfer ", TransactionKind::Transfer)]
    #[case::deposit("deposit", TransactionKind::Deposit)]
    #[case::unknown("withdrawal", TransactionKind::Other)]
    #[case::empty("", TransactionKind::Other)]
    fn test_kind_from_string(#[case] raw: &str, #[case] expected: TransactionKind) {
        assert_eq!(TransactionKind::from(raw.to_string()), expected);
    }

    #[test]
    fn test_record_serializes_kind_as_type() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["type"], "received");
        assert_eq!(json["id"], 7);
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_payload_ignores_unknown_keys() {
        let payload: RecordPayload =
            serde_json::from_str(r#"{"type": "payment", "amount": "500", "channel": "ussd"}"#)
                .unwrap();
        assert_eq!(payload.kind, Some(TransactionKind::Payment));
        assert_eq!(payload.amount.as_deref(), Some("500"));
        assert!(payload.sender.is_none());
    }

    #[test]
    fn test_apply_empty_payload_is_noop() {
        let mut record = sample_record();
        record.apply(RecordPayload::default());
        assert_eq!(record, sample_record());
    }

    #[test]
    fn test_apply_overwrites_supplied_fields_and_keeps_id() {
        let mut record = sample_record();
        record.apply(RecordPayload {
            id: Some(99),
            amount: Some("2500".to_string()),
            kind: Some(TransactionKind::Deposit),
            ..RecordPayload::default()
        });

        assert_eq!(record.id, 7);
        assert_eq!(record.amount, "2500");
        assert_eq!(record.kind, TransactionKind::Deposit);
        assert_eq!(record.sender, "Jane Smith");
    }
}
