//! Field extraction from mobile-money SMS bodies
//!
//! Every rule here is a best-effort heuristic over free text. A rule that does
//! not match degrades to its default value; extraction never fails.
//!
//! # Rules
//!
//! | Field      | Pattern                                                    | Default     |
//! |------------|------------------------------------------------------------|-------------|
//! | `type`     | first of `received`, `payment`, `transferred`, `deposit`   | `other`     |
//! | `amount`   | number (comma groups allowed) followed by `RWF`            | `"0"`       |
//! | `sender`   | name before `(` or digits, after `from`                    | `"Unknown"` |
//! | `receiver` | name before `(` or digits, after `to`; `"You"` if received | `"Unknown"` |
//! | `balance`  | number after `balance`, before `RWF`                       | `"0"`       |
//! | `fee`      | number after `fee was`, before `RWF`                       | `"0"`       |
//! | `txid`     | digits after `TxId`, else after `Transaction Id`           | `""`        |
//!
//! Keyword checks run on the lowercased body. Regex rules other than `amount`
//! are case-insensitive.

use crate::types::{TransactionKind, DEFAULT_QUANTITY, UNKNOWN_PARTY};
use regex::Regex;
use std::sync::OnceLock;

/// Receiver label used when a received message names only the sender
pub const IMPLICIT_RECEIVER: &str = "You";

/// Keywords checked in priority order; the first one present decides the kind
const KIND_KEYWORDS: [(&str, TransactionKind); 4] = [
    ("received", TransactionKind::Received),
    ("payment", TransactionKind::Payment),
    ("transferred", TransactionKind::Transfer),
    ("deposit", TransactionKind::Deposit),
];

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| {
                Regex::new($pattern).expect(concat!("invalid regex: ", stringify!($name)))
            })
        }
    };
}

cached_regex!(amount_pattern, r"(\d+(?:,\d+)*)\s*RWF");
cached_regex!(balance_pattern, r"(?i)balance[:\s]+(\d+(?:,\d+)*)\s*RWF");
cached_regex!(fee_pattern, r"(?i)fee\s+was[:\s]+(\d+(?:,\d+)*)\s*RWF");
cached_regex!(sender_name_pattern, r"(?i)from\s+([A-Za-z\s]+)\s*\(");
cached_regex!(sender_number_pattern, r"(?i)from\s+(\d+)");
cached_regex!(receiver_name_pattern, r"(?i)to\s+([A-Za-z\s]+)\s*\(");
cached_regex!(receiver_before_digits_pattern, r"(?i)to\s+([A-Za-z\s]+)\s+\d");
cached_regex!(txid_tag_pattern, r"(?i)TxId[:\s]+(\d+)");
cached_regex!(txid_phrase_pattern, r"(?i)Transaction Id[:\s]+(\d+)");

/// Structured fields derived from one message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub kind: TransactionKind,
    pub amount: String,
    pub sender: String,
    pub receiver: String,
    pub balance: String,
    pub fee: String,
    pub txid: String,
}

/// Derive every structured field from a message body
///
/// Pure and total: the same body always yields the same fields.
pub fn extract(body: &str) -> ExtractedFields {
    ExtractedFields {
        kind: determine_kind(body),
        amount: extract_amount(body),
        sender: extract_sender(body),
        receiver: extract_receiver(body),
        balance: extract_balance(body),
        fee: extract_fee(body),
        txid: extract_txid(body),
    }
}

/// Classify a body by the first keyword present in priority order
pub fn determine_kind(body: &str) -> TransactionKind {
    let lower = body.to_lowercase();
    KIND_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|&(_, kind)| kind)
        .unwrap_or(TransactionKind::Other)
}

/// Amount immediately followed by the currency unit
pub fn extract_amount(body: &str) -> String {
    capture_quantity(amount_pattern(), body)
}

/// Counterparty after `from`: a name before `(`, else a bare number
pub fn extract_sender(body: &str) -> String {
    if !body.to_lowercase().contains("from") {
        return UNKNOWN_PARTY.to_string();
    }

    first_capture(sender_name_pattern(), body)
        .map(|name| name.trim().to_string())
        .or_else(|| first_capture(sender_number_pattern(), body).map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_PARTY.to_string())
}

/// Counterparty after `to`, or the implicit `"You"` on received messages
///
/// The `"You"` fallback applies only when the body has no `to` at all; a body
/// with `to` but no matching name stays `"Unknown"`.
pub fn extract_receiver(body: &str) -> String {
    let lower = body.to_lowercase();

    if lower.contains("to") {
        return first_capture(receiver_name_pattern(), body)
            .or_else(|| first_capture(receiver_before_digits_pattern(), body))
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| UNKNOWN_PARTY.to_string());
    }

    if lower.contains("received") && sender_name_pattern().is_match(body) {
        return IMPLICIT_RECEIVER.to_string();
    }

    UNKNOWN_PARTY.to_string()
}

/// Balance reported after the word `balance`
pub fn extract_balance(body: &str) -> String {
    capture_quantity(balance_pattern(), body)
}

/// Fee reported after `fee was`
pub fn extract_fee(body: &str) -> String {
    capture_quantity(fee_pattern(), body)
}

/// External reference after `TxId`, falling back to `Transaction Id`
pub fn extract_txid(body: &str) -> String {
    [txid_tag_pattern(), txid_phrase_pattern()]
        .into_iter()
        .find_map(|pattern| first_capture(pattern, body))
        .unwrap_or_default()
        .to_string()
}

fn first_capture<'a>(pattern: &Regex, body: &'a str) -> Option<&'a str> {
    pattern
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn capture_quantity(pattern: &Regex, body: &str) -> String {
    first_capture(pattern, body)
        .map(|quantity| quantity.replace(',', ""))
        .unwrap_or_else(|| DEFAULT_QUANTITY.to_string())
}
