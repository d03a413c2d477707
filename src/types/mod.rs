//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `record`: Transaction records, kinds and partial payloads
//! - `error`: Error types for the ledger

pub mod error;
pub mod record;

pub use error::LedgerError;
pub use record::{
    RecordId, RecordPayload, TransactionKind, TransactionRecord, DEFAULT_QUANTITY, UNKNOWN_PARTY,
};
