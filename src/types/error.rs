//! Error types for the MoMo ledger
//!
//! This module defines all error types that can occur while loading the SMS
//! source, mutating the record store, or exporting records.
//!
//! # Error Categories
//!
//! - **Load Errors**: File not found, I/O failures, malformed XML source.
//!   These are fatal: the store must never start partially loaded.
//! - **Request Errors**: Missing insert fields, undecodable payloads, unknown or
//!   unparsable record ids.
//!   These are recoverable and returned to the caller as typed outcomes.
//! - **Export Errors**: Failures while serializing records to JSON or CSV.

use crate::types::RecordId;
use thiserror::Error;

/// Main error type for the ledger
///
/// Pattern misses during field extraction are not errors; they degrade to
/// default values and never surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Source file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading the source or writing output
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The SMS source violates the XML structure beyond the tolerated fix-up
    #[error("Malformed source{}: {message}", position.map(|p| format!(" at byte {}", p)).unwrap_or_default())]
    MalformedSource {
        /// Byte offset where parsing failed (if available)
        position: Option<u64>,
        /// Description of the structural defect
        message: String,
    },

    /// An insert payload lacks fields that cannot be defaulted
    #[error("Missing required fields: {}", missing.join(", "))]
    ValidationError {
        /// Names of the missing fields, in wire form
        missing: Vec<String>,
    },

    /// No record with the given id exists
    #[error("Transaction {id} not found for {operation}")]
    RecordNotFound {
        /// The id that was looked up
        id: RecordId,
        /// Operation that failed
        operation: String,
    },

    /// A record id could not be parsed from request input
    #[error("Invalid transaction ID format: '{raw}'")]
    InvalidRecordId {
        /// The raw text that failed to parse
        raw: String,
    },

    /// A request body could not be decoded into a record payload
    #[error("Invalid request body: {message}")]
    InvalidPayload {
        /// Decoder error description
        message: String,
    },

    /// Records could not be serialized for export
    #[error("Export error: {message}")]
    ExportError {
        /// Description of the serialization failure
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        LedgerError::ExportError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        LedgerError::ExportError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        LedgerError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a MalformedSource error
    pub fn malformed_source(position: Option<u64>, message: impl Into<String>) -> Self {
        LedgerError::MalformedSource {
            position,
            message: message.into(),
        }
    }

    /// Create a ValidationError listing the missing fields
    pub fn validation(missing: &[&str]) -> Self {
        LedgerError::ValidationError {
            missing: missing.iter().map(|field| field.to_string()).collect(),
        }
    }

    /// Create a RecordNotFound error
    pub fn record_not_found(id: RecordId, operation: &str) -> Self {
        LedgerError::RecordNotFound {
            id,
            operation: operation.to_string(),
        }
    }

    /// Create an InvalidRecordId error
    pub fn invalid_record_id(raw: &str) -> Self {
        LedgerError::InvalidRecordId {
            raw: raw.to_string(),
        }
    }

    /// Whether this error must abort startup rather than fail one request
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LedgerError::FileNotFound { .. }
                | LedgerError::IoError { .. }
                | LedgerError::MalformedSource { .. }
        )
    }
}
