//! Core traits for record lookup
//!
//! This module defines the capability that lets the sequential scan and the
//! indexed lookup be used, and measured, interchangeably.

use crate::core::record_store::RecordStore;
use crate::types::{RecordId, TransactionRecord};

/// Trait for resolving a record by id against a store
///
/// Implementations hold no state of their own; every call reads the store it
/// is given, so two strategies run against the same store must agree on every
/// result.
pub trait Lookup: Send + Sync {
    /// Display name used in comparison reports
    fn name(&self) -> &'static str;

    /// Find the record with this id, or `None` if the store has none
    fn find<'s>(&self, store: &'s RecordStore, id: RecordId) -> Option<&'s TransactionRecord>;
}
