//! Lookup strategy module
//!
//! This module defines the interchangeable search strategies over the record
//! store and the utility that measures two of them against each other:
//!
//! - `scan` - Sequential scan over the ordered sequence (O(n))
//! - `indexed` - Single hash-index access (O(1) expected)
//! - `comparison` - Instrumented side-by-side timing and result check

use crate::cli::LookupType;
use crate::core::Lookup;

pub mod comparison;
pub mod indexed;
pub mod scan;

pub use comparison::{benchmark_lookup, compare_lookups, ComparisonReport, MethodReport};
pub use indexed::IndexedLookup;
pub use scan::SequentialScan;

/// Create a lookup strategy for the given type
///
/// # Arguments
///
/// * `lookup_type` - Which strategy to instantiate (Scan or Indexed)
///
/// # Returns
///
/// A boxed trait object implementing the Lookup trait
pub fn create_lookup(lookup_type: LookupType) -> Box<dyn Lookup> {
    match lookup_type {
        LookupType::Scan => Box::new(SequentialScan),
        LookupType::Indexed => Box::new(IndexedLookup),
    }
}
