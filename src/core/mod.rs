//! Core business logic module
//!
//! This module contains the record extraction and indexed-lookup components:
//! - `extractor` - Pattern rules turning a message body into typed fields
//! - `record_builder` - Id assignment and record assembly in source order
//! - `record_store` - Ordered, id-indexed record collection with CRUD operations
//! - `traits` - The `Lookup` capability shared by the search strategies

pub mod extractor;
pub mod record_builder;
pub mod record_store;
pub mod traits;

pub use extractor::{extract, ExtractedFields};
pub use record_builder::{build_records, RawMessage};
pub use record_store::RecordStore;
pub use traits::Lookup;
