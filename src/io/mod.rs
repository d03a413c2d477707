//! I/O module
//!
//! Handles source parsing and record output.
//!
//! # Components
//!
//! - `sms_xml` - SMS backup XML reader and store loading
//! - `export_format` - JSON and CSV record writers

pub mod export_format;
pub mod sms_xml;

pub use export_format::{write_records, ExportFormat};
pub use sms_xml::{load_store, parse_messages, read_messages, read_messages_from_path};
