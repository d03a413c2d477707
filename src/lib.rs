//! MoMo Ledger Library
//! # Overview
//!
//! This library turns a mobile-money SMS backup (XML) into typed transaction
//! records, keeps them in an id-indexed in-memory store, and serves them over a
//! small authenticated REST API.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (TransactionRecord, RecordPayload, LedgerError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::extractor`] - Pattern rules deriving fields from a message body
//!   - [`core::record_builder`] - Id assignment and record assembly
//!   - [`core::record_store`] - Ordered, indexed record collection with CRUD
//! - [`strategy`] - Interchangeable lookups (scan, indexed) and their comparison
//! - [`io`] - XML source reading and JSON/CSV export
//! - [`api`] - HTTP routes and Basic-auth credential check
//!
//! # Data Flow
//!
//! ```text
//! XML source → extractor (per message) → record_builder (ids 1..n)
//!            → RecordStore (sequence + index) → Lookup / api
//! ```
//!
//! # Transaction Types
//!
//! Each message is classified by the first keyword found in its body:
//!
//! - **received**: money received from a counterparty
//! - **payment**: payment to a merchant or person
//! - **transfer**: transfer to another number (`transferred`)
//! - **deposit**: cash or bank deposit
//! - **other**: anything else
//!
//! # Error Handling
//!
//! Load errors (missing file, malformed XML) are fatal and abort startup.
//! Request errors (missing fields, unknown ids) are returned as typed results.
//! Extraction never fails: a missed pattern yields the field's default.

pub mod api;
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;
