//! DynamoDB Streams consumers.

pub mod audit;

pub use audit::{AuditOutcome, audit_records_for, process_stream_event};
