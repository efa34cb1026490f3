//! Extract unique REST and GraphQL operations from captured HTTP traffic.
//!
//! A history of request/response transactions is read from a HAR file or a
//! native capture file, filtered to the target scope, classified as GraphQL
//! or REST, deduplicated, and exported as a JSON array of
//! [`OperationRecord`]s.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod extraction;
pub mod formatting;
pub mod io;
pub mod progress;
pub mod scope;

// Re-export commonly used types
pub use crate::core::{
    Error, GraphQLInfo, GraphQLOperationType, HttpHeader, OperationRecord, Result, RunStats,
    Transaction,
};

pub use crate::extraction::{
    detect_graphql, BodyEncoding, CancellationToken, DedupKey, Deduplicator, ExtractionEngine,
    FilterPolicy, Outcome,
};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::io::writers::{export_to_file, to_json};
pub use crate::io::{
    open_source, CaptureFile, HarFile, InputFormat, TransactionSource, Transactions,
};

pub use crate::scope::{ScopePredicate, TargetScope};
