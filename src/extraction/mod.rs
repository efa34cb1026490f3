//! Operation extraction pipeline.
//!
//! Each captured transaction flows through the same stages, in order:
//!
//! 1. scope check ([`crate::scope`])
//! 2. body extraction and JSON parsing ([`body`], [`json`])
//! 3. GraphQL detection ([`graphql`])
//! 4. identity key derivation and deduplication ([`dedup`])
//! 5. inclusion filtering ([`filter`])
//!
//! [`ExtractionEngine`] drives the stages and owns the run state.
//!
//! ```rust
//! use trafficminer::extraction::{ExtractionEngine, FilterPolicy};
//! use trafficminer::scope::TargetScope;
//! use trafficminer::Transaction;
//!
//! let history: Vec<Transaction> = Vec::new();
//! let mut engine = ExtractionEngine::new();
//! let (records, stats) = engine
//!     .run(&history, &TargetScope::everything(), FilterPolicy::default())
//!     .unwrap();
//! assert!(records.is_empty());
//! assert_eq!(stats.total, 0);
//! ```

pub mod body;
pub mod dedup;
pub mod engine;
pub mod filter;
pub mod graphql;
pub mod json;

pub use body::{extract_body, BodyEncoding, TextDecoder};
pub use dedup::{DedupKey, Deduplicator};
pub use engine::{CancellationToken, ExtractionEngine, Outcome};
pub use filter::FilterPolicy;
pub use graphql::detect_graphql;
pub use json::{parse_request_body, parse_response_body};
