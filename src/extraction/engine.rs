//! Run orchestration.
//!
//! [`ExtractionEngine`] owns the run state (result list and both identity
//! sets). A run builds fresh state, walks the source strictly in order, and
//! only replaces the engine's state once every transaction has been
//! processed. A run that fails leaves the previous results untouched.

use super::body::{extract_body, BodyEncoding};
use super::dedup::{DedupKey, Deduplicator};
use super::filter::FilterPolicy;
use super::graphql::detect_graphql;
use super::json::{parse_request_body, parse_response_body};
use crate::core::{Error, OperationRecord, Result, RunStats, Transaction};
use crate::io::source::TransactionSource;
use crate::scope::ScopePredicate;
use indicatif::ProgressBar;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Cooperative cancellation flag, checked between transactions.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What happened to a single transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    OutOfScope,
    UnparseableUrl,
    Duplicate,
    Filtered,
    Accepted(OperationRecord),
}

#[derive(Debug, Default)]
struct RunState {
    results: Vec<OperationRecord>,
    dedup: Deduplicator,
}

pub struct ExtractionEngine {
    state: RunState,
    last_stats: Option<RunStats>,
    encoding: BodyEncoding,
    progress: Option<ProgressBar>,
    cancellation: Option<CancellationToken>,
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionEngine {
    pub fn new() -> Self {
        Self {
            state: RunState::default(),
            last_stats: None,
            encoding: BodyEncoding::default(),
            progress: None,
            cancellation: None,
        }
    }

    /// Decode message bytes with `encoding` instead of Latin-1.
    ///
    /// A source that fixes its own message encoding overrides this.
    pub fn with_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Advance `progress` once per enumerated transaction.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Process every transaction of `source` and replace the run state.
    ///
    /// Fails with [`Error::HistoryUnavailable`] when the source cannot be
    /// enumerated and with [`Error::Cancelled`] when the token fires; in both
    /// cases no records are produced and the previous state is kept.
    pub fn run<S>(
        &mut self,
        source: &S,
        scope: &dyn ScopePredicate,
        policy: FilterPolicy,
    ) -> Result<(&[OperationRecord], RunStats)>
    where
        S: TransactionSource + ?Sized,
    {
        let transactions = source.transactions()?;
        let encoding = source.message_encoding().unwrap_or(self.encoding);
        if let (Some(progress), (_, Some(upper))) = (&self.progress, transactions.size_hint()) {
            progress.set_length(upper as u64);
        }

        let mut state = RunState::default();
        let mut stats = RunStats::default();

        for item in transactions {
            if self.is_cancelled() {
                debug!(processed = stats.total, "Extraction run cancelled");
                return Err(Error::Cancelled {
                    processed: stats.total,
                });
            }

            let transaction = item.map_err(into_history_error)?;
            stats.total += 1;

            match self.process(&mut state.dedup, &transaction, encoding, scope, policy) {
                Outcome::OutOfScope => {}
                Outcome::UnparseableUrl => {
                    stats.in_scope += 1;
                    stats.unparseable_urls += 1;
                }
                Outcome::Duplicate => {
                    stats.in_scope += 1;
                    stats.duplicates += 1;
                }
                Outcome::Filtered => {
                    stats.in_scope += 1;
                    stats.filtered += 1;
                }
                Outcome::Accepted(record) => {
                    stats.in_scope += 1;
                    stats.accepted += 1;
                    state.results.push(record);
                }
            }

            if let Some(progress) = &self.progress {
                progress.inc(1);
            }
        }

        info!(
            total = stats.total,
            accepted = stats.accepted,
            duplicates = stats.duplicates,
            "Found {} unique operations from {} total history items",
            stats.accepted,
            stats.total
        );

        self.state = state;
        self.last_stats = Some(stats);
        Ok((self.state.results.as_slice(), stats))
    }

    fn process(
        &self,
        dedup: &mut Deduplicator,
        transaction: &Transaction,
        encoding: BodyEncoding,
        scope: &dyn ScopePredicate,
        policy: FilterPolicy,
    ) -> Outcome {
        if !scope.is_in_scope(&transaction.url) {
            trace!(url = %transaction.url, "Skipping out-of-scope transaction");
            return Outcome::OutOfScope;
        }

        let raw_request_body = extract_body(
            Some(transaction.request_bytes.as_slice()),
            transaction.request_body_offset,
            &encoding,
        );
        let request_body = parse_request_body(&raw_request_body);

        let response_body = transaction.response_bytes.as_deref().and_then(|bytes| {
            let text = extract_body(
                Some(bytes),
                transaction.response_body_offset.unwrap_or(bytes.len()),
                &encoding,
            );
            parse_response_body(&text, transaction.response_headers.as_deref())
        });

        let graphql = detect_graphql(
            request_body.as_ref(),
            &transaction.method,
            &transaction.url,
        );

        let Some(key) = DedupKey::build(
            &transaction.method,
            &transaction.url,
            graphql.as_ref(),
            &raw_request_body,
        ) else {
            debug!(url = %transaction.url, "Dropping transaction with unparseable URL");
            return Outcome::UnparseableUrl;
        };

        if !dedup.should_process(&key, graphql.as_ref(), &raw_request_body) {
            trace!(method = %transaction.method, url = %transaction.url, "Duplicate operation");
            return Outcome::Duplicate;
        }

        if !policy.admits(graphql.as_ref(), request_body.as_ref(), response_body.as_ref()) {
            trace!(method = %transaction.method, url = %transaction.url, "Operation filtered out");
            return Outcome::Filtered;
        }

        let (graphql_operation_type, graphql_operation_name) = match graphql {
            Some(info) => (Some(info.operation_type), Some(info.operation_name)),
            None => (None, None),
        };

        Outcome::Accepted(OperationRecord {
            method: transaction.method.clone(),
            url: transaction.url.clone(),
            status_code: transaction.status_code,
            request_body,
            response_body,
            graphql_operation_type,
            graphql_operation_name,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Records accepted by the last successful run, in acceptance order.
    pub fn results(&self) -> &[OperationRecord] {
        &self.state.results
    }

    pub fn last_stats(&self) -> Option<RunStats> {
        self.last_stats
    }

    /// Reset all run state to empty.
    pub fn clear(&mut self) {
        self.state = RunState::default();
        self.last_stats = None;
    }
}

fn into_history_error(err: Error) -> Error {
    match err {
        err @ Error::HistoryUnavailable { .. } => err,
        other => Error::history_with_source("transaction history enumeration failed", other),
    }
}
