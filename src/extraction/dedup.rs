//! Operation identity and deduplication.
//!
//! Two identity policies coexist within one run:
//!
//! - REST transactions are keyed by [`DedupKey`], i.e. method, scheme, host
//!   and path. Bodies and query strings never split a REST operation.
//! - GraphQL transactions are keyed by the exact raw request body. Two
//!   requests for the same operation that differ only in whitespace, field
//!   order or variables are distinct operations.
//!
//! The GraphQL variants of [`DedupKey`] are still derived for every GraphQL
//! transaction, but the deduplicator does not consult them.

use crate::core::{GraphQLInfo, GraphQLOperationType};
use std::collections::HashSet;
use url::Url;

/// GraphQL-specific tail of a [`DedupKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GraphQLKeyPart {
    Mutation { name: String },
    Query { name: String, body: String },
}

/// Identity of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub method: String,
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub graphql: Option<GraphQLKeyPart>,
}

impl DedupKey {
    /// Derive the key for a transaction.
    ///
    /// Returns `None` when the URL cannot be decomposed into scheme, host and
    /// path; such a transaction has no identity and is dropped.
    pub fn build(
        method: &str,
        url: &str,
        graphql: Option<&GraphQLInfo>,
        raw_request_body: &str,
    ) -> Option<Self> {
        let (scheme, host, path) = split_url(url)?;

        let graphql = graphql.map(|info| match info.operation_type {
            GraphQLOperationType::Mutation => GraphQLKeyPart::Mutation {
                name: info.operation_name.clone(),
            },
            GraphQLOperationType::Query => GraphQLKeyPart::Query {
                name: info.operation_name.clone(),
                body: raw_request_body.to_string(),
            },
        });

        Some(Self {
            method: method.to_string(),
            scheme,
            host,
            path,
            graphql,
        })
    }
}

/// Scheme, network location and path of `url`.
///
/// `Url::parse` only validates. The network location (userinfo, host and
/// any port, default or not) and the path (dot-segments included) are taken
/// as written, so the parser's normalization never merges two endpoints.
fn split_url(url: &str) -> Option<(String, String, String)> {
    let url = url.trim();
    let parsed = Url::parse(url).ok()?;
    parsed.host_str()?;

    let (_, rest) = url.split_once("://")?;
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (netloc, tail) = rest.split_at(authority_end);
    if netloc.is_empty() {
        return None;
    }
    let path_end = tail.find(['?', '#']).unwrap_or(tail.len());

    Some((
        parsed.scheme().to_string(),
        netloc.to_string(),
        tail[..path_end].to_string(),
    ))
}

/// Identity sets for one run.
#[derive(Debug, Default, Clone)]
pub struct Deduplicator {
    seen_graphql_bodies: HashSet<String>,
    seen_rest_keys: HashSet<DedupKey>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a transaction is new, recording it if so.
    pub fn should_process(
        &mut self,
        key: &DedupKey,
        graphql: Option<&GraphQLInfo>,
        raw_request_body: &str,
    ) -> bool {
        if graphql.is_some() {
            if self.seen_graphql_bodies.contains(raw_request_body) {
                return false;
            }
            self.seen_graphql_bodies.insert(raw_request_body.to_string())
        } else {
            if self.seen_rest_keys.contains(key) {
                return false;
            }
            self.seen_rest_keys.insert(key.clone())
        }
    }

    pub fn seen_graphql_bodies(&self) -> usize {
        self.seen_graphql_bodies.len()
    }

    pub fn seen_rest_keys(&self) -> usize {
        self.seen_rest_keys.len()
    }

    pub fn clear(&mut self) {
        self.seen_graphql_bodies.clear();
        self.seen_rest_keys.clear();
    }
}
