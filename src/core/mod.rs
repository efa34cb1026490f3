pub mod errors;

pub use errors::{Error, Result};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single header line of an HTTP message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
}

impl HttpHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One captured request/response pair, read-only for the whole run.
///
/// Raw message bytes are kept as captured; `request_body_offset` and
/// `response_body_offset` point at the first byte after the header block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transaction {
    pub method: String,
    pub url: String,
    pub request_bytes: Vec<u8>,
    pub request_body_offset: usize,
    pub response_bytes: Option<Vec<u8>>,
    pub response_body_offset: Option<usize>,
    pub response_headers: Option<Vec<HttpHeader>>,
    pub status_code: Option<u16>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphQLOperationType {
    Query,
    Mutation,
}

impl GraphQLOperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

impl fmt::Display for GraphQLOperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a request as a GraphQL operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphQLInfo {
    pub operation_type: GraphQLOperationType,
    pub operation_name: String,
}

impl GraphQLInfo {
    pub fn query(name: impl Into<String>) -> Self {
        Self {
            operation_type: GraphQLOperationType::Query,
            operation_name: name.into(),
        }
    }

    pub fn mutation(name: impl Into<String>) -> Self {
        Self {
            operation_type: GraphQLOperationType::Mutation,
            operation_name: name.into(),
        }
    }
}

/// One accepted operation. Field order is the export order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub method: String,
    pub url: String,
    pub status_code: Option<u16>,
    pub request_body: Option<Value>,
    pub response_body: Option<Value>,
    pub graphql_operation_type: Option<GraphQLOperationType>,
    pub graphql_operation_name: Option<String>,
}

impl OperationRecord {
    pub fn is_graphql(&self) -> bool {
        self.graphql_operation_type.is_some()
    }
}

/// Counters collected over one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Transactions enumerated from the source
    pub total: usize,
    pub in_scope: usize,
    /// Records appended to the result list
    pub accepted: usize,
    pub duplicates: usize,
    /// New operations dropped by the include toggles or the REST body rule
    pub filtered: usize,
    pub unparseable_urls: usize,
}
