//! GraphQL operation detection.
//!
//! A request is classified from explicit body evidence first and from the
//! URL second:
//!
//! 1. `POST` with a JSON object body carrying `query` or `operationName`
//! 2. any request whose URL contains `graphql` (case-insensitive)
//!
//! Anything else is REST.

use crate::core::{GraphQLInfo, GraphQLOperationType};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Name used when a keyword is present but no identifier follows it.
pub const UNNAMED: &str = "Unnamed";
/// Name used when the body has the GraphQL shape but no usable query text.
pub const UNKNOWN_FORMAT: &str = "UnknownFormat";
/// Name used when GraphQL is inferred from the URL alone.
pub const UNKNOWN_FROM_URL: &str = "UnknownFromURL";

static OPERATION_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*(query|mutation)\s+").expect("valid keyword regex"));

static OPERATION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(query|mutation)\s+([a-zA-Z0-9_]+)").expect("valid operation name regex")
});

/// Classify a request, returning `None` when it does not look like GraphQL.
pub fn detect_graphql(body: Option<&Value>, method: &str, url: &str) -> Option<GraphQLInfo> {
    if method == "POST" {
        if let Some(object) = body.and_then(Value::as_object) {
            if object.contains_key("query") || object.contains_key("operationName") {
                return Some(classify_body(object));
            }
        }
    }

    if url.to_lowercase().contains("graphql") {
        return Some(GraphQLInfo::query(UNKNOWN_FROM_URL));
    }

    None
}

fn classify_body(object: &Map<String, Value>) -> GraphQLInfo {
    let declared_name = object
        .get("operationName")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty());

    match object.get("query").and_then(Value::as_str) {
        Some(query) if !query.is_empty() => GraphQLInfo {
            operation_type: operation_type(query),
            operation_name: declared_name
                .map(str::to_string)
                .unwrap_or_else(|| operation_name(query)),
        },
        _ => GraphQLInfo::query(declared_name.unwrap_or(UNKNOWN_FORMAT)),
    }
}

fn operation_type(query: &str) -> GraphQLOperationType {
    match OPERATION_KEYWORD.captures(query) {
        Some(caps) if caps[1].eq_ignore_ascii_case("mutation") => GraphQLOperationType::Mutation,
        _ => GraphQLOperationType::Query,
    }
}

fn operation_name(query: &str) -> String {
    OPERATION_NAME
        .captures(query)
        .map(|caps| caps[2].to_string())
        .unwrap_or_else(|| UNNAMED.to_string())
}
