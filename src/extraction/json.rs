//! JSON body parsing.
//!
//! Parsing never fails across the pipeline boundary: anything that is not a
//! syntactically valid JSON document becomes `None`.

use crate::core::HttpHeader;
use serde_json::Value;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Strict JSON parse; empty or malformed text yields `None`.
pub fn parse_json(text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

/// Parse a request body regardless of its declared content type.
pub fn parse_request_body(text: &str) -> Option<Value> {
    parse_json(text)
}

/// Value of the first `content-type` header, matched case-insensitively.
pub fn content_type(headers: &[HttpHeader]) -> Option<&str> {
    headers
        .iter()
        .find(|h| h.name.trim().eq_ignore_ascii_case("content-type"))
        .map(|h| h.value.as_str())
}

/// Parse a response body, but only when it is declared as JSON.
///
/// Without a content type containing `application/json` the body is not
/// parsed at all.
pub fn parse_response_body(text: &str, headers: Option<&[HttpHeader]>) -> Option<Value> {
    let declared = headers.and_then(content_type)?;
    if !declared.to_ascii_lowercase().contains(JSON_MEDIA_TYPE) {
        return None;
    }
    parse_json(text)
}
