//! HAR (HTTP Archive) history reader.
//!
//! Browsers and most intercepting proxies can export traffic as HAR. Each
//! entry is turned back into raw request and response messages so the
//! extraction pipeline sees the same shape it gets from a raw capture.

use super::http::build_message;
use super::source::{TransactionSource, Transactions};
use crate::core::{Error, HttpHeader, Result, Transaction};
use crate::extraction::BodyEncoding;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

#[derive(Debug, Deserialize)]
struct Har {
    log: HarLog,
}

#[derive(Debug, Deserialize)]
struct HarLog {
    #[serde(default)]
    entries: Vec<HarEntry>,
}

#[derive(Debug, Deserialize)]
struct HarEntry {
    request: HarRequest,
    response: Option<HarResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HarRequest {
    method: String,
    url: String,
    #[serde(default = "default_http_version")]
    http_version: String,
    #[serde(default)]
    headers: Vec<HarHeader>,
    post_data: Option<HarPostData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HarResponse {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    status_text: String,
    #[serde(default = "default_http_version")]
    http_version: String,
    #[serde(default)]
    headers: Vec<HarHeader>,
    content: Option<HarContent>,
}

#[derive(Debug, Deserialize)]
struct HarHeader {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct HarPostData {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HarContent {
    text: Option<String>,
    encoding: Option<String>,
}

fn default_http_version() -> String {
    "HTTP/1.1".to_string()
}

/// HAR file on disk, read and parsed when enumerated.
#[derive(Debug, Clone)]
pub struct HarFile {
    path: PathBuf,
}

impl HarFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Har> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::history_with_source(format!("cannot read {}", self.path.display()), e)
        })?;
        parse_har(&content).map_err(|e| match e {
            Error::Json(source) => Error::history_with_source(
                format!("{} is not a valid HAR file", self.path.display()),
                source,
            ),
            other => other,
        })
    }
}

fn parse_har(content: &str) -> Result<Har> {
    Ok(serde_json::from_str(content)?)
}

impl TransactionSource for HarFile {
    fn transactions(&self) -> Result<Transactions<'_>> {
        let har = self.load()?;
        debug!(
            path = %self.path.display(),
            entries = har.log.entries.len(),
            "Loaded HAR history"
        );
        Ok(Box::new(har.log.entries.into_iter().map(entry_to_transaction)))
    }

    /// HAR stores text, so the synthesized messages are always UTF-8.
    fn message_encoding(&self) -> Option<BodyEncoding> {
        Some(BodyEncoding::Utf8)
    }
}

fn headers(raw: &[HarHeader]) -> Vec<HttpHeader> {
    raw.iter()
        .filter(|h| !h.name.starts_with(':'))
        .map(|h| HttpHeader::new(h.name.as_str(), h.value.as_str()))
        .collect()
}

fn request_target(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.query() {
            Some(query) => format!("{}?{}", parsed.path(), query),
            None => parsed.path().to_string(),
        },
        Err(_) => url.to_string(),
    }
}

fn entry_to_transaction(entry: HarEntry) -> Result<Transaction> {
    let request = entry.request;
    let request_body = request
        .post_data
        .and_then(|data| data.text)
        .unwrap_or_default();
    let start_line = format!(
        "{} {} {}",
        request.method,
        request_target(&request.url),
        request.http_version
    );
    let (request_bytes, request_body_offset) =
        build_message(&start_line, &headers(&request.headers), request_body.as_bytes());

    let mut transaction = Transaction {
        method: request.method,
        url: request.url,
        request_bytes,
        request_body_offset,
        ..Default::default()
    };

    // Status 0 marks an entry that never received a response.
    if let Some(response) = entry.response.filter(|r| r.status > 0) {
        let body = response_body(response.content.as_ref())?;
        let response_headers = headers(&response.headers);
        let status_line = format!(
            "{} {} {}",
            response.http_version, response.status, response.status_text
        );
        let (bytes, offset) = build_message(status_line.trim_end(), &response_headers, &body);

        transaction.status_code = u16::try_from(response.status).ok();
        transaction.response_bytes = Some(bytes);
        transaction.response_body_offset = Some(offset);
        transaction.response_headers = Some(response_headers);
    }

    Ok(transaction)
}

fn response_body(content: Option<&HarContent>) -> Result<Vec<u8>> {
    let Some(content) = content else {
        return Ok(Vec::new());
    };
    let text = content.text.as_deref().unwrap_or_default();
    match content.encoding.as_deref() {
        Some(encoding) if encoding.eq_ignore_ascii_case("base64") => STANDARD
            .decode(text.trim())
            .map_err(|e| Error::history_with_source("invalid base64 response content", e)),
        _ => Ok(text.as_bytes().to_vec()),
    }
}
