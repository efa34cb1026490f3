//! Native capture file reader.
//!
//! A capture file keeps raw request and response messages exactly as they
//! crossed the proxy, base64-encoded:
//!
//! ```json
//! {
//!   "transactions": [
//!     {
//!       "method": "POST",
//!       "url": "https://api.example.com/graphql",
//!       "request": "UE9TVCAvZ3JhcGhxbCBIVFRQLzEuMQ0KDQp7fQ==",
//!       "response": "SFRUUC8xLjEgMjAwIE9LDQoNCg=="
//!     }
//!   ]
//! }
//! ```
//!
//! Body offsets, response headers and the status code are optional; when
//! omitted they are recovered from the raw messages.

use super::http::{body_offset, parse_head, status_code};
use super::source::{TransactionSource, Transactions};
use crate::core::{Error, HttpHeader, Result, Transaction};
use crate::extraction::{BodyEncoding, TextDecoder};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Capture {
    #[serde(default)]
    transactions: Vec<CapturedTransaction>,
}

#[derive(Debug, Deserialize)]
struct CapturedTransaction {
    method: String,
    url: String,
    request: String,
    request_body_offset: Option<usize>,
    response: Option<String>,
    response_body_offset: Option<usize>,
    response_headers: Option<Vec<HttpHeader>>,
    status_code: Option<u16>,
}

/// Capture file on disk, read and parsed when enumerated.
#[derive(Debug, Clone)]
pub struct CaptureFile {
    path: PathBuf,
    header_encoding: BodyEncoding,
}

impl CaptureFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            header_encoding: BodyEncoding::Latin1,
        }
    }

    /// Decode header blocks with `encoding`; bodies follow the engine's.
    pub fn with_header_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.header_encoding = encoding;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Capture> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::history_with_source(format!("cannot read {}", self.path.display()), e)
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::history_with_source(
                format!("{} is not a valid capture file", self.path.display()),
                e,
            )
        })
    }
}

impl TransactionSource for CaptureFile {
    fn transactions(&self) -> Result<Transactions<'_>> {
        let capture = self.load()?;
        debug!(
            path = %self.path.display(),
            transactions = capture.transactions.len(),
            "Loaded capture history"
        );
        let decoder = self.header_encoding;
        Ok(Box::new(
            capture
                .transactions
                .into_iter()
                .enumerate()
                .map(move |(index, item)| to_transaction(index, item, &decoder)),
        ))
    }
}

fn decode_message(index: usize, field: &str, encoded: &str) -> Result<Vec<u8>> {
    STANDARD.decode(encoded.trim()).map_err(|e| {
        Error::history_with_source(format!("transaction {index}: {field} is not base64"), e)
    })
}

fn to_transaction(
    index: usize,
    item: CapturedTransaction,
    decoder: &dyn TextDecoder,
) -> Result<Transaction> {
    let request_bytes = decode_message(index, "request", &item.request)?;
    let request_body_offset = item
        .request_body_offset
        .unwrap_or_else(|| body_offset(&request_bytes));

    let mut transaction = Transaction {
        method: item.method,
        url: item.url,
        request_bytes,
        request_body_offset,
        status_code: item.status_code,
        response_headers: item.response_headers,
        ..Default::default()
    };

    if let Some(encoded) = item.response.as_deref() {
        let bytes = decode_message(index, "response", encoded)?;
        if transaction.response_headers.is_none() || transaction.status_code.is_none() {
            let head = parse_head(&bytes, decoder);
            transaction.status_code = transaction
                .status_code
                .or_else(|| status_code(&head.start_line));
            transaction.response_headers.get_or_insert(head.headers);
        }
        transaction.response_body_offset =
            Some(item.response_body_offset.unwrap_or_else(|| body_offset(&bytes)));
        transaction.response_bytes = Some(bytes);
    }

    Ok(transaction)
}
