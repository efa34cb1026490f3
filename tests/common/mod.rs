// Shared builders for trafficminer integration tests
#![allow(dead_code)]

use std::path::PathBuf;
use trafficminer::{HttpHeader, Transaction};

/// Build a raw HTTP/1.1 message and return it with its body offset.
pub fn raw_message(start_line: &str, headers: &[(&str, &str)], body: &str) -> (Vec<u8>, usize) {
    let mut head = format!("{start_line}\r\n");
    for (name, value) in headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str("\r\n");
    let offset = head.len();
    let mut bytes = head.into_bytes();
    bytes.extend_from_slice(body.as_bytes());
    (bytes, offset)
}

/// Fluent builder for history transactions.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    method: String,
    url: String,
    request_body: String,
    response: Option<(u16, String, String)>,
}

impl TransactionBuilder {
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.to_string(),
            url: url.to_string(),
            request_body: String::new(),
            response: None,
        }
    }

    pub fn body(mut self, body: &str) -> Self {
        self.request_body = body.to_string();
        self
    }

    pub fn respond(mut self, status: u16, content_type: &str, body: &str) -> Self {
        self.response = Some((status, content_type.to_string(), body.to_string()));
        self
    }

    pub fn respond_json(self, body: &str) -> Self {
        self.respond(200, "application/json", body)
    }

    pub fn build(self) -> Transaction {
        let target = url::Url::parse(&self.url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| "/".to_string());
        let (request_bytes, request_body_offset) = raw_message(
            &format!("{} {} HTTP/1.1", self.method, target),
            &[("Host", "example.test")],
            &self.request_body,
        );

        let mut transaction = Transaction {
            method: self.method,
            url: self.url,
            request_bytes,
            request_body_offset,
            ..Default::default()
        };

        if let Some((status, content_type, body)) = self.response {
            let (bytes, offset) = raw_message(
                &format!("HTTP/1.1 {status} OK"),
                &[("Content-Type", content_type.as_str())],
                &body,
            );
            transaction.response_bytes = Some(bytes);
            transaction.response_body_offset = Some(offset);
            transaction.response_headers = Some(vec![HttpHeader::new("Content-Type", content_type)]);
            transaction.status_code = Some(status);
        }

        transaction
    }
}

pub fn get(url: &str) -> TransactionBuilder {
    TransactionBuilder::new("GET", url)
}

pub fn post(url: &str) -> TransactionBuilder {
    TransactionBuilder::new("POST", url)
}

pub fn graphql(url: &str, body: &str) -> Transaction {
    post(url).body(body).respond_json(r#"{"data":{}}"#).build()
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/fixtures")
        .join(name)
}
