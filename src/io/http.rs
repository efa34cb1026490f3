//! Raw HTTP/1.x message helpers shared by the history readers.

use crate::core::HttpHeader;
use crate::extraction::TextDecoder;

/// Start line and header block of a raw message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageHead {
    pub start_line: String,
    pub headers: Vec<HttpHeader>,
}

/// Offset of the first body byte: just past the first blank line, whether
/// it is written `\r\n\r\n` or `\n\n`, or the message length when there is
/// none.
pub fn body_offset(message: &[u8]) -> usize {
    let crlf = find(message, b"\r\n\r\n").map(|pos| (pos, pos + 4));
    let lf = find(message, b"\n\n").map(|pos| (pos, pos + 2));
    match (crlf, lf) {
        (Some(a), Some(b)) => a.min(b).1,
        (Some((_, end)), None) | (None, Some((_, end))) => end,
        (None, None) => message.len(),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Decode and split the header block. Lines without a colon are ignored.
pub fn parse_head(message: &[u8], decoder: &dyn TextDecoder) -> MessageHead {
    let head_end = body_offset(message);
    let text = decoder.decode(&message[..head_end]);
    let mut lines = text.lines();

    let start_line = lines.next().unwrap_or_default().trim().to_string();
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| HttpHeader::new(name.trim(), value.trim()))
        .collect();

    MessageHead {
        start_line,
        headers,
    }
}

/// Status code from a response start line such as `HTTP/1.1 200 OK`.
pub fn status_code(start_line: &str) -> Option<u16> {
    let mut parts = start_line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}

/// Assemble a raw message, returning its bytes and the body offset.
pub fn build_message(start_line: &str, headers: &[HttpHeader], body: &[u8]) -> (Vec<u8>, usize) {
    let mut raw = Vec::with_capacity(start_line.len() + body.len() + 64 * headers.len());
    raw.extend_from_slice(start_line.as_bytes());
    raw.extend_from_slice(b"\r\n");
    for header in headers {
        raw.extend_from_slice(header.name.as_bytes());
        raw.extend_from_slice(b": ");
        raw.extend_from_slice(header.value.as_bytes());
        raw.extend_from_slice(b"\r\n");
    }
    raw.extend_from_slice(b"\r\n");
    let offset = raw.len();
    raw.extend_from_slice(body);
    (raw, offset)
}
