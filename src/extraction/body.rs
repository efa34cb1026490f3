//! Body extraction from raw HTTP messages.

use serde::{Deserialize, Serialize};

/// Converts raw message bytes into text.
///
/// Header and body text of a message must go through the same decoder so
/// that offsets and content-type lookups agree.
pub trait TextDecoder {
    fn decode(&self, bytes: &[u8]) -> String;
}

/// Byte-to-text conventions supported for captured messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    /// ISO-8859-1: every byte maps to the code point of the same value
    #[default]
    Latin1,
    /// UTF-8 with invalid sequences replaced by U+FFFD
    Utf8,
}

impl TextDecoder for BodyEncoding {
    fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Return the body of `message` starting at `offset`, decoded as text.
///
/// An absent message or an offset at or past the end yields an empty
/// string. Never fails.
pub fn extract_body(message: Option<&[u8]>, offset: usize, decoder: &dyn TextDecoder) -> String {
    match message {
        Some(bytes) if offset < bytes.len() => decoder.decode(&bytes[offset..]),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &[u8] = b"POST /api HTTP/1.1\r\nHost: a\r\n\r\n{\"id\":1}";

    #[test]
    fn test_extracts_from_offset_to_end() {
        let offset = REQUEST.len() - 8;
        let body = extract_body(Some(REQUEST), offset, &BodyEncoding::Latin1);
        assert_eq!(body, "{\"id\":1}");
    }

    #[test]
    fn test_offset_out_of_bounds_is_empty() {
        assert_eq!(
            extract_body(Some(REQUEST), REQUEST.len(), &BodyEncoding::Latin1),
            ""
        );
        assert_eq!(
            extract_body(Some(REQUEST), REQUEST.len() + 10, &BodyEncoding::Utf8),
            ""
        );
    }

    #[test]
    fn test_absent_message_is_empty() {
        assert_eq!(extract_body(None, 0, &BodyEncoding::Latin1), "");
    }

    #[test]
    fn test_latin1_maps_every_byte() {
        let bytes = [0x63, 0x61, 0x66, 0xE9, 0xFF];
        assert_eq!(BodyEncoding::Latin1.decode(&bytes), "caf\u{e9}\u{ff}");
    }

    #[test]
    fn test_utf8_is_lossy_not_failing() {
        let bytes = [b'o', b'k', 0xC3];
        assert_eq!(BodyEncoding::Utf8.decode(&bytes), "ok\u{fffd}");
        assert_eq!(BodyEncoding::Utf8.decode("café".as_bytes()), "café");
    }
}
