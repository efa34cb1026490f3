//! Transaction history sources.

use super::capture::CaptureFile;
use super::har::HarFile;
use crate::core::{Result, Transaction};
use crate::extraction::BodyEncoding;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Boxed iterator over a history, in capture order.
pub type Transactions<'a> = Box<dyn Iterator<Item = Result<Transaction>> + 'a>;

/// Supplier of the ordered transaction history.
///
/// `transactions` fails with [`crate::Error::HistoryUnavailable`] when the
/// history cannot be enumerated at all. Item-level errors abort the run in
/// the same way.
pub trait TransactionSource {
    fn transactions(&self) -> Result<Transactions<'_>>;

    /// Encoding the source writes its raw messages in, when it fixes one.
    ///
    /// `None` leaves the choice to the engine.
    fn message_encoding(&self) -> Option<BodyEncoding> {
        None
    }
}

impl TransactionSource for [Transaction] {
    fn transactions(&self) -> Result<Transactions<'_>> {
        Ok(Box::new(self.iter().cloned().map(Ok)))
    }
}

impl TransactionSource for Vec<Transaction> {
    fn transactions(&self) -> Result<Transactions<'_>> {
        self.as_slice().transactions()
    }
}

/// On-disk history formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Pick by file extension: `.har` is HAR, anything else a capture file
    #[default]
    Auto,
    /// HTTP Archive 1.2
    Har,
    /// Native JSON capture with base64 raw messages
    Capture,
}

impl InputFormat {
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => {
                let is_har = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("har"));
                if is_har {
                    Self::Har
                } else {
                    Self::Capture
                }
            }
            other => other,
        }
    }
}

/// Open the history file at `path`. Nothing is read until enumeration.
pub fn open_source(
    path: &Path,
    format: InputFormat,
    encoding: BodyEncoding,
) -> Box<dyn TransactionSource> {
    match format.resolve(path) {
        InputFormat::Har => Box::new(HarFile::new(path)),
        _ => Box::new(CaptureFile::new(path).with_header_encoding(encoding)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_format_uses_extension() {
        assert_eq!(
            InputFormat::Auto.resolve(Path::new("traffic.HAR")),
            InputFormat::Har
        );
        assert_eq!(
            InputFormat::Auto.resolve(Path::new("traffic.json")),
            InputFormat::Capture
        );
        assert_eq!(
            InputFormat::Har.resolve(Path::new("traffic.json")),
            InputFormat::Har
        );
    }

    #[test]
    fn test_vec_source_preserves_order() {
        let history = vec![
            Transaction {
                url: "https://a.test/1".into(),
                ..Default::default()
            },
            Transaction {
                url: "https://a.test/2".into(),
                ..Default::default()
            },
        ];
        let urls: Vec<String> = history
            .transactions()
            .unwrap()
            .map(|t| t.unwrap().url)
            .collect();
        assert_eq!(urls, vec!["https://a.test/1", "https://a.test/2"]);
    }
}
