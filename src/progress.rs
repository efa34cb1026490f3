//! Progress feedback for extraction runs.
//!
//! One bar on stderr advances per transaction read from the history. It is
//! hidden when:
//!
//! - `--quiet` is given or `TRAFFICMINER_QUIET` is set
//! - stderr is not a terminal (CI, pipes)
//! - `-vv` or more is given, since debug logs share stderr with the bar
//!
//! ```rust,no_run
//! use trafficminer::progress::{ProgressConfig, ProgressManager};
//!
//! let manager = ProgressManager::new(ProgressConfig::from_env(false, 0));
//! let bar = manager.transaction_bar("Mining history");
//! bar.set_length(3);
//! for _ in 0..3 {
//!     bar.inc(1);
//! }
//! manager.finish();
//! ```

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::io::IsTerminal;

pub const TEMPLATE_TRANSACTIONS: &str =
    "{spinner} {msg} [{bar:30}] {pos}/{len} transactions ({percent}%) - {eta}";

const QUIET_ENV: &str = "TRAFFICMINER_QUIET";

/// Verbosity at which per-transaction debug logs start.
const LOG_NOISE_LEVEL: u8 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressConfig {
    pub quiet: bool,
    pub verbosity: u8,
}

impl ProgressConfig {
    /// Combine the CLI flags with `TRAFFICMINER_QUIET`.
    pub fn from_env(quiet: bool, verbosity: u8) -> Self {
        Self {
            quiet: quiet || std::env::var_os(QUIET_ENV).is_some(),
            verbosity,
        }
    }

    /// Whether the bar would stay readable, ignoring the terminal check.
    pub fn wants_progress(&self) -> bool {
        !self.quiet && self.verbosity < LOG_NOISE_LEVEL
    }

    pub fn should_show_progress(&self) -> bool {
        self.wants_progress() && std::io::stderr().is_terminal()
    }
}

/// Owns the bars drawn during one `extract` invocation.
pub struct ProgressManager {
    multi: MultiProgress,
    config: ProgressConfig,
}

impl ProgressManager {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            multi: MultiProgress::new(),
            config,
        }
    }

    /// A bar counting transactions, its length set once the history is open.
    ///
    /// Hidden bars are returned when progress should not be shown, so callers
    /// never need to branch.
    pub fn transaction_bar(&self, message: &str) -> ProgressBar {
        if !self.config.should_show_progress() {
            return ProgressBar::hidden();
        }

        let bar = self.multi.add(ProgressBar::new(0));
        match ProgressStyle::default_bar().template(TEMPLATE_TRANSACTIONS) {
            Ok(style) => bar.set_style(style.progress_chars("█▓▒░  ")),
            Err(e) => tracing::warn!("Invalid progress bar template: {}", e),
        }
        bar.set_message(message.to_string());
        bar
    }

    /// Remove every bar so results print on a clean terminal.
    pub fn finish(&self) {
        if let Err(e) = self.multi.clear() {
            tracing::debug!("Failed to clear progress bars: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_flag_disables_progress() {
        let config = ProgressConfig::from_env(true, 0);
        assert!(!config.wants_progress());
        assert!(!config.should_show_progress());
    }

    #[test]
    fn test_debug_logging_disables_progress() {
        let config = ProgressConfig {
            quiet: false,
            verbosity: 2,
        };
        assert!(!config.wants_progress());

        let info = ProgressConfig {
            quiet: false,
            verbosity: 1,
        };
        assert!(info.wants_progress());
    }

    #[test]
    fn test_hidden_bar_when_quiet() {
        let manager = ProgressManager::new(ProgressConfig {
            quiet: true,
            verbosity: 0,
        });
        let bar = manager.transaction_bar("Mining history");
        assert!(bar.is_hidden());
        manager.finish();
    }
}
