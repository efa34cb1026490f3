//! CLI command implementations.
//!
//! - **extract**: Mine a history file for unique REST and GraphQL operations
//! - **init**: Write a default `.trafficminer.toml`

pub mod extract;
pub mod init;

pub use extract::{handle_extract, ExtractArgs, ExtractConfig, ExportTarget};
pub use init::init_config;
