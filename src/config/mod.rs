//! Configuration loaded from `.trafficminer.toml`.
//!
//! The file is searched for in the working directory and its ancestors.
//! Every section is optional; command-line flags override file values.
//!
//! ```toml
//! [filters]
//! include_graphql = true
//! include_rest = true
//!
//! [scope]
//! include = ["*.example.com"]
//! exclude = ["cdn.example.com"]
//!
//! [input]
//! format = "auto"      # auto | har | capture
//! encoding = "latin1"  # latin1 | utf8
//!
//! [output]
//! default_format = "terminal"
//! export_dir = "exports"
//! ```

mod core;
mod loader;

pub use self::core::{InputConfig, OutputConfig, ScopeConfig, TrafficMinerConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_config, CONFIG_FILE_NAME,
};

/// Contents written by `trafficminer init`.
pub const DEFAULT_CONFIG: &str = r#"# TrafficMiner Configuration

[filters]
include_graphql = true
include_rest = true

[scope]
# Host globs (e.g. "*.example.com") or URL globs (e.g. "https://app.test/api/*").
# An empty include list puts every captured URL in scope.
include = []
exclude = []

[input]
# auto | har | capture
format = "auto"
# latin1 | utf8
encoding = "latin1"

[output]
default_format = "terminal"
"#;
