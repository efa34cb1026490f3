use crate::extraction::{BodyEncoding, FilterPolicy};
use crate::io::output::OutputFormat;
use crate::io::InputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for trafficminer
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrafficMinerConfig {
    /// Include toggles for GraphQL and REST operations
    #[serde(default)]
    pub filters: Option<FilterPolicy>,

    /// Target scope patterns
    #[serde(default)]
    pub scope: Option<ScopeConfig>,

    /// History input configuration
    #[serde(default)]
    pub input: Option<InputConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

/// Host or URL glob patterns
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScopeConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default)]
    pub format: InputFormat,
    /// Byte-to-text convention for captured messages
    #[serde(default)]
    pub encoding: BodyEncoding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// `terminal` or `json`
    pub default_format: Option<String>,
    /// Directory for timestamped export files
    pub export_dir: Option<PathBuf>,
}

impl TrafficMinerConfig {
    pub fn filter_policy(&self) -> FilterPolicy {
        self.filters.unwrap_or_default()
    }

    pub fn scope(&self) -> ScopeConfig {
        self.scope.clone().unwrap_or_default()
    }

    pub fn input(&self) -> InputConfig {
        self.input.unwrap_or_default()
    }

    /// Configured default output format, ignoring unknown values.
    pub fn default_format(&self) -> Option<OutputFormat> {
        let name = self.output.as_ref()?.default_format.as_deref()?;
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "terminal" => Some(OutputFormat::Terminal),
            other => {
                tracing::warn!("Unknown output format '{}' in config; ignoring", other);
                None
            }
        }
    }

    pub fn export_dir(&self) -> Option<PathBuf> {
        self.output.as_ref().and_then(|o| o.export_dir.clone())
    }
}
