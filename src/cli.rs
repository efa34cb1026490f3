use crate::extraction::BodyEncoding;
use crate::formatting::ColorMode;
use crate::io::output::OutputFormat;
use crate::io::InputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "trafficminer")]
#[command(
    about = "Extract unique REST and GraphQL operations from captured HTTP traffic",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract unique operations from a traffic history file
    Extract {
        /// HAR file or native capture file to read
        input: PathBuf,

        /// History file format
        #[arg(long = "input-format", value_enum)]
        input_format: Option<InputFormat>,

        /// Configuration file (defaults to .trafficminer.toml in this or a parent directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// In-scope host or URL glob; repeatable (defaults to everything)
        #[arg(long = "scope", value_name = "GLOB")]
        scope: Vec<String>,

        /// Out-of-scope host or URL glob; repeatable
        #[arg(long = "exclude", value_name = "GLOB")]
        exclude: Vec<String>,

        /// Leave GraphQL operations out of the results
        #[arg(long = "no-graphql")]
        no_graphql: bool,

        /// Leave REST operations out of the results
        #[arg(long = "no-rest")]
        no_rest: bool,

        /// Byte-to-text convention for captured messages
        #[arg(long, value_enum)]
        encoding: Option<BodyEncoding>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Export results as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export results to a timestamped JSON file
        #[arg(long)]
        export: bool,

        /// Print one block per operation below the summary table
        #[arg(long)]
        details: bool,

        /// Color output
        #[arg(long, value_enum, default_value = "auto")]
        color: ColorMode,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,

        /// Increase log verbosity (-v info, -vv debug, -vvv trace)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Self::Extract { verbosity, .. } => *verbosity,
            Self::Init { .. } => 0,
        }
    }
}
