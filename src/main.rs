use anyhow::Result;
use clap::Parser;
use trafficminer::cli::{Cli, Commands};
use trafficminer::commands::{self, ExtractArgs};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.verbosity());

    match cli.command {
        Commands::Extract {
            input,
            input_format,
            config,
            scope,
            exclude,
            no_graphql,
            no_rest,
            encoding,
            format,
            output,
            export,
            details,
            color,
            quiet,
            verbosity,
        } => commands::handle_extract(ExtractArgs {
            input,
            input_format,
            config,
            scope,
            exclude,
            no_graphql,
            no_rest,
            encoding,
            format,
            output,
            export,
            details,
            color,
            quiet,
            verbosity,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}

/// Log to stderr. `RUST_LOG` wins over the `-v` count.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("trafficminer={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
