use crate::core::{OperationRecord, RunStats};
use crate::io::writers::{JsonWriter, TerminalWriter};
use std::io::Write;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    Terminal,
}

pub trait OutputWriter {
    fn write_results(&mut self, records: &[OperationRecord], stats: &RunStats)
        -> anyhow::Result<()>;
}

/// Build a writer for `format` on top of `out`.
///
/// `details` only affects terminal output, where it appends one block per
/// operation below the summary table.
pub fn create_writer(
    format: OutputFormat,
    out: Box<dyn Write>,
    details: bool,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(out).with_details(details)),
    }
}
