use crate::core::{Error, OperationRecord, Result, RunStats};
use crate::io::output::OutputWriter;
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::Path;

/// Render records as indented JSON, in acceptance order.
pub fn to_json(records: &[OperationRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write the export document to `path`. The records are not modified.
pub fn export_to_file(records: &[OperationRecord], path: &Path) -> Result<()> {
    let json = to_json(records)?;
    std::fs::write(path, json).map_err(|source| Error::Export {
        path: path.to_path_buf(),
        source,
    })
}

/// `trafficminer_export_YYYYmmdd_HHMMSS.json` for the given moment.
pub fn default_export_file_name(now: DateTime<Local>) -> String {
    format!("trafficminer_export_{}.json", now.format("%Y%m%d_%H%M%S"))
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(
        &mut self,
        records: &[OperationRecord],
        _stats: &RunStats,
    ) -> anyhow::Result<()> {
        let json = to_json(records)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}
