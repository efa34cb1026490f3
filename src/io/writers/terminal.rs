use crate::core::{OperationRecord, RunStats};
use crate::io::output::OutputWriter;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use std::io::Write;

const MAX_URL_WIDTH: usize = 60;

pub struct TerminalWriter<W: Write> {
    writer: W,
    show_details: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_details: false,
        }
    }

    pub fn with_details(mut self, show_details: bool) -> Self {
        self.show_details = show_details;
        self
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_results(
        &mut self,
        records: &[OperationRecord],
        stats: &RunStats,
    ) -> anyhow::Result<()> {
        if records.is_empty() {
            writeln!(
                self.writer,
                "{}",
                "No unique operations found matching the selected criteria.".yellow()
            )?;
            self.write_stats(records, stats)?;
            return Ok(());
        }

        writeln!(self.writer, "{}", summary_table(records))?;
        if self.show_details {
            self.write_details(records)?;
        }
        self.write_stats(records, stats)
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_details(&mut self, records: &[OperationRecord]) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{}",
            format!("Found {} unique operations:", records.len()).bold()
        )?;
        writeln!(self.writer)?;

        for (i, op) in records.iter().enumerate() {
            writeln!(self.writer, "{}", format!("=== Operation {} ===", i + 1).cyan())?;
            writeln!(self.writer, "Method: {}", op.method)?;
            writeln!(self.writer, "URL: {}", op.url)?;
            writeln!(self.writer, "Status Code: {}", status_label(op))?;
            if let (Some(kind), Some(name)) =
                (&op.graphql_operation_type, &op.graphql_operation_name)
            {
                writeln!(
                    self.writer,
                    "GraphQL Operation: {} {}",
                    kind.as_str().to_uppercase(),
                    name
                )?;
            }
            writeln!(self.writer, "Has Request Body: {}", op.request_body.is_some())?;
            writeln!(self.writer, "Has Response Body: {}", op.response_body.is_some())?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_stats(&mut self, records: &[OperationRecord], stats: &RunStats) -> anyhow::Result<()> {
        let graphql = records.iter().filter(|r| r.is_graphql()).count();
        writeln!(
            self.writer,
            "{}",
            format!(
                "Found {} unique operations from {} total history items",
                records.len(),
                stats.total
            )
            .green()
        )?;
        writeln!(
            self.writer,
            "  {} GraphQL, {} REST | {} in scope, {} duplicates, {} filtered, {} unparseable URLs",
            graphql,
            records.len() - graphql,
            stats.in_scope,
            stats.duplicates,
            stats.filtered,
            stats.unparseable_urls
        )?;
        Ok(())
    }
}

fn summary_table(records: &[OperationRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "#",
        "Method",
        "URL",
        "Status",
        "Type",
        "Operation",
        "Req Body",
        "Resp Body",
    ]);

    for (i, op) in records.iter().enumerate() {
        let (kind, operation) = match (&op.graphql_operation_type, &op.graphql_operation_name) {
            (Some(kind), Some(name)) => (
                "GraphQL",
                format!("{} {}", kind.as_str().to_uppercase(), name),
            ),
            _ => ("REST API", "-".to_string()),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&op.method),
            Cell::new(truncate_url(&op.url)),
            Cell::new(status_label(op)),
            Cell::new(kind),
            Cell::new(operation),
            Cell::new(yes_no(op.request_body.is_some())),
            Cell::new(yes_no(op.response_body.is_some())),
        ]);
    }
    table
}

fn status_label(op: &OperationRecord) -> String {
    op.status_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Shorten long URLs to 57 characters plus an ellipsis.
fn truncate_url(url: &str) -> String {
    if url.chars().count() > MAX_URL_WIDTH {
        let head: String = url.chars().take(MAX_URL_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        url.to_string()
    }
}
