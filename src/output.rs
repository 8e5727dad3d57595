//! Output writers for generated records.

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;
use synth_core::Value;
use synth_generator::GenerationOutput;
use tracing::info;

/// Output encoding for generated records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `{"seed_used": .., "records": [..]}`
    #[default]
    Json,
    /// One JSON object per record
    Jsonl,
    /// Header row from the field order, nulls as empty cells
    Csv,
}

/// Write `output` to `writer`.
///
/// `fields` gives the CSV column order; it is ignored by the JSON formats.
pub fn write_output<W: Write>(
    output: &GenerationOutput,
    fields: &[&str],
    format: OutputFormat,
    mut writer: W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, output)
                .context("Failed to write JSON output")?;
            writeln!(writer)?;
        }
        OutputFormat::Jsonl => {
            info!("Writing {} records (seed {})", output.records.len(), output.seed_used);
            for record in &output.records {
                serde_json::to_writer(&mut writer, record)
                    .with_context(|| format!("Failed to write record {}", record.index))?;
                writeln!(writer)?;
            }
        }
        OutputFormat::Csv => {
            info!("Writing {} records (seed {})", output.records.len(), output.seed_used);
            let mut csv = csv::Writer::from_writer(&mut writer);
            csv.write_record(fields)
                .context("Failed to write CSV header")?;
            for record in &output.records {
                let row = fields
                    .iter()
                    .map(|name| record.get(name).map(csv_cell).unwrap_or_default());
                csv.write_record(row)
                    .with_context(|| format!("Failed to write record {}", record.index))?;
            }
            csv.flush().context("Failed to flush CSV output")?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
