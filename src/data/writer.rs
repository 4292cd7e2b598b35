use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::Float64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::format::TableFormat;
use super::model::DistanceTable;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write a table to `path`, creating or truncating it. Dispatch by extension.
///
/// The file is flushed and closed before this returns.
pub fn write_table(path: &Path, table: &DistanceTable) -> Result<()> {
    let written = match TableFormat::from_path(path)? {
        TableFormat::Text => write_text(path, table),
        TableFormat::Csv => write_csv(path, table),
        TableFormat::Json => write_json(path, table),
        TableFormat::Parquet => write_parquet(path, table),
    };
    written.with_context(|| format!("writing {}", path.display()))?;

    log::debug!(
        "Wrote {} {} rows to {}",
        table.len(),
        table.kind.label(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Text writer
// ---------------------------------------------------------------------------

/// One `z  distance` row per sample, shortest round-trip float formatting.
fn write_text(path: &Path, table: &DistanceTable) -> Result<()> {
    let file = File::create(path).context("creating text table")?;
    let mut out = BufWriter::new(file);
    for s in table.samples() {
        writeln!(out, "{}  {}", float_cell(s.z), float_cell(s.distance_mpc))?;
    }
    out.flush().context("flushing text table")?;
    Ok(())
}

/// Whole numbers keep a trailing `.0` so every cell reads as a float.
fn float_cell(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

// ---------------------------------------------------------------------------
// CSV / JSON writers
// ---------------------------------------------------------------------------

fn write_csv(path: &Path, table: &DistanceTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for s in table.samples() {
        writer.serialize(s).context("serializing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_json(path: &Path, table: &DistanceTable) -> Result<()> {
    let file = File::create(path).context("creating JSON file")?;
    let mut out = BufWriter::new(file);
    let records: Vec<_> = table.samples().collect();
    serde_json::to_writer(&mut out, &records).context("serializing JSON")?;
    out.flush().context("flushing JSON")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet writer
// ---------------------------------------------------------------------------

fn write_parquet(path: &Path, table: &DistanceTable) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("z", DataType::Float64, false),
        Field::new("distance_mpc", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from(table.z.clone())),
            Arc::new(Float64Array::from(table.distance_mpc.clone())),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
