use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, Float64Array};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::format::TableFormat;
use super::model::{DistanceKind, DistanceTable, Sample};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a distance table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.txt` / `.dat` – whitespace-delimited `z distance` rows (primary)
/// * `.csv`          – header `z,distance_mpc`
/// * `.json`         – `[{ "z": ..., "distance_mpc": ... }, ...]`
/// * `.parquet`      – Float64 columns `z` and `distance_mpc`
pub fn load_table(path: &Path, kind: DistanceKind) -> Result<DistanceTable> {
    let loaded = match TableFormat::from_path(path)? {
        TableFormat::Text => load_text(path, kind),
        TableFormat::Csv => load_csv(path, kind),
        TableFormat::Json => load_json(path, kind),
        TableFormat::Parquet => load_parquet(path, kind),
    };
    let table = loaded.with_context(|| format!("loading {}", path.display()))?;

    log::debug!(
        "Loaded {} {} rows from {}",
        table.len(),
        kind.label(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Text loader
// ---------------------------------------------------------------------------

/// Rows are two whitespace-separated floats. Blank lines are skipped; any
/// other deviation is an error naming the 1-based line number.
fn load_text(path: &Path, kind: DistanceKind) -> Result<DistanceTable> {
    let text = std::fs::read_to_string(path).context("reading text table")?;
    parse_text(&text, kind)
}

pub fn parse_text(text: &str, kind: DistanceKind) -> Result<DistanceTable> {
    let mut table = DistanceTable::with_capacity(kind, text.lines().count());

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let mut fields = line.split_whitespace();
        let (z, d) = match (fields.next(), fields.next(), fields.next()) {
            (None, _, _) => continue,
            (Some(z), Some(d), None) => (z, d),
            _ => bail!("line {line_no}: expected 2 columns in '{line}'"),
        };
        let z = parse_float(z, line_no, "z")?;
        let distance_mpc = parse_float(d, line_no, "distance")?;
        table.push(Sample { z, distance_mpc });
    }

    Ok(table)
}

fn parse_float(tok: &str, line_no: usize, col: &str) -> Result<f64> {
    tok.parse::<f64>()
        .with_context(|| format!("line {line_no}, {col}: '{tok}' is not a number"))
}

// ---------------------------------------------------------------------------
// CSV / JSON loaders
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, kind: DistanceKind) -> Result<DistanceTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let mut table = DistanceTable::with_capacity(kind, 0);

    for (row_no, result) in reader.deserialize::<Sample>().enumerate() {
        let sample = result.with_context(|| format!("CSV row {row_no}"))?;
        table.push(sample);
    }

    Ok(table)
}

fn load_json(path: &Path, kind: DistanceKind) -> Result<DistanceTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<Sample> = serde_json::from_str(&text).context("parsing JSON")?;
    Ok(DistanceTable::from_samples(kind, records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet(path: &Path, kind: DistanceKind) -> Result<DistanceTable> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut table = DistanceTable::with_capacity(kind, 0);

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let z = f64_column(&batch, "z")?;
        let d = f64_column(&batch, "distance_mpc")?;

        for row in 0..batch.num_rows() {
            if z.is_null(row) || d.is_null(row) {
                bail!("Row {row}: null value");
            }
            table.push(Sample {
                z: z.value(row),
                distance_mpc: d.value(row),
            });
        }
    }

    Ok(table)
}

fn f64_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Float64Array> {
    let col = batch
        .column_by_name(name)
        .with_context(|| format!("Parquet file missing '{name}' column"))?;
    col.as_any()
        .downcast_ref::<Float64Array>()
        .with_context(|| format!("column '{name}' is {:?}, expected Float64", col.data_type()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::writer::write_table;

    fn sample_table(kind: DistanceKind) -> DistanceTable {
        DistanceTable::from_samples(
            kind,
            [
                Sample { z: 0.0, distance_mpc: 0.0 },
                Sample { z: 0.1, distance_mpc: 395.232_757_509_563_84 },
                Sample { z: 0.30000000000000004, distance_mpc: 1012.0000000001 },
                Sample { z: 999.9, distance_mpc: 13_931.868_610_963_98 },
            ],
        )
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-15 * a.abs().max(b.abs())
    }

    #[test]
    fn text_round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ang_dia_dist_vs_z.txt");
        let table = sample_table(DistanceKind::AngularDiameter);
        write_table(&path, &table).unwrap();
        assert_eq!(load_table(&path, DistanceKind::AngularDiameter).unwrap(), table);
    }

    #[test]
    fn reads_whitespace_rows() {
        let text = "0.0  0.0\n0.1\t395.2\n\n  1.0   1703.158  \n";
        let t = parse_text(text, DistanceKind::AngularDiameter).unwrap();
        assert_eq!(t.z, vec![0.0, 0.1, 1.0]);
        assert_eq!(t.distance_mpc, vec![0.0, 395.2, 1703.158]);
        assert_eq!(t.kind, DistanceKind::AngularDiameter);
    }

    #[test]
    fn malformed_rows_are_fatal() {
        let err = parse_text("0 0\n0.1 abc\n", DistanceKind::Comoving).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"), "{err:#}");

        assert!(parse_text("0.1\n", DistanceKind::Comoving).is_err());
        assert!(parse_text("0.1 2 3\n", DistanceKind::Comoving).is_err());
    }

    #[test]
    fn every_format_reloads_values() {
        let dir = tempfile::tempdir().unwrap();
        let table = sample_table(DistanceKind::Comoving);
        for ext in ["txt", "csv", "json", "parquet"] {
            let path = dir.path().join(format!("comov_dist_vs_z.{ext}"));
            write_table(&path, &table).unwrap();
            let back = load_table(&path, DistanceKind::Comoving).unwrap();
            assert_eq!(back.kind, table.kind);
            assert_eq!(back.len(), table.len(), "format .{ext}");
            for (a, b) in back.samples().zip(table.samples()) {
                assert!(
                    close(a.z, b.z) && close(a.distance_mpc, b.distance_mpc),
                    "format .{ext}: {a:?} vs {b:?}"
                );
            }
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&dir.path().join("absent.txt"), DistanceKind::Comoving);
        assert!(err.is_err());
    }

    #[test]
    fn csv_with_wrong_header_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "redshift,dist\n1,2\n").unwrap();
        assert!(load_table(&path, DistanceKind::Comoving).is_err());
    }
}
