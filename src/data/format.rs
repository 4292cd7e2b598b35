use std::fmt;
use std::path::Path;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// On-disk table encodings, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Whitespace-delimited `z distance` rows, no header.
    Text,
    /// Header `z,distance_mpc`.
    Csv,
    /// Records array `[{ "z": …, "distance_mpc": … }, …]`.
    Json,
    /// Float64 columns `z` and `distance_mpc`.
    Parquet,
}

impl TableFormat {
    pub const ALL: [TableFormat; 4] = [
        TableFormat::Text,
        TableFormat::Csv,
        TableFormat::Json,
        TableFormat::Parquet,
    ];

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "txt" | "dat" => Ok(TableFormat::Text),
            "csv" => Ok(TableFormat::Csv),
            "json" => Ok(TableFormat::Json),
            "parquet" | "pq" => Ok(TableFormat::Parquet),
            other => bail!("Unsupported table extension: .{other}"),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Text => "txt",
            TableFormat::Csv => "csv",
            TableFormat::Json => "json",
            TableFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableFormat::Text => "Text",
            TableFormat::Csv => "CSV",
            TableFormat::Json => "JSON",
            TableFormat::Parquet => "Parquet",
        };
        write!(f, "{name}")
    }
}
