use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cosmology::CosmologyParameters;
use crate::data::format::TableFormat;
use crate::data::model::{DistanceKind, RedshiftGrid};

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Everything a run depends on. Built once in `main`, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub cosmology: CosmologyParameters,
    pub grid: RedshiftGrid,
    pub output: OutputConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cosmology: CosmologyParameters::PLANCK_2013,
            grid: RedshiftGrid::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Where the tables, the figure and the manifest are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub table_format: TableFormat,
    pub figure_name: String,
    pub manifest_name: String,
    /// Figure size in SVG user units (PDF points).
    pub figure_size: (u32, u32),
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            table_format: TableFormat::Text,
            figure_name: "distances_in_cosmology.pdf".to_string(),
            manifest_name: "distances_in_cosmology.json".to_string(),
            figure_size: (800, 600),
        }
    }
}

impl OutputConfig {
    pub fn table_path(&self, kind: DistanceKind) -> PathBuf {
        self.dir
            .join(format!("{}.{}", kind.file_stem(), self.table_format.extension()))
    }

    pub fn figure_path(&self) -> PathBuf {
        self.dir.join(&self.figure_name)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(&self.manifest_name)
    }
}

// ---------------------------------------------------------------------------
// Run manifest
// ---------------------------------------------------------------------------

/// Record of a completed run, written next to its outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub version: String,
    pub config: RunConfig,
    pub samples: usize,
    pub outputs: Vec<PathBuf>,
}

impl RunManifest {
    pub fn new(config: &RunConfig, samples: usize, outputs: Vec<PathBuf>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: config.clone(),
            samples,
            outputs,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing run manifest")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }

    #[cfg(test)]
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).context("parsing run manifest")
    }
}
