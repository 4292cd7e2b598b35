use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::config::RunConfig;
use crate::cosmology::distance::e_z;
use crate::cosmology::{CosmologyError, CosmologyParameters};
use crate::data::format::TableFormat;
use crate::data::loader::load_table;
use crate::data::model::{DistanceKind, DistanceTables};
use crate::data::writer::write_table;
use crate::pipeline;
use crate::render::render_figure;

// ---------------------------------------------------------------------------
// Redshift probe
// ---------------------------------------------------------------------------

/// Both distances evaluated live at a user-chosen redshift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReading {
    pub z: f64,
    /// E(z) = H(z) / H0.
    pub hubble_ratio: f64,
    pub angular_mpc: f64,
    pub comoving_mpc: f64,
}

impl ProbeReading {
    pub fn at(z: f64, params: &CosmologyParameters) -> Result<Self, CosmologyError> {
        Ok(Self {
            z,
            hubble_ratio: e_z(z, params)?,
            angular_mpc: DistanceKind::AngularDiameter.compute(z, params)?,
            comoving_mpc: DistanceKind::Comoving.compute(z, params)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Configuration the tables were produced with.
    pub config: RunConfig,

    /// Tables currently plotted.
    pub tables: Option<DistanceTables>,

    /// Redshift typed into the probe.
    pub probe_z: f64,

    /// Last probe evaluation.
    pub probe: Result<ProbeReading, CosmologyError>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: RunConfig, tables: DistanceTables) -> Self {
        let probe = ProbeReading::at(1.0, &config.cosmology);
        Self {
            config,
            tables: Some(tables),
            probe_z: 1.0,
            probe,
            status_message: None,
        }
    }

    /// Move the probe and re-evaluate both distances.
    pub fn set_probe_z(&mut self, z: f64) {
        self.probe_z = z;
        self.probe = ProbeReading::at(z, &self.config.cosmology);
    }

    /// Re-read both tables from the configured output paths.
    pub fn reload(&mut self) -> Result<()> {
        let tables = pipeline::reload(&self.config)?;
        self.set_tables(tables);
        Ok(())
    }

    /// Replace one table from a file, keeping the other one.
    pub fn open_table(&mut self, kind: DistanceKind, path: &Path) -> Result<()> {
        let loaded = load_table(path, kind)?;
        let Some(current) = &self.tables else {
            bail!("no tables loaded to pair with");
        };
        let tables = match kind {
            DistanceKind::AngularDiameter => DistanceTables::pair(loaded, current.comoving.clone()),
            DistanceKind::Comoving => DistanceTables::pair(current.angular.clone(), loaded),
        }
        .with_context(|| format!("{} does not match the other table", path.display()))?;
        self.set_tables(tables);
        Ok(())
    }

    /// Write the figure for the current tables.
    pub fn export_figure(&self, path: &Path) -> Result<()> {
        let tables = self.require_tables()?;
        render_figure(path, tables, self.config.output.figure_size)
    }

    /// Write both tables into `dir` using `format`; returns the written paths.
    pub fn export_tables(&self, dir: &Path, format: TableFormat) -> Result<Vec<PathBuf>> {
        let tables = self.require_tables()?;
        tables
            .iter()
            .map(|table| -> Result<PathBuf> {
                let path = dir.join(format!("{}.{}", table.kind.file_stem(), format.extension()));
                write_table(&path, table)?;
                Ok(path)
            })
            .collect()
    }

    fn set_tables(&mut self, tables: DistanceTables) {
        log::info!("Showing {} samples per table", tables.len());
        self.tables = Some(tables);
        self.status_message = None;
    }

    fn require_tables(&self) -> Result<&DistanceTables> {
        self.tables.as_ref().context("no tables loaded")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;
    use crate::data::model::{DistanceTable, RedshiftGrid, Sample};

    fn state_in(dir: &Path) -> AppState {
        let config = RunConfig {
            grid: RedshiftGrid::new(0.0, 2.0, 0.25).unwrap(),
            output: OutputConfig {
                dir: dir.to_path_buf(),
                ..OutputConfig::default()
            },
            ..RunConfig::default()
        };
        let tables = pipeline::run(&config).unwrap();
        AppState::new(config, tables)
    }

    #[test]
    fn probe_starts_at_unit_redshift() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let reading = state.probe.unwrap();
        assert_eq!(reading.z, 1.0);
        assert!((reading.hubble_ratio - (0.315f64 * 8.0 + 0.685).sqrt()).abs() < 1e-12);
        assert!((reading.comoving_mpc - 3406.3).abs() < 1.0);
        assert!((reading.angular_mpc - 1703.2).abs() < 0.5);
    }

    #[test]
    fn negative_probe_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.set_probe_z(-1.0);
        assert_eq!(state.probe, Err(CosmologyError::InvalidRedshift(-1.0)));
    }

    #[test]
    fn exports_and_reopens_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        let export_dir = tempfile::tempdir().unwrap();

        let written = state.export_tables(export_dir.path(), TableFormat::Json).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[1].ends_with("comov_dist_vs_z.json"));

        let before = state.tables.clone();
        state.open_table(DistanceKind::Comoving, &written[1]).unwrap();
        assert_eq!(state.tables.as_ref().map(|t| t.len()), before.map(|t| t.len()));

        for name in ["figure.svg", "figure.pdf"] {
            let figure = export_dir.path().join(name);
            state.export_figure(&figure).unwrap();
            assert!(figure.exists());
        }
    }

    #[test]
    fn mismatched_table_is_rejected_and_old_kept() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        let path = dir.path().join("short.txt");
        let short = DistanceTable::from_samples(
            DistanceKind::Comoving,
            [Sample { z: 0.0, distance_mpc: 0.0 }],
        );
        write_table(&path, &short).unwrap();

        assert!(state.open_table(DistanceKind::Comoving, &path).is_err());
        assert_eq!(state.tables.as_ref().map(|t| t.comoving.len()), Some(8));
        state.reload().unwrap();
    }
}
