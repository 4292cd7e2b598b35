use anyhow::{Context, Result};

use crate::config::{RunConfig, RunManifest};
use crate::data::loader::load_table;
use crate::data::model::{DistanceKind, DistanceTables};
use crate::data::sampler::tabulate;
use crate::data::writer::write_table;
use crate::render::render_figure;

/// compute → persist → reload → render → manifest.
///
/// Returns the tables as read back from disk.
pub fn run(config: &RunConfig) -> Result<DistanceTables> {
    let out = &config.output;
    std::fs::create_dir_all(&out.dir)
        .with_context(|| format!("creating output directory {}", out.dir.display()))?;

    let computed = tabulate(&config.grid, &config.cosmology)?;

    let mut outputs = Vec::new();
    for table in computed.iter() {
        let path = out.table_path(table.kind);
        write_table(&path, table)?;
        outputs.push(path);
    }
    log::info!("Wrote {} rows per table", computed.len());
    drop(computed);

    let tables = reload(config)?;

    let figure = out.figure_path();
    render_figure(&figure, &tables, out.figure_size)?;
    outputs.push(figure);

    let manifest_path = out.manifest_path();
    RunManifest::new(config, tables.len(), outputs).write(&manifest_path)?;
    log::debug!("Wrote run manifest to {}", manifest_path.display());

    Ok(tables)
}

/// Read both tables from the configured output locations.
pub fn reload(config: &RunConfig) -> Result<DistanceTables> {
    let angular = load_table(
        &config.output.table_path(DistanceKind::AngularDiameter),
        DistanceKind::AngularDiameter,
    )?;
    let comoving = load_table(
        &config.output.table_path(DistanceKind::Comoving),
        DistanceKind::Comoving,
    )?;
    DistanceTables::pair(angular, comoving).context("reloaded tables do not line up")
}
