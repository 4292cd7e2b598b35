use anyhow::{Context, Result};

use super::model::{DistanceKind, DistanceTable, DistanceTables, RedshiftGrid, Sample};
use crate::cosmology::CosmologyParameters;

/// Evaluate both distance kinds at every grid point, in ascending z.
pub fn tabulate(grid: &RedshiftGrid, params: &CosmologyParameters) -> Result<DistanceTables> {
    grid.validate()?;
    params.validate().context("cosmological parameters")?;

    let n = grid.len();
    let mut angular = DistanceTable::with_capacity(DistanceKind::AngularDiameter, n);
    let mut comoving = DistanceTable::with_capacity(DistanceKind::Comoving, n);

    log::info!(
        "Tabulating {n} redshifts in [{}, {}) step {}",
        grid.start,
        grid.stop,
        grid.step
    );

    let report_every = (n / 10).max(1);
    for (i, z) in grid.iter().enumerate() {
        for table in [&mut angular, &mut comoving] {
            let distance_mpc = table
                .kind
                .compute(z, params)
                .with_context(|| format!("{} at z = {z}", table.kind.label()))?;
            table.push(Sample { z, distance_mpc });
        }
        if (i + 1) % report_every == 0 {
            log::info!("  {:>3}% ({}/{n})", (i + 1) * 100 / n, i + 1);
        }
    }

    DistanceTables::pair(angular, comoving)
}
