use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::cosmology::{
    angular_diameter_distance, comoving_distance, CosmologyError, CosmologyParameters,
};

// ---------------------------------------------------------------------------
// DistanceKind – which distance measure a table holds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceKind {
    AngularDiameter,
    Comoving,
}

impl DistanceKind {
    pub const ALL: [DistanceKind; 2] = [DistanceKind::AngularDiameter, DistanceKind::Comoving];

    /// Curve label used in the figure legend.
    pub fn label(self) -> &'static str {
        match self {
            DistanceKind::AngularDiameter => "Ang. Dia. Distance",
            DistanceKind::Comoving => "Comoving Distance",
        }
    }

    /// File name without extension.
    pub fn file_stem(self) -> &'static str {
        match self {
            DistanceKind::AngularDiameter => "ang_dia_dist_vs_z",
            DistanceKind::Comoving => "comov_dist_vs_z",
        }
    }

    /// Evaluate this distance in Mpc.
    pub fn compute(self, z: f64, params: &CosmologyParameters) -> Result<f64, CosmologyError> {
        match self {
            DistanceKind::AngularDiameter => angular_diameter_distance(z, params),
            DistanceKind::Comoving => comoving_distance(z, params),
        }
    }
}

// ---------------------------------------------------------------------------
// Sample – one row of a table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub z: f64,
    pub distance_mpc: f64,
}

// ---------------------------------------------------------------------------
// DistanceTable – parallel z / distance columns for one kind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTable {
    pub kind: DistanceKind,
    /// Redshift column, ascending in grid order.
    pub z: Vec<f64>,
    /// Distance column in Mpc – same length as `z`.
    pub distance_mpc: Vec<f64>,
}

impl DistanceTable {
    pub fn with_capacity(kind: DistanceKind, capacity: usize) -> Self {
        Self {
            kind,
            z: Vec::with_capacity(capacity),
            distance_mpc: Vec::with_capacity(capacity),
        }
    }

    pub fn from_samples(kind: DistanceKind, samples: impl IntoIterator<Item = Sample>) -> Self {
        let mut table = Self::with_capacity(kind, 0);
        for s in samples {
            table.push(s);
        }
        table
    }

    pub fn push(&mut self, sample: Sample) {
        self.z.push(sample.z);
        self.distance_mpc.push(sample.distance_mpc);
    }

    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<Sample> {
        Some(Sample {
            z: *self.z.get(idx)?,
            distance_mpc: *self.distance_mpc.get(idx)?,
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.z
            .iter()
            .zip(&self.distance_mpc)
            .map(|(&z, &distance_mpc)| Sample { z, distance_mpc })
    }
}

// ---------------------------------------------------------------------------
// DistanceTables – one table per kind over a shared z column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTables {
    pub angular: DistanceTable,
    pub comoving: DistanceTable,
}

impl DistanceTables {
    /// Pair two tables, requiring identical z columns.
    pub fn pair(angular: DistanceTable, comoving: DistanceTable) -> Result<Self> {
        if angular.is_empty() || comoving.is_empty() {
            bail!(
                "cannot pair empty tables ({} and {} rows)",
                angular.len(),
                comoving.len()
            );
        }
        if angular.kind != DistanceKind::AngularDiameter || comoving.kind != DistanceKind::Comoving
        {
            bail!(
                "table kinds out of order: {:?}, {:?}",
                angular.kind,
                comoving.kind
            );
        }
        if angular.len() != comoving.len() {
            bail!(
                "angular table has {} rows but comoving table has {}",
                angular.len(),
                comoving.len()
            );
        }
        if let Some(row) = angular.z.iter().zip(&comoving.z).position(|(a, c)| a != c) {
            bail!(
                "z columns differ at row {row}: {} vs {}",
                angular.z[row],
                comoving.z[row]
            );
        }
        Ok(Self { angular, comoving })
    }

    pub fn get(&self, kind: DistanceKind) -> &DistanceTable {
        match kind {
            DistanceKind::AngularDiameter => &self.angular,
            DistanceKind::Comoving => &self.comoving,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DistanceTable> {
        DistanceKind::ALL.into_iter().map(move |kind| self.get(kind))
    }

    pub fn len(&self) -> usize {
        self.angular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angular.is_empty()
    }
}

// ---------------------------------------------------------------------------
// RedshiftGrid – start, exclusive stop, uniform step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RedshiftGrid {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl RedshiftGrid {
    #[cfg(test)]
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self> {
        let grid = Self { start, stop, step };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.start.is_finite() && self.stop.is_finite() && self.step.is_finite()) {
            bail!("redshift grid bounds must be finite: {self:?}");
        }
        if self.step <= 0.0 {
            bail!("redshift grid step must be positive, got {}", self.step);
        }
        if self.is_empty() {
            bail!(
                "redshift grid [{}, {}) step {} holds no points",
                self.start,
                self.stop,
                self.step
            );
        }
        Ok(())
    }

    /// Number of points in `[start, stop)`.
    pub fn len(&self) -> usize {
        let n = (self.stop - self.start) / self.step;
        (n - 1e-9).ceil().max(0.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn point(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.point(i))
    }
}

impl Default for RedshiftGrid {
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: 1000.0,
            step: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(kind: DistanceKind, rows: &[(f64, f64)]) -> DistanceTable {
        DistanceTable::from_samples(
            kind,
            rows.iter().map(|&(z, distance_mpc)| Sample { z, distance_mpc }),
        )
    }

    #[test]
    fn default_grid_has_ten_thousand_points() {
        let grid = RedshiftGrid::default();
        assert_eq!(grid.len(), 10_000);
        assert_eq!(grid.point(0), 0.0);
        assert!((grid.point(9_999) - 999.9).abs() < 1e-9);
        let points: Vec<f64> = grid.iter().collect();
        assert_eq!(points.len(), 10_000);
        for w in points.windows(2) {
            assert!((w[1] - w[0] - 0.1).abs() < 1e-9);
        }
    }

    #[test]
    fn grid_stop_is_exclusive() {
        let grid = RedshiftGrid::new(0.0, 1.0, 0.25).unwrap();
        assert_eq!(grid.iter().collect::<Vec<_>>(), vec![0.0, 0.25, 0.5, 0.75]);
        let grid = RedshiftGrid::new(0.0, 1.1, 0.25).unwrap();
        assert_eq!(grid.len(), 5);
    }

    #[test]
    fn invalid_grids_are_rejected() {
        assert!(RedshiftGrid::new(0.0, 1.0, 0.0).is_err());
        assert!(RedshiftGrid::new(0.0, 1.0, -0.1).is_err());
        assert!(RedshiftGrid::new(2.0, 1.0, 0.1).is_err());
        assert!(RedshiftGrid::new(0.0, f64::INFINITY, 0.1).is_err());
        assert!(RedshiftGrid::new(1.0, 1.0 + 1e-12, 0.1).is_err());
        assert!(!RedshiftGrid::default().is_empty());
    }

    #[test]
    fn labels_and_stems() {
        assert_eq!(DistanceKind::AngularDiameter.label(), "Ang. Dia. Distance");
        assert_eq!(DistanceKind::Comoving.label(), "Comoving Distance");
        assert_eq!(DistanceKind::AngularDiameter.file_stem(), "ang_dia_dist_vs_z");
        assert_eq!(DistanceKind::Comoving.file_stem(), "comov_dist_vs_z");
    }

    #[test]
    fn pairing_requires_matching_z_columns() {
        let a = table(DistanceKind::AngularDiameter, &[(0.0, 0.0), (1.0, 1700.0)]);
        let c = table(DistanceKind::Comoving, &[(0.0, 0.0), (1.0, 3400.0)]);
        let pair = DistanceTables::pair(a.clone(), c).unwrap();
        assert_eq!(pair.len(), 2);
        assert_eq!(pair.get(DistanceKind::Comoving).distance_mpc[1], 3400.0);
        let kinds: Vec<DistanceKind> = pair.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, DistanceKind::ALL);
        assert!(!pair.is_empty());

        let shifted = table(DistanceKind::Comoving, &[(0.0, 0.0), (1.1, 3400.0)]);
        assert!(DistanceTables::pair(a.clone(), shifted).is_err());

        let short = table(DistanceKind::Comoving, &[(0.0, 0.0)]);
        assert!(DistanceTables::pair(a.clone(), short).is_err());

        assert!(DistanceTables::pair(a.clone(), a).is_err());

        let empty = DistanceTable::with_capacity(DistanceKind::Comoving, 0);
        assert!(DistanceTables::pair(
            DistanceTable::with_capacity(DistanceKind::AngularDiameter, 0),
            empty
        )
        .is_err());
    }

    #[test]
    fn rows_are_addressable_by_index() {
        let t = table(DistanceKind::Comoving, &[(1.0, 1000.0)]);
        assert_eq!(t.get(0), Some(Sample { z: 1.0, distance_mpc: 1000.0 }));
        assert_eq!(t.get(1), None);
    }
}
