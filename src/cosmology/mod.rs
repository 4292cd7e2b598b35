/// Cosmology layer: parameters, distance integrals, quadrature.
///
/// Architecture:
/// ```text
///   CosmologyParameters (Ωm0, ΩΛ, Ωk0, h)
///        │
///        ▼
///   ┌──────────┐
///   │ distance  │  E(z), D_C, D_M, D_A  (Mpc)
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ quadrature  │  adaptive Simpson over x = ln(1+z)
///   └────────────┘
/// ```

pub mod distance;
pub mod params;
pub mod quadrature;

use thiserror::Error;

pub use distance::{angular_diameter_distance, comoving_distance};
pub use params::CosmologyParameters;

/// Failures of a distance evaluation. All of them are fatal to a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CosmologyError {
    #[error("invalid cosmological parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("redshift must be finite and non-negative, got {0}")]
    InvalidRedshift(f64),

    #[error("expansion rate E(z)^2 is not positive at z = {z}")]
    NonPhysicalExpansion { z: f64 },

    #[error("distance integral to z = {z} did not converge")]
    NoConvergence { z: f64 },
}
