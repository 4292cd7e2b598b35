use serde::{Deserialize, Serialize};

use super::CosmologyError;

/// Speed of light in km/s.
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

// ---------------------------------------------------------------------------
// CosmologyParameters – the fixed FLRW parameter set
// ---------------------------------------------------------------------------

/// Density parameters and reduced Hubble constant (H0 = 100 h km/s/Mpc).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CosmologyParameters {
    /// Matter density today, Ωm0.
    pub omega_m_0: f64,
    /// Dark-energy density, ΩΛ.
    pub omega_lambda_0: f64,
    /// Curvature density today, Ωk0.
    pub omega_k_0: f64,
    /// Reduced Hubble constant.
    pub h: f64,
}

impl CosmologyParameters {
    /// Planck 2013 values, spatially flat.
    pub const PLANCK_2013: CosmologyParameters = CosmologyParameters {
        omega_m_0: 0.315,
        omega_lambda_0: 0.685,
        omega_k_0: 0.0,
        h: 0.673,
    };

    /// Reject parameter sets no distance can be computed for.
    pub fn validate(&self) -> Result<(), CosmologyError> {
        let fields = [
            ("omega_m_0", self.omega_m_0),
            ("omega_lambda_0", self.omega_lambda_0),
            ("omega_k_0", self.omega_k_0),
            ("h", self.h),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CosmologyError::InvalidParameter { name, value });
            }
        }
        if self.h <= 0.0 {
            return Err(CosmologyError::InvalidParameter {
                name: "h",
                value: self.h,
            });
        }
        if self.omega_m_0 < 0.0 {
            return Err(CosmologyError::InvalidParameter {
                name: "omega_m_0",
                value: self.omega_m_0,
            });
        }
        Ok(())
    }

    /// Hubble constant in km/s/Mpc.
    pub fn hubble_constant(&self) -> f64 {
        100.0 * self.h
    }

    /// Hubble distance c / H0 in Mpc.
    pub fn hubble_distance_mpc(&self) -> f64 {
        SPEED_OF_LIGHT_KM_S / self.hubble_constant()
    }

    /// Square of the dimensionless Hubble parameter E(z) = H(z) / H0.
    pub fn e_z_squared(&self, z: f64) -> f64 {
        let a = 1.0 + z;
        self.omega_m_0 * a * a * a + self.omega_k_0 * a * a + self.omega_lambda_0
    }
}

impl Default for CosmologyParameters {
    fn default() -> Self {
        Self::PLANCK_2013
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planck_is_flat_and_valid() {
        let p = CosmologyParameters::PLANCK_2013;
        assert!(p.validate().is_ok());
        assert_eq!(p.omega_k_0, 0.0);
        assert!((p.omega_m_0 + p.omega_lambda_0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn hubble_distance_for_planck() {
        let d_h = CosmologyParameters::PLANCK_2013.hubble_distance_mpc();
        assert!((d_h - 4454.569).abs() < 1e-2, "got {d_h}");
    }

    #[test]
    fn e_z_is_one_today() {
        let p = CosmologyParameters::PLANCK_2013;
        assert!((p.e_z_squared(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_h() {
        let p = CosmologyParameters {
            h: 0.0,
            ..CosmologyParameters::PLANCK_2013
        };
        assert_eq!(
            p.validate(),
            Err(CosmologyError::InvalidParameter { name: "h", value: 0.0 })
        );
    }

    #[test]
    fn rejects_nan_density() {
        let p = CosmologyParameters {
            omega_lambda_0: f64::NAN,
            ..CosmologyParameters::PLANCK_2013
        };
        assert!(matches!(
            p.validate(),
            Err(CosmologyError::InvalidParameter {
                name: "omega_lambda_0",
                ..
            })
        ));
    }
}
