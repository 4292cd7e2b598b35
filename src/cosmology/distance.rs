use super::quadrature::{QuadratureError, Simpson};
use super::{CosmologyError, CosmologyParameters};

const QUADRATURE: Simpson = Simpson {
    tolerance: 1e-10,
    max_depth: 50,
};

fn check_redshift(z: f64) -> Result<(), CosmologyError> {
    if z.is_finite() && z >= 0.0 {
        Ok(())
    } else {
        Err(CosmologyError::InvalidRedshift(z))
    }
}

/// Dimensionless Hubble parameter E(z) = H(z) / H0.
pub fn e_z(z: f64, params: &CosmologyParameters) -> Result<f64, CosmologyError> {
    check_redshift(z)?;
    let e2 = params.e_z_squared(z);
    if e2 > 0.0 {
        Ok(e2.sqrt())
    } else {
        Err(CosmologyError::NonPhysicalExpansion { z })
    }
}

/// Line-of-sight comoving distance in Mpc.
///
/// D_C = D_H ∫₀^z dz' / E(z'), integrated over x = ln(1 + z) so the
/// integrand (1 + z) / E(z) stays smooth at high redshift.
pub fn comoving_distance(z: f64, params: &CosmologyParameters) -> Result<f64, CosmologyError> {
    params.validate()?;
    check_redshift(z)?;
    if z == 0.0 {
        return Ok(0.0);
    }

    let integrand = |x: f64| {
        let a = x.exp();
        let e2 = params.e_z_squared(a - 1.0);
        if e2 > 0.0 {
            a / e2.sqrt()
        } else {
            f64::NAN
        }
    };

    let integral = QUADRATURE
        .integrate(integrand, 0.0, z.ln_1p())
        .map_err(|err| match err {
            QuadratureError::NonFinite { x } => {
                CosmologyError::NonPhysicalExpansion { z: x.exp_m1() }
            }
            QuadratureError::NoConvergence { .. } => CosmologyError::NoConvergence { z },
        })?;

    Ok(params.hubble_distance_mpc() * integral)
}

/// Transverse comoving distance D_M in Mpc. Equal to D_C for a flat universe.
pub fn transverse_comoving_distance(
    z: f64,
    params: &CosmologyParameters,
) -> Result<f64, CosmologyError> {
    let d_c = comoving_distance(z, params)?;
    let omega_k = params.omega_k_0;
    if omega_k == 0.0 {
        return Ok(d_c);
    }

    let d_h = params.hubble_distance_mpc();
    let root = omega_k.abs().sqrt();
    let chi = root * d_c / d_h;
    let d_m = if omega_k > 0.0 {
        d_h / root * chi.sinh()
    } else {
        d_h / root * chi.sin()
    };
    Ok(d_m)
}

/// Angular-diameter distance D_A = D_M / (1 + z) in Mpc.
pub fn angular_diameter_distance(
    z: f64,
    params: &CosmologyParameters,
) -> Result<f64, CosmologyError> {
    Ok(transverse_comoving_distance(z, params)? / (1.0 + z))
}
