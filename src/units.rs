/// Giga-light-years per megaparsec.
pub const MPC_TO_GLY: f64 = 0.003_263_797_744_537_1;

pub fn mpc_to_gly(mpc: f64) -> f64 {
    mpc * MPC_TO_GLY
}

pub fn gly_to_mpc(gly: f64) -> f64 {
    gly / MPC_TO_GLY
}
