//! Fixed description of the comparison figure, shared by the SVG renderer
//! and the interactive plot.
//!
//! Both renderers draw in log10 coordinates: a curve point `(z, d)` is placed
//! at `(log10 z, log10 d_gly)` and the axes are labelled with the decade value.

use crate::data::model::DistanceTable;
use crate::units::mpc_to_gly;

pub const TITLE: &str = "Comparison of distance measures";
pub const X_LABEL: &str = "Redshift (z)";
pub const Y_LABEL: &str = "Distance in Gly";

/// Axis limits in data units.
pub const X_LIMITS: (f64, f64) = (1e-4, 1e4);
pub const Y_LIMITS: (f64, f64) = (1e-3, 1e2);

/// Decade exponents carrying a tick and a grid line.
pub const X_DECADES: std::ops::RangeInclusive<i32> = -4..=4;
pub const Y_DECADES: std::ops::RangeInclusive<i32> = -3..=2;

/// Axis limits in log10 coordinates, `(x_range, y_range)`.
pub fn log_bounds() -> ((f64, f64), (f64, f64)) {
    (
        (X_LIMITS.0.log10(), X_LIMITS.1.log10()),
        (Y_LIMITS.0.log10(), Y_LIMITS.1.log10()),
    )
}

/// Plain decimal label for 10^exp: `0.001`, `1`, `100`.
pub fn decade_label(exp: i32) -> String {
    if exp >= 0 {
        format!("1{}", "0".repeat(exp as usize))
    } else {
        format!("0.{}1", "0".repeat((-exp - 1) as usize))
    }
}

/// Label for a log10 axis coordinate; empty unless it sits on a decade.
pub fn log_axis_label(value: f64) -> String {
    let exp = value.round();
    if (value - exp).abs() < 1e-6 {
        decade_label(exp as i32)
    } else {
        String::new()
    }
}

/// Map a data point to log10 coordinates. Non-positive coordinates have no
/// place on a log axis and yield `None`.
pub fn to_log(x: f64, y: f64) -> Option<(f64, f64)> {
    (x > 0.0 && y > 0.0).then(|| (x.log10(), y.log10()))
}

/// Whether a data point lies inside the fixed axis limits.
pub fn in_frame(x: f64, y: f64) -> bool {
    (X_LIMITS.0..=X_LIMITS.1).contains(&x) && (Y_LIMITS.0..=Y_LIMITS.1).contains(&y)
}

/// A table as a plottable curve: z against distance in Gly, in log10
/// coordinates, dropping points a log axis cannot show.
pub fn curve_points(table: &DistanceTable) -> Vec<(f64, f64)> {
    let points: Vec<(f64, f64)> = table
        .samples()
        .filter_map(|s| to_log(s.z, mpc_to_gly(s.distance_mpc)))
        .collect();

    // The z = 0 row is always dropped.
    let dropped = table.len() - points.len();
    if dropped > 1 {
        log::warn!(
            "{}: dropped {dropped} non-positive points from log-log curve",
            table.kind.label()
        );
    }

    let clipped = table
        .samples()
        .filter(|s| s.z > 0.0 && !in_frame(s.z, mpc_to_gly(s.distance_mpc)))
        .count();
    if clipped > 0 {
        log::debug!(
            "{}: {clipped} points fall outside the axis limits",
            table.kind.label()
        );
    }
    points
}
