use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

use crate::data::model::DistanceKind;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Hue of the first curve; blue, then evenly spaced around the wheel.
const BASE_HUE: f32 = 210.0;

/// An sRGB colour usable by both the egui plot and the SVG renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<CurveColor> for Color32 {
    fn from(c: CurveColor) -> Self {
        Color32::from_rgb(c.r, c.g, c.b)
    }
}

impl From<CurveColor> for RGBColor {
    fn from(c: CurveColor) -> Self {
        RGBColor(c.r, c.g, c.b)
    }
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<CurveColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (BASE_HUE + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            CurveColor {
                r: (rgb.red * 255.0) as u8,
                g: (rgb.green * 255.0) as u8,
                b: (rgb.blue * 255.0) as u8,
            }
        })
        .collect()
}

/// Fixed colour for each distance curve.
pub fn curve_color(kind: DistanceKind) -> CurveColor {
    let palette = generate_palette(DistanceKind::ALL.len());
    let idx = DistanceKind::ALL
        .iter()
        .position(|&k| k == kind)
        .unwrap_or_default();
    palette[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn curves_get_distinct_colors() {
        let a = curve_color(DistanceKind::AngularDiameter);
        let c = curve_color(DistanceKind::Comoving);
        assert_ne!(a, c);
        // first curve is blue-dominant
        assert!(a.b > a.r);
    }

    #[test]
    fn converts_to_both_backends() {
        let c = CurveColor { r: 1, g: 2, b: 3 };
        assert_eq!(Color32::from(c), Color32::from_rgb(1, 2, 3));
        let RGBColor(r, g, b) = RGBColor::from(c);
        assert_eq!((r, g, b), (1, 2, 3));
    }
}
