use eframe::egui::{Color32, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoint, PlotPoints};

use crate::color::curve_color;
use crate::figure;
use crate::state::AppState;
use crate::units::gly_to_mpc;

// ---------------------------------------------------------------------------
// Distance plot (central panel)
// ---------------------------------------------------------------------------

/// Render the log-log distance plot in the central panel.
pub fn distance_plot(ui: &mut Ui, state: &AppState) {
    let tables = match &state.tables {
        Some(t) => t,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No tables loaded  (File → Reload tables)");
            });
            return;
        }
    };

    let ((x0, x1), (y0, y1)) = figure::log_bounds();

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(figure::TITLE);
    });

    Plot::new("distance_plot")
        .legend(Legend::default())
        .x_axis_label(figure::X_LABEL)
        .y_axis_label(figure::Y_LABEL)
        .x_axis_formatter(|mark: GridMark, _range| figure::log_axis_label(mark.value))
        .y_axis_formatter(|mark: GridMark, _range| figure::log_axis_label(mark.value))
        .label_formatter(|name, value: &PlotPoint| {
            let z = 10f64.powf(value.x);
            let gly = 10f64.powf(value.y);
            let mpc = gly_to_mpc(gly);
            if name.is_empty() {
                format!("z = {z:.4}\n{gly:.4} Gly ({mpc:.1} Mpc)")
            } else {
                format!("{name}\nz = {z:.4}\n{gly:.4} Gly ({mpc:.1} Mpc)")
            }
        })
        .include_x(x0)
        .include_x(x1)
        .include_y(y0)
        .include_y(y1)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for table in tables.iter() {
                let color: Color32 = curve_color(table.kind).into();
                let points: PlotPoints = figure::curve_points(table)
                    .into_iter()
                    .map(|(x, y)| [x, y])
                    .collect();

                let line = Line::new(points)
                    .name(table.kind.label())
                    .color(color)
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}
