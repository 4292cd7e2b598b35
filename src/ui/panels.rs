use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::format::TableFormat;
use crate::data::model::DistanceKind;
use crate::state::AppState;
use crate::units::mpc_to_gly;

// ---------------------------------------------------------------------------
// Left side panel – cosmology, probe, sample table
// ---------------------------------------------------------------------------

/// Render the left information panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Cosmology");
    ui.separator();

    let p = state.config.cosmology;
    egui::Grid::new("cosmology_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Ωm0");
            ui.label(format!("{}", p.omega_m_0));
            ui.end_row();
            ui.label("ΩΛ");
            ui.label(format!("{}", p.omega_lambda_0));
            ui.end_row();
            ui.label("Ωk0");
            ui.label(format!("{}", p.omega_k_0));
            ui.end_row();
            ui.label("h");
            ui.label(format!("{}", p.h));
            ui.end_row();
        });

    let g = state.config.grid;
    ui.label(format!(
        "z ∈ [{}, {}) step {}  ({} points)",
        g.start,
        g.stop,
        g.step,
        g.len()
    ));
    ui.add_space(8.0);

    // ---- Redshift probe ----
    ui.strong("Distance at z");
    let mut z = state.probe_z;
    let response = ui.add(
        egui::DragValue::new(&mut z)
            .range(0.0..=1.0e4)
            .speed(0.01)
            .max_decimals(4),
    );
    if response.changed() {
        state.set_probe_z(z);
    }
    match &state.probe {
        Ok(reading) => {
            ui.label(format!("E(z) = {:.4}", reading.hubble_ratio));
            for (kind, mpc) in [
                (DistanceKind::AngularDiameter, reading.angular_mpc),
                (DistanceKind::Comoving, reading.comoving_mpc),
            ] {
                ui.label(format!(
                    "{}: {mpc:.2} Mpc  ({:.4} Gly)",
                    kind.label(),
                    mpc_to_gly(mpc)
                ));
            }
        }
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
    }
    ui.separator();

    // ---- Sample table ----
    let Some(tables) = state.tables.as_ref().filter(|t| !t.is_empty()) else {
        ui.label("No tables loaded.");
        return;
    };

    ui.strong(format!("Samples ({})", tables.len()));
    let row_height = ui.text_style_height(&egui::TextStyle::Body);
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder().at_least(80.0))
        .header(row_height + 4.0, |mut header| {
            header.col(|ui| {
                ui.strong("z");
            });
            header.col(|ui| {
                ui.strong("D_A [Mpc]");
            });
            header.col(|ui| {
                ui.strong("D_C [Mpc]");
            });
        })
        .body(|body| {
            body.rows(row_height, tables.len(), |mut row| {
                let idx = row.index();
                let (Some(a), Some(c)) = (tables.angular.get(idx), tables.comoving.get(idx))
                else {
                    return;
                };
                row.col(|ui| {
                    ui.label(format!("{:.1}", a.z));
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", a.distance_mpc));
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", c.distance_mpc));
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload tables").clicked() {
                report(state, "reload tables", |s| s.reload());
                ui.close_menu();
            }
            ui.separator();
            for kind in DistanceKind::ALL {
                if ui.button(format!("Open {} table…", kind.label())).clicked() {
                    open_table_dialog(state, kind);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("Export figure…").clicked() {
                export_figure_dialog(state);
                ui.close_menu();
            }
            ui.menu_button("Export tables", |ui: &mut Ui| {
                for format in TableFormat::ALL {
                    if ui.button(format!("{format}…")).clicked() {
                        export_tables_dialog(state, format);
                        ui.close_menu();
                    }
                }
            });
        });

        ui.separator();

        if let Some(tables) = &state.tables {
            ui.label(format!("{} samples per table", tables.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

const TABLE_EXTENSIONS: [&str; 6] = ["txt", "dat", "csv", "json", "parquet", "pq"];

pub fn open_table_dialog(state: &mut AppState, kind: DistanceKind) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Open {} table", kind.label()))
        .add_filter("Distance tables", &TABLE_EXTENSIONS)
        .pick_file();

    if let Some(path) = file {
        report(state, "open table", |s| s.open_table(kind, &path));
    }
}

pub fn export_figure_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export figure")
        .add_filter("PDF", &["pdf"])
        .add_filter("SVG", &["svg"])
        .set_file_name(state.config.output.figure_name.as_str())
        .save_file();

    if let Some(path) = file {
        report(state, "export figure", |s| s.export_figure(&path));
    }
}

pub fn export_tables_dialog(state: &mut AppState, format: TableFormat) {
    let dir = rfd::FileDialog::new()
        .set_title(format!("Export tables as {format}"))
        .pick_folder();

    if let Some(dir) = dir {
        report(state, "export tables", |s| {
            let written = s.export_tables(&dir, format)?;
            log::info!("Exported {written:?}");
            Ok(())
        });
    }
}

/// Run a UI action; failures are logged and shown in the status bar.
fn report(
    state: &mut AppState,
    what: &str,
    action: impl FnOnce(&mut AppState) -> anyhow::Result<()>,
) {
    match action(state) {
        Ok(()) => state.status_message = None,
        Err(e) => {
            log::error!("Failed to {what}: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
