use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::wiring::OutputId;

/// Collapsible list of the launches plotted in a scatter output.
pub fn launch_table(ui: &mut Ui, id: OutputId, state: &AppState) {
    let Some((_, result)) = state.scatter_chart(id) else {
        return;
    };
    let records = &result.records;

    egui::CollapsingHeader::new(format!("Launches ({})", result.len()))
        .id_salt(("launch_table", id))
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if result.is_empty() {
                ui.label("No launches match the current filters.");
                return;
            }
            ui.push_id(("launch_rows", id), |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .max_scroll_height(240.0)
                    .column(Column::auto().at_least(120.0))
                    .column(Column::auto().at_least(110.0))
                    .column(Column::auto().at_least(80.0))
                    .column(Column::remainder())
                    .header(20.0, |mut header| {
                        header.col(|ui| {
                            ui.strong("Launch Site");
                        });
                        header.col(|ui| {
                            ui.strong("Payload Mass (kg)");
                        });
                        header.col(|ui| {
                            ui.strong("Booster");
                        });
                        header.col(|ui| {
                            ui.strong("Outcome");
                        });
                    })
                    .body(|body| {
                        body.rows(18.0, records.len(), |mut row| {
                            let rec = &records[row.index()];
                            row.col(|ui| {
                                ui.label(&rec.site);
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.0}", rec.payload_mass_kg));
                            });
                            row.col(|ui| {
                                ui.label(&rec.booster_version_category);
                            });
                            row.col(|ui| {
                                ui.label(rec.outcome.to_string());
                            });
                        });
                    });
            });
        });
}
