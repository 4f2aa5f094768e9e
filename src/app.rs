use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::model::LaunchDataset;
use crate::state::AppState;
use crate::ui::{self, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(config: DashboardConfig, dataset: LaunchDataset) -> Self {
        Self {
            state: AppState::new(config, dataset),
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: the dashboard page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui::render_layout(ui, &mut self.state);
                });
        });
    }
}
