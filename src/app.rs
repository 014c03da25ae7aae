use eframe::egui;

use crate::state::AppState;
use crate::ui::{figure, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DatalensApp {
    pub state: AppState,
}

impl DatalensApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl Default for DatalensApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for DatalensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dataset summary ----
        egui::SidePanel::left("summary_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: sample grid + heatmap ----
        egui::CentralPanel::default().show(ctx, |ui| {
            figure::figure_view(ui, &mut self.state);
        });
    }
}
