use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::generate_palette;
use crate::data::loader;
use crate::render;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_dataset_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open importance…").clicked() {
                open_importance_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            let can_save = state.heatmap_raster.is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("Save figure…"))
                .clicked()
            {
                save_figure_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} · {} instances · {} features ({s}×{s})",
                ds.label,
                ds.instances.len(),
                ds.features.len(),
                s = state.grid_side,
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – dataset summary
// ---------------------------------------------------------------------------

/// Render the left summary panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Dataset");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong(dataset.label.as_str());
            ui.label(format!("{} instances", dataset.instances.len()));
            ui.label(format!(
                "{} features ({s}×{s} pixels)",
                dataset.features.len(),
                s = state.grid_side,
            ));
            ui.separator();

            let swatches = generate_palette(state.label_counts.len());
            let header = format!("Labels  ({})", state.label_counts.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for ((label, count), color) in
                        state.label_counts.iter().zip(swatches.into_iter())
                    {
                        ui.horizontal(|ui: &mut Ui| {
                            ui.label(RichText::new("■").color(color));
                            ui.label(format!("{label}  ({count})"));
                        });
                    }
                });

            ui.separator();
            ui.strong("Importance");
            match state.importance_range {
                Some((min, max)) => {
                    ui.label(format!("min {min:.4}"));
                    ui.label(format!("max {max:.4}"));
                }
                None => {
                    ui.label("No importance map loaded.");
                }
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_dataset_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset document")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_dataset(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded dataset '{}' with {} instances",
                    dataset.label,
                    dataset.instances.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn open_importance_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open importance map")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_importance(&path) {
            Ok(importance) => {
                log::info!("Loaded importance map with {} entries", importance.0.len());
                state.set_importance(importance);
            }
            Err(e) => {
                log::error!("Failed to load importance map: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn save_figure_dialog(state: &mut AppState) {
    let (Some(dataset), Some(importance)) = (&state.dataset, &state.importance) else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Save figure")
        .set_file_name(format!("{}_figure.png", dataset.label))
        .add_filter("PNG", &["png"])
        .save_file();

    if let Some(path) = file {
        let result = render::compose_figure(dataset, importance)
            .and_then(|figure| render::save_png(&figure, &path));
        match result {
            Ok(()) => log::info!("Saved figure to {}", path.display()),
            Err(e) => {
                log::error!("Failed to save figure: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
