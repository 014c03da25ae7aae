use eframe::egui::{self, TextureOptions, Ui};
use egui_plot::{Plot, PlotImage, PlotPoint};

use crate::render::{self, Raster};
use crate::state::AppState;

/// Displayed size of one sample tile, in points.
const CELL: f32 = 96.0;

/// Displayed size of the heatmap plot, in points.
const HEATMAP: f32 = 360.0;

// ---------------------------------------------------------------------------
// Central panel: sample grid + importance heatmap
// ---------------------------------------------------------------------------

/// Render the figure in the central panel.
pub fn figure_view(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to view samples  (File → Open dataset…)");
        });
        return;
    }

    ensure_textures(ui.ctx(), state);

    ui.horizontal_top(|ui: &mut Ui| {
        digit_grid(ui, state);
        ui.separator();
        heatmap_view(ui, state);
    });
}

fn digit_grid(ui: &mut Ui, state: &AppState) {
    egui::Grid::new("digit_grid")
        .spacing([2.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            for (i, texture) in state.digit_textures.iter().enumerate() {
                let tile = egui::Image::new(egui::load::SizedTexture::new(
                    texture.id(),
                    egui::vec2(CELL, CELL),
                ));
                ui.add(tile)
                    .on_hover_text(format!("label: {}", state.digit_labels[i]));
                if (i + 1) % render::GRID_DIM == 0 {
                    ui.end_row();
                }
            }
        });
}

fn heatmap_view(ui: &mut Ui, state: &AppState) {
    let Some(heatmap) = &state.heatmap_texture else {
        ui.vertical(|ui: &mut Ui| {
            ui.label("Open an importance map to view the heatmap.");
        });
        return;
    };

    let side = state.grid_side as f64;

    ui.vertical(|ui: &mut Ui| {
        ui.strong("Feature importance");
        ui.horizontal_top(|ui: &mut Ui| {
            Plot::new("importance_heatmap")
                .data_aspect(1.0)
                .show_axes(false)
                .show_grid(false)
                .allow_boxed_zoom(true)
                .allow_drag(true)
                .allow_scroll(true)
                .allow_zoom(true)
                .width(HEATMAP)
                .height(HEATMAP)
                .show(ui, |plot_ui| {
                    plot_ui.image(PlotImage::new(
                        heatmap.id(),
                        PlotPoint::new(side / 2.0, side / 2.0),
                        egui::vec2(side as f32, side as f32),
                    ));
                });

            if let Some(colorbar) = &state.colorbar_texture {
                ui.add(egui::Image::new(egui::load::SizedTexture::new(
                    colorbar.id(),
                    egui::vec2(24.0, HEATMAP),
                )));
                ui.vertical(|ui: &mut Ui| {
                    ui.label("Very important");
                    ui.add_space(HEATMAP - 48.0);
                    ui.label("Not important");
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Texture management
// ---------------------------------------------------------------------------

/// Create any missing GPU textures from the pre-rendered rasters. Tiles use
/// nearest filtering so individual pixels stay crisp when scaled up.
fn ensure_textures(ctx: &egui::Context, state: &mut AppState) {
    if state.digit_textures.len() != state.digit_rasters.len() {
        state.digit_textures = state
            .digit_rasters
            .iter()
            .enumerate()
            .map(|(i, raster)| {
                ctx.load_texture(
                    format!("digit_{i}"),
                    color_image(raster),
                    TextureOptions::NEAREST,
                )
            })
            .collect();
    }

    if state.heatmap_texture.is_none() {
        if let Some(raster) = &state.heatmap_raster {
            state.heatmap_texture = Some(ctx.load_texture(
                "importance_heatmap",
                color_image(raster),
                TextureOptions::NEAREST,
            ));
        }
    }

    if state.colorbar_texture.is_none() && state.heatmap_raster.is_some() {
        let bar = render::colorbar_raster(24, 256);
        state.colorbar_texture = Some(ctx.load_texture(
            "importance_colorbar",
            color_image(&bar),
            TextureOptions::LINEAR,
        ));
    }
}

fn color_image(raster: &Raster) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied([raster.width, raster.height], &raster.pixels)
}
