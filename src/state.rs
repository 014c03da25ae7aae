use std::collections::BTreeMap;

use eframe::egui;

use crate::data::model::{Dataset, ImportanceMap};
use crate::render::{self, Raster};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// Loaded importance map (None until user loads a file).
    pub importance: Option<ImportanceMap>,

    /// Side length of the square pixel grid for the loaded dataset.
    pub grid_side: usize,

    /// Pre-rendered tiles for the sample grid (first 25 instances).
    pub digit_rasters: Vec<Raster>,

    /// Group label of each sampled instance, for hover text.
    pub digit_labels: Vec<String>,

    /// Pre-rendered importance heatmap (needs dataset + importance).
    pub heatmap_raster: Option<Raster>,

    /// Min/max of the dense importance vector, for the colorbar readout.
    pub importance_range: Option<(f64, f64)>,

    /// Instances per distinct label, sorted by label.
    pub label_counts: Vec<(String, usize)>,

    /// GPU textures, created lazily once an egui context is available.
    pub digit_textures: Vec<egui::TextureHandle>,
    pub heatmap_texture: Option<egui::TextureHandle>,
    pub colorbar_texture: Option<egui::TextureHandle>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            importance: None,
            grid_side: 0,
            digit_rasters: Vec::new(),
            digit_labels: Vec::new(),
            heatmap_raster: None,
            importance_range: None,
            label_counts: Vec::new(),
            digit_textures: Vec::new(),
            heatmap_texture: None,
            colorbar_texture: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: derive the pixel grid, pre-render the
    /// sample tiles, and tally labels.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let side = match dataset.grid_side() {
            Some(side) => side,
            None => {
                self.status_message = Some(format!(
                    "Error: feature count {} does not form a square pixel grid",
                    dataset.features.len()
                ));
                return;
            }
        };

        let sample_len = dataset
            .instances
            .len()
            .min(render::GRID_DIM * render::GRID_DIM);
        let mut rasters = Vec::with_capacity(sample_len);
        let mut labels = Vec::with_capacity(sample_len);
        for (idx, instance) in dataset.instances[..sample_len].iter().enumerate() {
            match instance.pixel_values() {
                Ok(values) if values.len() == side * side => {
                    rasters.push(render::digit_raster(&values, side));
                    labels.push(instance.label.clone());
                }
                Ok(values) => {
                    self.status_message = Some(format!(
                        "Error: instance {idx} has {} feature values, expected {}",
                        values.len(),
                        side * side
                    ));
                    return;
                }
                Err(e) => {
                    self.status_message = Some(format!("Error: {e:#}"));
                    return;
                }
            }
        }

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for instance in &dataset.instances {
            *counts.entry(instance.label.clone()).or_default() += 1;
        }

        self.grid_side = side;
        self.digit_rasters = rasters;
        self.digit_labels = labels;
        self.label_counts = counts.into_iter().collect();
        self.digit_textures.clear();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.rebuild_heatmap();
    }

    /// Ingest a newly loaded importance map.
    pub fn set_importance(&mut self, importance: ImportanceMap) {
        self.importance = Some(importance);
        self.status_message = None;
        self.rebuild_heatmap();
    }

    /// Recompute the heatmap raster from the current dataset + importance.
    pub fn rebuild_heatmap(&mut self) {
        self.heatmap_raster = None;
        self.heatmap_texture = None;
        self.importance_range = None;

        let (Some(dataset), Some(importance)) = (&self.dataset, &self.importance) else {
            return;
        };

        match importance.to_dense(dataset.features.len()) {
            Ok(dense) => {
                let min = dense.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = dense.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                self.importance_range = Some((min, max));
                self.heatmap_raster = Some(render::heatmap_raster(&dense, self.grid_side));
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
