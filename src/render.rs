use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::color;
use crate::data::model::{Dataset, ImportanceMap};

// ---------------------------------------------------------------------------
// Raster – a plain RGBA8 pixel buffer
// ---------------------------------------------------------------------------

/// CPU-side image buffer shared by the GUI textures and the PNG export.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    /// RGBA8, row-major, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl Raster {
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Raster {
            width,
            height,
            pixels,
        }
    }

    pub fn put(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width + x) * 4;
        self.pixels[i] = rgb[0];
        self.pixels[i + 1] = rgb[1];
        self.pixels[i + 2] = rgb[2];
        self.pixels[i + 3] = 255;
    }

    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Copy `src` into this raster with its top-left corner at `(x0, y0)`.
    /// Pixels falling outside the destination are ignored.
    pub fn blit(&mut self, src: &Raster, x0: usize, y0: usize) {
        for y in 0..src.height {
            if y0 + y >= self.height {
                break;
            }
            for x in 0..src.width {
                if x0 + x >= self.width {
                    break;
                }
                self.put(x0 + x, y0 + y, src.get(x, y));
            }
        }
    }
}

/// Nearest-neighbour integer upscale.
pub fn upscale(src: &Raster, factor: usize) -> Raster {
    let mut out = Raster::filled(src.width * factor, src.height * factor, [0, 0, 0]);
    for y in 0..out.height {
        for x in 0..out.width {
            out.put(x, y, src.get(x / factor, y / factor));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Figure pieces
// ---------------------------------------------------------------------------

fn min_max(values: &[f64]) -> (f64, f64) {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

fn normalized(value: f64, min: f64, max: f64) -> f32 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        0.0
    } else {
        ((value - min) / range) as f32
    }
}

/// Render one instance as a `side x side` greyscale tile.
///
/// The image is drawn transposed: the pixel at `(x, y)` shows
/// `values[x * side + y]`. Intensity is normalized to the tile's own
/// min/max.
pub fn digit_raster(values: &[f64], side: usize) -> Raster {
    let (min, max) = min_max(values);
    let mut out = Raster::filled(side, side, [255, 255, 255]);
    for y in 0..side {
        for x in 0..side {
            let t = normalized(values[x * side + y], min, max);
            out.put(x, y, color::binary(t));
        }
    }
    out
}

/// Render a dense importance vector as a `side x side` hot-colormap tile,
/// transposed like the digit tiles.
pub fn heatmap_raster(values: &[f64], side: usize) -> Raster {
    let (min, max) = min_max(values);
    let mut out = Raster::filled(side, side, [0, 0, 0]);
    for y in 0..side {
        for x in 0..side {
            let t = normalized(values[x * side + y], min, max);
            out.put(x, y, color::hot(t));
        }
    }
    out
}

/// Vertical hot-colormap gradient, maximum at the top.
pub fn colorbar_raster(width: usize, height: usize) -> Raster {
    let mut out = Raster::filled(width, height, [0, 0, 0]);
    for y in 0..height {
        let t = if height > 1 {
            1.0 - y as f32 / (height - 1) as f32
        } else {
            1.0
        };
        let rgb = color::hot(t);
        for x in 0..width {
            out.put(x, y, rgb);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Full figure composition (headless export)
// ---------------------------------------------------------------------------

/// The figure shows a 5x5 grid of sample tiles.
pub const GRID_DIM: usize = 5;

/// Compose the full figure: a `GRID_DIM x GRID_DIM` sample grid on the
/// left, the importance heatmap plus colorbar on the right.
pub fn compose_figure(dataset: &Dataset, importance: &ImportanceMap) -> Result<Raster> {
    let side = dataset.grid_side().with_context(|| {
        format!(
            "feature count {} does not form a square pixel grid",
            dataset.features.len()
        )
    })?;
    let dense = importance.to_dense(dataset.features.len())?;

    let cell_scale = (112 / side).max(1);
    let cell = side * cell_scale;
    let grid_px = GRID_DIM * cell;

    let heat_scale = (3 * cell / side).max(1);
    let heat_px = side * heat_scale;

    const MARGIN: usize = 16;
    const GAP: usize = 32;
    const CBAR_GAP: usize = 8;
    const CBAR_W: usize = 24;

    let width = MARGIN + grid_px + GAP + heat_px + CBAR_GAP + CBAR_W + MARGIN;
    let height = MARGIN + grid_px + MARGIN;
    let mut figure = Raster::filled(width, height, [255, 255, 255]);

    for (idx, instance) in dataset
        .instances
        .iter()
        .take(GRID_DIM * GRID_DIM)
        .enumerate()
    {
        let values = instance
            .pixel_values()
            .with_context(|| format!("instance {idx}"))?;
        if values.len() != side * side {
            bail!(
                "instance {idx} has {} feature values, expected {}",
                values.len(),
                side * side
            );
        }
        let tile = upscale(&digit_raster(&values, side), cell_scale);
        let (row, col) = (idx / GRID_DIM, idx % GRID_DIM);
        figure.blit(&tile, MARGIN + col * cell, MARGIN + row * cell);
    }

    let heat = upscale(&heatmap_raster(&dense, side), heat_scale);
    let heat_x = MARGIN + grid_px + GAP;
    let heat_y = MARGIN + (grid_px.saturating_sub(heat_px)) / 2;
    figure.blit(&heat, heat_x, heat_y);

    let cbar = colorbar_raster(CBAR_W, heat_px);
    figure.blit(&cbar, heat_x + heat_px + CBAR_GAP, heat_y);

    Ok(figure)
}

/// Write a raster to a PNG file.
pub fn save_png(raster: &Raster, path: &Path) -> Result<()> {
    let img = image::RgbaImage::from_raw(
        raster.width as u32,
        raster.height as u32,
        raster.pixels.clone(),
    )
    .context("raster buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("writing figure to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Instance;
    use std::collections::BTreeMap;

    #[test]
    fn digit_tiles_are_transposed() {
        // Row-major matrix [[0, 1], [2, 3]]: the transposed tile must show
        // value 2 at (x=1, y=0) and value 1 at (x=0, y=1).
        let tile = digit_raster(&[0.0, 1.0, 2.0, 3.0], 2);
        let at_10 = tile.get(1, 0)[0]; // value 2 → t = 2/3 → light grey 85
        let at_01 = tile.get(0, 1)[0]; // value 1 → t = 1/3 → grey 170
        assert_eq!(at_10, 85);
        assert_eq!(at_01, 170);
        assert_eq!(tile.get(0, 0), [255, 255, 255]);
        assert_eq!(tile.get(1, 1), [0, 0, 0]);
    }

    #[test]
    fn constant_tile_renders_at_colormap_zero() {
        let tile = digit_raster(&[5.0, 5.0, 5.0, 5.0], 2);
        assert_eq!(tile.get(0, 0), [255, 255, 255]);
        assert_eq!(tile.get(1, 1), [255, 255, 255]);
    }

    #[test]
    fn upscale_repeats_pixels() {
        let mut src = Raster::filled(2, 1, [0, 0, 0]);
        src.put(1, 0, [255, 0, 0]);
        let scaled = upscale(&src, 3);
        assert_eq!(scaled.width, 6);
        assert_eq!(scaled.height, 3);
        assert_eq!(scaled.get(0, 0), [0, 0, 0]);
        assert_eq!(scaled.get(5, 2), [255, 0, 0]);
        assert_eq!(scaled.get(3, 1), [255, 0, 0]);
    }

    #[test]
    fn colorbar_has_max_at_top() {
        let bar = colorbar_raster(4, 16);
        assert_eq!(bar.get(0, 0), [255, 255, 255]);
        let bottom = bar.get(0, 15);
        assert!(bottom[0] < 32 && bottom[1] == 0 && bottom[2] == 0);
    }

    fn square_dataset(n_instances: usize, side: usize) -> Dataset {
        let n = side * side;
        let features: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        let instances = (0..n_instances)
            .map(|k| Instance {
                features: (0..n)
                    .map(|i| (i.to_string(), (i + k) as f64))
                    .collect::<BTreeMap<_, _>>(),
                label: "0".to_string(),
            })
            .collect();
        Dataset {
            instances,
            features,
            label: "toy".to_string(),
        }
    }

    #[test]
    fn compose_figure_accepts_fewer_than_25_instances() {
        let dataset = square_dataset(3, 3);
        let importance: ImportanceMap =
            serde_json::from_str(r#"{"0": 1.0, "4": 0.5}"#).unwrap();
        let figure = compose_figure(&dataset, &importance).unwrap();
        assert!(figure.width > figure.height);
    }

    #[test]
    fn compose_figure_rejects_non_square_feature_counts() {
        let mut dataset = square_dataset(1, 3);
        dataset.features.pop();
        let importance = ImportanceMap::default();
        assert!(compose_figure(&dataset, &importance).is_err());
    }
}
