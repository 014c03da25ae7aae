use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use eframe::egui;

use datalens::app::DatalensApp;
use datalens::data::loader;
use datalens::render;
use datalens::state::AppState;

/// View a normalized dataset document: a grid of sample digits next to the
/// per-pixel importance heatmap. With `--save`, render the figure to a PNG
/// instead of opening a window.
#[derive(Parser)]
#[command(name = "datalens", version)]
struct Args {
    /// Dataset document (<name>.json) to open on startup
    dataset: Option<PathBuf>,

    /// Importance document to open on startup
    importance: Option<PathBuf>,

    /// Render the figure to this PNG file and exit
    #[arg(long, value_name = "PNG")]
    save: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(out) = args.save {
        let (Some(dataset_path), Some(importance_path)) = (args.dataset, args.importance) else {
            bail!("--save needs both a dataset and an importance file");
        };
        let dataset = loader::load_dataset(&dataset_path)?;
        let importance = loader::load_importance(&importance_path)?;
        let figure = render::compose_figure(&dataset, &importance)?;
        render::save_png(&figure, &out)?;
        log::info!("Wrote figure to {}", out.display());
        return Ok(());
    }

    let mut state = AppState::default();
    if let Some(path) = &args.dataset {
        state.set_dataset(loader::load_dataset(path)?);
    }
    if let Some(path) = &args.importance {
        state.set_importance(loader::load_importance(path)?);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 720.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Datalens – Dataset Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(DatalensApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
