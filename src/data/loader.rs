use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{Dataset, ImportanceMap};

// ---------------------------------------------------------------------------
// Document loading (viewer side)
// ---------------------------------------------------------------------------

/// Load a dataset document written by the normalizer.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading dataset file {}", path.display()))?;
    let dataset: Dataset = serde_json::from_str(&text).context("parsing dataset JSON")?;

    if dataset.instances.is_empty() {
        bail!("dataset '{}' contains no instances", dataset.label);
    }

    Ok(dataset)
}

/// Load a per-pixel importance document.
pub fn load_importance(path: &Path) -> Result<ImportanceMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading importance file {}", path.display()))?;
    serde_json::from_str(&text).context("parsing importance JSON")
}
