use std::path::{Path, PathBuf};

use super::model::Dataset;
use super::normalize::Result;

// ---------------------------------------------------------------------------
// Output writer
// ---------------------------------------------------------------------------

/// Write `<name>.json` and `<name>_labels.json` into `out_dir`, where
/// `name` is the dataset's own name. Returns the two paths in that order.
///
/// Both files are produced only after normalization fully succeeded; a
/// coercion failure upstream means nothing is written. The two writes are
/// still sequential, not transactional as a pair.
pub fn write_outputs(
    dataset: &Dataset,
    encoded_labels: &[usize],
    out_dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    let data_path = out_dir.join(format!("{}.json", dataset.label));
    let labels_path = out_dir.join(format!("{}_labels.json", dataset.label));

    std::fs::write(&data_path, serde_json::to_string(dataset)?)?;
    std::fs::write(&labels_path, serde_json::to_string(&encoded_labels)?)?;

    Ok((data_path, labels_path))
}
