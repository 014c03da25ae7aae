use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Instance / Dataset – the normalized document model
// ---------------------------------------------------------------------------

/// One labeled instance: feature name → value, plus its group label.
///
/// Field names are capitalized on the wire; downstream consumers of the
/// JSON documents key on `Instance` / `Features` / `Label` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(rename = "Features")]
    pub features: BTreeMap<String, f64>,
    #[serde(rename = "Label")]
    pub label: String,
}

/// The full dataset document: ordered instances, the feature-name vector,
/// and the dataset name (stored in `Label`, distinct from the per-instance
/// group labels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(rename = "Instance")]
    pub instances: Vec<Instance>,
    #[serde(rename = "Features")]
    pub features: Vec<String>,
    #[serde(rename = "Label")]
    pub label: String,
}

impl Instance {
    /// Feature values ordered by their keys *as integers*, for datasets
    /// whose feature names are string-encoded pixel indices.
    pub fn pixel_values(&self) -> Result<Vec<f64>> {
        let mut indexed: Vec<(usize, f64)> = Vec::with_capacity(self.features.len());
        for (key, &value) in &self.features {
            let idx: usize = key
                .parse()
                .with_context(|| format!("feature name '{key}' is not a pixel index"))?;
            indexed.push((idx, value));
        }
        indexed.sort_by_key(|&(idx, _)| idx);
        Ok(indexed.into_iter().map(|(_, v)| v).collect())
    }
}

impl Dataset {
    /// Side length of the square pixel grid, if the feature count is a
    /// perfect square.
    pub fn grid_side(&self) -> Option<usize> {
        square_side(self.features.len())
    }
}

/// Integer square root check: `Some(s)` when `n == s * s` and `n > 0`.
pub fn square_side(n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let s = (n as f64).sqrt().round() as usize;
    (s * s == n).then_some(s)
}

// ---------------------------------------------------------------------------
// ImportanceMap – pixel index (as string) → importance value
// ---------------------------------------------------------------------------

/// The per-pixel importance document produced by the downstream feature
/// selection: `{"42": 0.173, ...}`. Pixels absent from the map have zero
/// importance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportanceMap(pub BTreeMap<String, f64>);

impl ImportanceMap {
    /// Expand into a dense vector of `len` values, zero-filled.
    pub fn to_dense(&self, len: usize) -> Result<Vec<f64>> {
        let mut dense = vec![0.0; len];
        for (key, &value) in &self.0 {
            let idx: usize = key
                .parse()
                .with_context(|| format!("importance key '{key}' is not a pixel index"))?;
            if idx >= len {
                bail!("pixel index {idx} is out of range for {len} features");
            }
            dense[idx] = value;
        }
        Ok(dense)
    }
}
