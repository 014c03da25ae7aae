use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::encode::LabelEncoder;
use super::model::{Dataset, Instance};
use super::table::RawTable;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced while normalizing a raw table into a dataset document.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A malformed caller-supplied value outside the table itself.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// A row or column index points outside the table.
    #[error("{axis} index {index} is out of range for a table with {len} {axis}s")]
    Index {
        axis: &'static str,
        index: usize,
        len: usize,
    },

    /// A cell that must hold a number does not.
    #[error("cannot convert value '{value}' to float at row {row}")]
    DataFormat { value: String, row: usize },

    /// The requested extraction cannot work on this table shape.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The input file could not be parsed as CSV.
    #[error("failed to read table: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How to interpret the raw table.
///
/// `irrelevant_rows` / `irrelevant_cols` are 1-based indices into the
/// original, pre-orientation table. `feature_index` (a row) and
/// `group_index` (a column) are 1-based positions in the table *after*
/// deletion and orientation; the two address different axes, so they may
/// carry the same value (their intersection is exactly one cell).
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// When true, columns are features and rows are instances already;
    /// when false, the table is transposed first.
    pub columns_are_features: bool,
    pub irrelevant_cols: BTreeSet<usize>,
    pub irrelevant_rows: BTreeSet<usize>,
    pub feature_index: usize,
    pub group_index: usize,
}

// ---------------------------------------------------------------------------
// Option-value parsing (shared with the CLI surface)
// ---------------------------------------------------------------------------

/// Parse the orientation flag: case-insensitive `"true"` / `"false"` only.
pub fn parse_flag(s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(NormalizeError::Argument(format!(
            "boolean value expected, got '{s}'"
        ))),
    }
}

/// Parse a comma-separated list of 1-based indices; a blank string is the
/// empty set.
pub fn parse_index_set(s: &str) -> Result<BTreeSet<usize>> {
    if s.trim().is_empty() {
        return Ok(BTreeSet::new());
    }
    s.split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<usize>().map_err(|_| {
                NormalizeError::Argument(format!("'{token}' is not a valid 1-based index"))
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// The transformation
// ---------------------------------------------------------------------------

/// Normalize a raw table into a dataset document plus encoded labels.
///
/// Steps, in order:
/// 1. delete irrelevant rows, then columns (original index space)
/// 2. transpose unless columns are already features
/// 3. pull the group column out as the raw label sequence
/// 4. pull the feature row out as the feature-name sequence (the group
///    cell is already gone, so names align 1:1 with remaining columns)
/// 5. drop the first label, the feature-row/group-column intersection
///    slot, which is not a data row
/// 6. coerce every remaining cell to `f64`, zipping positionally against
///    the feature names
///
/// Feature names are expected to be unique: a duplicate name overwrites
/// the earlier entry in the per-instance map and the last value wins, so
/// callers must deduplicate names upstream.
pub fn normalize(
    mut table: RawTable,
    opts: &NormalizeOptions,
    dataset_name: &str,
) -> Result<(Dataset, Vec<usize>)> {
    if table.n_rows() == 0 || table.n_cols() == 0 {
        return Err(NormalizeError::Configuration(
            "input table is empty".to_string(),
        ));
    }

    table.drop_rows_and_cols(&opts.irrelevant_rows, &opts.irrelevant_cols)?;

    if !opts.columns_are_features {
        table.transpose();
    }

    if opts.group_index == 0 || opts.group_index > table.n_cols() {
        return Err(NormalizeError::Index {
            axis: "column",
            index: opts.group_index,
            len: table.n_cols(),
        });
    }
    if opts.feature_index == 0 || opts.feature_index > table.n_rows() {
        return Err(NormalizeError::Index {
            axis: "row",
            index: opts.feature_index,
            len: table.n_rows(),
        });
    }
    if table.n_rows() < 2 || table.n_cols() < 2 {
        return Err(NormalizeError::Configuration(format!(
            "table of {} rows x {} columns cannot yield both a data row and a feature column",
            table.n_rows(),
            table.n_cols()
        )));
    }

    let mut labels = table.take_column(opts.group_index - 1);
    let features = table.take_row(opts.feature_index - 1);

    // The first label slot is the intersection with the feature row; the
    // first remaining data row is label index 0 from here on.
    labels.remove(0);

    let mut instances = Vec::with_capacity(table.n_rows());
    for (idx, row) in table.rows().iter().enumerate() {
        let mut feature_map = BTreeMap::new();
        for (name, cell) in features.iter().zip(row.iter()) {
            let value: f64 = cell.trim().parse().map_err(|_| NormalizeError::DataFormat {
                value: cell.clone(),
                row: idx + 1,
            })?;
            feature_map.insert(name.clone(), value);
        }
        instances.push(Instance {
            features: feature_map,
            label: labels[idx].clone(),
        });
    }

    let encoder = LabelEncoder::fit(&labels);
    let encoded = encoder.transform(&labels)?;

    let dataset = Dataset {
        instances,
        features,
        label: dataset_name.to_string(),
    };

    Ok((dataset, encoded))
}
