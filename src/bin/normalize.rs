use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use datalens::data::normalize::{self, NormalizeOptions};
use datalens::data::output::write_outputs;
use datalens::data::table::RawTable;

/// Convert a raw CSV table into a labeled-instance dataset document
/// (`<name>.json`) plus an integer-encoded label array
/// (`<name>_labels.json`).
#[derive(Parser)]
#[command(name = "normalize", version)]
struct Args {
    /// Path to the CSV file
    filepath: PathBuf,

    /// "true" when columns are features (rows are instances); "false" when
    /// the table must be transposed first
    #[arg(value_parser = parse_bool_flag, action = clap::ArgAction::Set)]
    col_features: bool,

    /// Comma-separated 1-based column indices to delete ("" for none)
    #[arg(value_parser = parse_index_list)]
    irrelevant_cols: IndexList,

    /// Comma-separated 1-based row indices to delete ("" for none)
    #[arg(value_parser = parse_index_list)]
    irrelevant_rows: IndexList,

    /// 1-based index of the row holding feature names, after deletions
    feature_index: usize,

    /// 1-based index of the column holding group labels, after deletions
    group_index: usize,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
struct IndexList(BTreeSet<usize>);

/// Case-insensitive "true" / "false"; anything else is a usage error,
/// raised before any file is touched.
fn parse_bool_flag(s: &str) -> Result<bool, String> {
    normalize::parse_flag(s).map_err(|e| e.to_string())
}

/// "1,4, 7" → {1, 4, 7}; an empty or blank string is the empty set.
fn parse_index_list(s: &str) -> Result<IndexList, String> {
    normalize::parse_index_set(s)
        .map(IndexList)
        .map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let dataset_name = args
        .filepath
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("cannot derive a dataset name from {}", args.filepath.display()))?
        .to_string();

    let table = RawTable::from_csv_path(&args.filepath)
        .with_context(|| format!("loading {}", args.filepath.display()))?;
    log::info!(
        "Read {} rows x {} columns from {}",
        table.n_rows(),
        table.n_cols(),
        args.filepath.display()
    );

    let options = NormalizeOptions {
        columns_are_features: args.col_features,
        irrelevant_cols: args.irrelevant_cols.0,
        irrelevant_rows: args.irrelevant_rows.0,
        feature_index: args.feature_index,
        group_index: args.group_index,
    };

    let (dataset, encoded) = normalize::normalize(table, &options, &dataset_name)?;

    let out_dir = match args.out_dir {
        Some(dir) => dir,
        None => args
            .filepath
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let (data_path, labels_path) = write_outputs(&dataset, &encoded, &out_dir)?;

    println!(
        "Wrote {} instances with {} features to {} and {}",
        dataset.instances.len(),
        dataset.features.len(),
        data_path.display(),
        labels_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_bool_fails_argument_parsing_before_io() {
        // A path that does not exist: parsing must fail on the flag, not on
        // the missing file.
        let result = Args::try_parse_from([
            "normalize",
            "/nonexistent/input.csv",
            "maybe",
            "",
            "",
            "1",
            "1",
        ]);
        assert!(result.is_err());
    }
}
