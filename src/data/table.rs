use std::collections::BTreeSet;
use std::path::Path;

use super::normalize::{NormalizeError, Result};

// ---------------------------------------------------------------------------
// RawTable – a headerless 2D grid of string cells
// ---------------------------------------------------------------------------

/// A rectangular table of string cells with no header semantics.
///
/// Row and column deletion always interprets indices against the *original*
/// pre-deletion table, applied simultaneously; deleting row 2 never turns
/// row 3 into row 2 halfway through.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Read a headerless CSV file into a table.
    ///
    /// Every record must have the same number of fields; the `csv` crate
    /// rejects ragged input for us.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        Ok(RawTable { rows })
    }

    /// Build a table from rows already in memory. Rows must be rectangular.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        RawTable { rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Delete the given 1-based row and column indices, all measured in the
    /// original index space of this table.
    pub fn drop_rows_and_cols(
        &mut self,
        rows: &BTreeSet<usize>,
        cols: &BTreeSet<usize>,
    ) -> Result<()> {
        for &r in rows {
            if r == 0 || r > self.n_rows() {
                return Err(NormalizeError::Index {
                    axis: "row",
                    index: r,
                    len: self.n_rows(),
                });
            }
        }
        for &c in cols {
            if c == 0 || c > self.n_cols() {
                return Err(NormalizeError::Index {
                    axis: "column",
                    index: c,
                    len: self.n_cols(),
                });
            }
        }

        let mut kept = Vec::with_capacity(self.rows.len().saturating_sub(rows.len()));
        for (i, row) in self.rows.drain(..).enumerate() {
            if rows.contains(&(i + 1)) {
                continue;
            }
            let row: Vec<String> = row
                .into_iter()
                .enumerate()
                .filter(|(j, _)| !cols.contains(&(j + 1)))
                .map(|(_, cell)| cell)
                .collect();
            kept.push(row);
        }
        self.rows = kept;
        Ok(())
    }

    /// Flip rows and columns in place.
    pub fn transpose(&mut self) {
        let n_cols = self.n_cols();
        let mut transposed: Vec<Vec<String>> = (0..n_cols)
            .map(|_| Vec::with_capacity(self.rows.len()))
            .collect();
        for row in self.rows.drain(..) {
            for (j, cell) in row.into_iter().enumerate() {
                transposed[j].push(cell);
            }
        }
        self.rows = transposed;
    }

    /// Remove the column at the given 0-based index and return its cells,
    /// top to bottom.
    pub fn take_column(&mut self, idx: usize) -> Vec<String> {
        self.rows.iter_mut().map(|row| row.remove(idx)).collect()
    }

    /// Remove the row at the given 0-based index and return its cells.
    pub fn take_row(&mut self, idx: usize) -> Vec<String> {
        self.rows.remove(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cells: &[&[&str]]) -> RawTable {
        RawTable::from_rows(
            cells
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn set(indices: &[usize]) -> BTreeSet<usize> {
        indices.iter().copied().collect()
    }

    #[test]
    fn deletion_uses_original_indices_simultaneously() {
        let mut t = grid(&[
            &["a1", "a2", "a3", "a4"],
            &["b1", "b2", "b3", "b4"],
            &["c1", "c2", "c3", "c4"],
            &["d1", "d2", "d3", "d4"],
        ]);
        // Rows 1 and 3 go together: row 3 means the original "c" row even
        // though deleting row 1 shifts everything up.
        t.drop_rows_and_cols(&set(&[1, 3]), &set(&[2])).unwrap();
        assert_eq!(
            t.rows(),
            &[
                vec!["b1".to_string(), "b3".to_string(), "b4".to_string()],
                vec!["d1".to_string(), "d3".to_string(), "d4".to_string()],
            ]
        );
    }

    #[test]
    fn deletion_out_of_range_is_an_index_error() {
        let mut t = grid(&[&["a", "b"], &["c", "d"]]);
        let err = t.drop_rows_and_cols(&set(&[3]), &set(&[])).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::Index { axis: "row", index: 3, len: 2 }
        ));

        let err = t.drop_rows_and_cols(&set(&[]), &set(&[0])).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::Index { axis: "column", index: 0, .. }
        ));
    }

    #[test]
    fn transpose_flips_rows_and_columns() {
        let mut t = grid(&[&["a", "b", "c"], &["d", "e", "f"]]);
        t.transpose();
        assert_eq!(t.n_rows(), 3);
        assert_eq!(t.n_cols(), 2);
        assert_eq!(t.rows()[0], vec!["a".to_string(), "d".to_string()]);
        assert_eq!(t.rows()[2], vec!["c".to_string(), "f".to_string()]);
    }

    #[test]
    fn take_column_and_row_remove_and_return() {
        let mut t = grid(&[&["a", "b"], &["c", "d"], &["e", "f"]]);
        let col = t.take_column(1);
        assert_eq!(col, vec!["b".to_string(), "d".to_string(), "f".to_string()]);
        assert_eq!(t.n_cols(), 1);

        let row = t.take_row(0);
        assert_eq!(row, vec!["a".to_string()]);
        assert_eq!(t.n_rows(), 2);
    }
}
