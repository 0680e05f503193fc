//! Sparse matrix representation.
//!
//! Provides a CSR (Compressed Sparse Row) matrix assembled from
//! triplets. The optimizer scatters per-element stiffness blocks as
//! triplets and hands the assembled matrix to a direct solver.

use serde::{Deserialize, Serialize};
use turgor_types::Scalar;

/// Compressed Sparse Row (CSR) matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row pointer array (length = rows + 1).
    /// `row_ptr[i]..row_ptr[i+1]` are the indices into `col_idx` and `values`
    /// for non-zeros in row `i`.
    pub row_ptr: Vec<usize>,
    /// Column indices of non-zero entries.
    pub col_idx: Vec<usize>,
    /// Non-zero values.
    pub values: Vec<Scalar>,
}

impl CsrMatrix {
    /// Creates an empty CSR matrix with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_ptr: vec![0; rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Creates a CSR matrix from triplets (row, col, value).
    ///
    /// Duplicate entries are summed, which is what element-block
    /// scattering relies on.
    pub fn from_triplets(rows: usize, cols: usize, triplets: &[(usize, usize, Scalar)]) -> Self {
        // Count entries per row
        let mut row_counts = vec![0usize; rows];
        for &(r, _, _) in triplets {
            row_counts[r] += 1;
        }

        let mut row_ptr = vec![0usize; rows + 1];
        for i in 0..rows {
            row_ptr[i + 1] = row_ptr[i] + row_counts[i];
        }

        let nnz = row_ptr[rows];
        let mut col_idx = vec![0usize; nnz];
        let mut values = vec![0.0; nnz];

        // Fill in — use a cursor per row
        let mut cursor = row_ptr[..rows].to_vec();
        for &(r, c, v) in triplets {
            let pos = cursor[r];
            col_idx[pos] = c;
            values[pos] = v;
            cursor[r] += 1;
        }

        // Sort each row by column index, then merge duplicates
        let mut merged_ptr = vec![0usize; rows + 1];
        let mut merged_cols = Vec::with_capacity(nnz);
        let mut merged_vals = Vec::with_capacity(nnz);

        for i in 0..rows {
            let start = row_ptr[i];
            let end = row_ptr[i + 1];
            let slice = &mut col_idx[start..end];
            let val_slice = &mut values[start..end];

            // Insertion sort — rows are short
            for j in 1..slice.len() {
                let mut k = j;
                while k > 0 && slice[k - 1] > slice[k] {
                    slice.swap(k - 1, k);
                    val_slice.swap(k - 1, k);
                    k -= 1;
                }
            }

            let mut j = 0;
            while j < slice.len() {
                let col = slice[j];
                let mut sum = val_slice[j];
                j += 1;
                while j < slice.len() && slice[j] == col {
                    sum += val_slice[j];
                    j += 1;
                }
                merged_cols.push(col);
                merged_vals.push(sum);
            }
            merged_ptr[i + 1] = merged_cols.len();
        }

        Self {
            rows,
            cols,
            row_ptr: merged_ptr,
            col_idx: merged_cols,
            values: merged_vals,
        }
    }

    /// Dense mat-vec `y = A·x` (used by residual checks and tests).
    pub fn mul_vec(&self, x: &[Scalar]) -> Vec<Scalar> {
        debug_assert_eq!(x.len(), self.cols);
        let mut y = vec![0.0; self.rows];
        for i in 0..self.rows {
            let mut acc = 0.0;
            for idx in self.row_ptr[i]..self.row_ptr[i + 1] {
                acc += self.values[idx] * x[self.col_idx[idx]];
            }
            y[i] = acc;
        }
        y
    }
}
