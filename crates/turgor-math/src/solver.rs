//! Sparse direct solvers backed by `faer`.
//!
//! Two factorizations are exposed behind the [`SparseSolver`] trait:
//!
//! - [`FaerLlt`] — supernodal LLᵀ for symmetric positive-definite systems
//!   (thickness smoothing, SPD sub-problems).
//! - [`FaerLu`] — sparse LU for the optimizer's combined Jacobian, which
//!   is nonsymmetric (pressure shape-operator and rigid-group averaging
//!   terms).
//!
//! ## Workflow
//! 1. `factorize(matrix)` — converts CSR→CSC, computes symbolic + numeric
//!    factorization
//! 2. `solve(rhs, solution)` — forward/backward substitution
//! 3. Repeat `solve()` with different RHS without re-factorizing

use faer::Side;
use faer::linalg::solvers::Solve;
use faer::sparse::SparseColMat;
use faer::sparse::Triplet;
use faer::sparse::linalg::solvers::{Llt, Lu, SymbolicLlt, SymbolicLu};

use crate::sparse::CsrMatrix;
use turgor_types::Scalar;

/// Trait for sparse direct solvers.
pub trait SparseSolver {
    /// Factorize the matrix. Call once per assembled system (or after a
    /// sparsity change).
    fn factorize(&mut self, matrix: &CsrMatrix) -> Result<(), String>;

    /// Solve Ax = b using the pre-computed factorization.
    fn solve(&self, rhs: &[Scalar], solution: &mut [Scalar]) -> Result<(), String>;

    /// Returns true if the solver holds a valid factorization.
    fn is_factorized(&self) -> bool;
}

/// Convert a CSR matrix to faer's CSC representation.
fn csr_to_csc(matrix: &CsrMatrix) -> Result<SparseColMat<usize, Scalar>, String> {
    let mut triplets: Vec<Triplet<usize, usize, Scalar>> = Vec::with_capacity(matrix.values.len());
    for row in 0..matrix.rows {
        for idx in matrix.row_ptr[row]..matrix.row_ptr[row + 1] {
            triplets.push(Triplet {
                row,
                col: matrix.col_idx[idx],
                val: matrix.values[idx],
            });
        }
    }

    SparseColMat::try_new_from_triplets(matrix.rows, matrix.cols, &triplets)
        .map_err(|e| format!("Failed to construct faer CSC matrix: {e:?}"))
}

fn check_square(matrix: &CsrMatrix) -> Result<(), String> {
    if matrix.rows != matrix.cols {
        return Err(format!(
            "Matrix must be square, got {}×{}",
            matrix.rows, matrix.cols
        ));
    }
    if matrix.rows == 0 {
        return Err("Cannot factorize empty matrix".into());
    }
    Ok(())
}

fn check_dims(dimension: usize, rhs: &[Scalar], solution: &[Scalar]) -> Result<(), String> {
    if rhs.len() != dimension {
        return Err(format!(
            "RHS length ({}) != matrix dimension ({dimension})",
            rhs.len()
        ));
    }
    if solution.len() != dimension {
        return Err(format!(
            "Solution length ({}) != matrix dimension ({dimension})",
            solution.len()
        ));
    }
    Ok(())
}

/// Sparse Cholesky (LLᵀ) solver.
pub struct FaerLlt {
    /// Cached LLᵀ factorization.
    factorization: Option<Llt<usize, Scalar>>,
    /// Matrix dimension (N×N).
    dimension: usize,
}

impl FaerLlt {
    /// Creates a new solver (unfactorized).
    pub fn new() -> Self {
        Self {
            factorization: None,
            dimension: 0,
        }
    }
}

impl Default for FaerLlt {
    fn default() -> Self {
        Self::new()
    }
}

impl SparseSolver for FaerLlt {
    fn factorize(&mut self, matrix: &CsrMatrix) -> Result<(), String> {
        check_square(matrix)?;
        self.dimension = matrix.rows;

        let csc = csr_to_csc(matrix)?;

        let symbolic = SymbolicLlt::try_new(csc.symbolic().as_ref(), Side::Upper)
            .map_err(|e| format!("Symbolic analysis failed: {e:?}"))?;

        let llt = Llt::try_new_with_symbolic(symbolic, csc.as_ref(), Side::Upper)
            .map_err(|e| format!("Cholesky factorization failed: {e:?}"))?;

        self.factorization = Some(llt);
        Ok(())
    }

    fn solve(&self, rhs: &[Scalar], solution: &mut [Scalar]) -> Result<(), String> {
        let llt = self
            .factorization
            .as_ref()
            .ok_or_else(|| "Solver not factorized. Call factorize() first.".to_string())?;
        check_dims(self.dimension, rhs, solution)?;

        let rhs_mat: faer::Mat<Scalar> = faer::Mat::from_fn(self.dimension, 1, |i, _| rhs[i]);
        let sol = llt.solve(&rhs_mat);
        for i in 0..self.dimension {
            solution[i] = sol[(i, 0)];
        }
        Ok(())
    }

    fn is_factorized(&self) -> bool {
        self.factorization.is_some()
    }
}

/// Sparse LU solver for general square systems.
pub struct FaerLu {
    /// Cached LU factorization.
    factorization: Option<Lu<usize, Scalar>>,
    /// Matrix dimension (N×N).
    dimension: usize,
}

impl FaerLu {
    /// Creates a new solver (unfactorized).
    pub fn new() -> Self {
        Self {
            factorization: None,
            dimension: 0,
        }
    }
}

impl Default for FaerLu {
    fn default() -> Self {
        Self::new()
    }
}

impl SparseSolver for FaerLu {
    fn factorize(&mut self, matrix: &CsrMatrix) -> Result<(), String> {
        check_square(matrix)?;
        self.dimension = matrix.rows;

        let csc = csr_to_csc(matrix)?;

        let symbolic = SymbolicLu::try_new(csc.symbolic().as_ref())
            .map_err(|e| format!("Symbolic analysis failed: {e:?}"))?;

        let lu = Lu::try_new_with_symbolic(symbolic, csc.as_ref())
            .map_err(|e| format!("LU factorization failed: {e:?}"))?;

        self.factorization = Some(lu);
        Ok(())
    }

    fn solve(&self, rhs: &[Scalar], solution: &mut [Scalar]) -> Result<(), String> {
        let lu = self
            .factorization
            .as_ref()
            .ok_or_else(|| "Solver not factorized. Call factorize() first.".to_string())?;
        check_dims(self.dimension, rhs, solution)?;

        let rhs_mat: faer::Mat<Scalar> = faer::Mat::from_fn(self.dimension, 1, |i, _| rhs[i]);
        let sol = lu.solve(&rhs_mat);
        for i in 0..self.dimension {
            solution[i] = sol[(i, 0)];
        }
        Ok(())
    }

    fn is_factorized(&self) -> bool {
        self.factorization.is_some()
    }
}
