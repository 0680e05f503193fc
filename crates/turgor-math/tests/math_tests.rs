//! Integration tests for turgor-math.

use turgor_math::mat3x2::{transpose_mul, Mat3x2};
use turgor_math::sparse::CsrMatrix;
use turgor_math::vfield;
use turgor_math::{Mat2, Vec3};

// ─── Vector Field Tests ───────────────────────────────────────

#[test]
fn vfield_dot_symmetric() {
    let a = vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.5, 2.0)];
    let b = vec![Vec3::new(0.0, -1.0, 2.5), Vec3::new(3.0, 3.0, -1.0)];
    assert_eq!(vfield::dot(&a, &b), vfield::dot(&b, &a));
}

#[test]
fn vfield_dot_positive_semidefinite() {
    let a = vec![Vec3::new(1.0, -2.0, 3.0), Vec3::ZERO, Vec3::new(0.1, 0.2, -0.3)];
    assert!(vfield::dot(&a, &a) >= 0.0);
    let z = vfield::zeros(3);
    assert_eq!(vfield::dot(&z, &z), 0.0);
}

#[test]
fn vfield_axpy() {
    let x = vec![Vec3::X, Vec3::Y];
    let mut y = vec![Vec3::Z, Vec3::Z];
    vfield::axpy(2.0, &x, &mut y);
    assert_eq!(y[0], Vec3::new(2.0, 0.0, 1.0));
    assert_eq!(y[1], Vec3::new(0.0, 2.0, 1.0));
}

#[test]
fn vfield_norm_matches_dot() {
    let a = vec![Vec3::new(3.0, 4.0, 0.0)];
    assert!((vfield::norm(&a) - 5.0).abs() < 1e-12);
}

#[test]
fn vfield_flatten_selected() {
    let a = vec![Vec3::X, Vec3::Y, Vec3::Z];
    let flat = vfield::flatten_selected(&a, |i| i != 1);
    assert_eq!(flat, vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
}

// ─── Mat3x2 Tests ─────────────────────────────────────────────

#[test]
fn identity_ftf() {
    let f = Mat3x2::IDENTITY;
    let c = f.ftf();
    assert!((c.x_axis.x - 1.0).abs() < 1e-12);
    assert!(c.x_axis.y.abs() < 1e-12);
    assert!(c.y_axis.x.abs() < 1e-12);
    assert!((c.y_axis.y - 1.0).abs() < 1e-12);
}

#[test]
fn frobenius_norm_identity() {
    let f = Mat3x2::IDENTITY;
    assert!((f.frobenius_norm_sq() - 2.0).abs() < 1e-12);
}

#[test]
fn mul_mat2_identity() {
    let f = Mat3x2::from_cols(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
    let result = f.mul_mat2(Mat2::IDENTITY);
    assert_eq!(result, f);
}

#[test]
fn transpose_mul_matches_ftf() {
    let f = Mat3x2::from_cols(Vec3::new(1.0, -2.0, 0.5), Vec3::new(0.0, 3.0, 1.0));
    let c = transpose_mul(&f, &f);
    let ftf = f.ftf();
    assert!((c.x_axis.x - ftf.x_axis.x).abs() < 1e-12);
    assert!((c.y_axis.y - ftf.y_axis.y).abs() < 1e-12);
}

// ─── Sparse Matrix Tests ─────────────────────────────────────

#[test]
fn empty_csr() {
    let m = CsrMatrix::new(3, 3);
    assert_eq!(m.nnz(), 0);
    assert_eq!(m.rows, 3);
    assert_eq!(m.cols, 3);
    assert_eq!(m.row_ptr.len(), 4);
}

#[test]
fn csr_from_triplets() {
    let triplets = vec![(0, 0, 1.0), (1, 1, 1.0), (2, 2, 1.0)];
    let m = CsrMatrix::from_triplets(3, 3, &triplets);
    assert_eq!(m.nnz(), 3);
    assert_eq!(m.row_ptr, vec![0, 1, 2, 3]);
    assert_eq!(m.col_idx, vec![0, 1, 2]);
    assert_eq!(m.values, vec![1.0, 1.0, 1.0]);
}

#[test]
fn csr_from_triplets_unordered() {
    let triplets = vec![(0, 2, 3.0), (0, 0, 1.0), (0, 1, 2.0)];
    let m = CsrMatrix::from_triplets(1, 3, &triplets);
    assert_eq!(m.col_idx, vec![0, 1, 2]);
    assert_eq!(m.values, vec![1.0, 2.0, 3.0]);
}

#[test]
fn csr_duplicate_triplets_are_summed() {
    let triplets = vec![(0, 0, 1.0), (0, 0, 2.5), (1, 0, 1.0), (1, 0, -1.0)];
    let m = CsrMatrix::from_triplets(2, 1, &triplets);
    assert_eq!(m.nnz(), 2);
    assert_eq!(m.values, vec![3.5, 0.0]);
}

#[test]
fn csr_mul_vec() {
    let triplets = vec![(0, 0, 2.0), (0, 1, 1.0), (1, 1, 3.0)];
    let m = CsrMatrix::from_triplets(2, 2, &triplets);
    let y = m.mul_vec(&[1.0, 2.0]);
    assert_eq!(y, vec![4.0, 6.0]);
}

// ─── Direct Solver Tests ─────────────────────────────────────

use turgor_math::solver::{FaerLlt, FaerLu, SparseSolver};

#[test]
fn llt_identity_solve() {
    let triplets = vec![(0, 0, 1.0), (1, 1, 1.0), (2, 2, 1.0)];
    let matrix = CsrMatrix::from_triplets(3, 3, &triplets);

    let mut solver = FaerLlt::new();
    assert!(!solver.is_factorized());
    solver.factorize(&matrix).unwrap();
    assert!(solver.is_factorized());

    let rhs = [3.0, 7.0, -2.0];
    let mut sol = [0.0; 3];
    solver.solve(&rhs, &mut sol).unwrap();

    for i in 0..3 {
        assert!((sol[i] - rhs[i]).abs() < 1e-10);
    }
}

#[test]
fn llt_spd_solve_residual() {
    let triplets = vec![
        (0, 0, 4.0),
        (0, 1, 1.0),
        (1, 0, 1.0),
        (1, 1, 3.0),
        (1, 2, 1.0),
        (2, 1, 1.0),
        (2, 2, 2.0),
    ];
    let matrix = CsrMatrix::from_triplets(3, 3, &triplets);

    let mut solver = FaerLlt::new();
    solver.factorize(&matrix).unwrap();

    let rhs = [1.0, 2.0, 3.0];
    let mut sol = [0.0; 3];
    solver.solve(&rhs, &mut sol).unwrap();

    let ax = matrix.mul_vec(&sol);
    for i in 0..3 {
        assert!((ax[i] - rhs[i]).abs() < 1e-9, "residual[{i}] = {}", ax[i] - rhs[i]);
    }
}

#[test]
fn lu_nonsymmetric_solve() {
    // A deliberately nonsymmetric system — what the optimizer assembles.
    let triplets = vec![
        (0, 0, 2.0),
        (0, 1, 1.0),
        (1, 0, -1.0),
        (1, 1, 3.0),
        (1, 2, 0.5),
        (2, 2, 1.5),
    ];
    let matrix = CsrMatrix::from_triplets(3, 3, &triplets);

    let mut solver = FaerLu::new();
    solver.factorize(&matrix).unwrap();

    let rhs = [1.0, -2.0, 3.0];
    let mut sol = [0.0; 3];
    solver.solve(&rhs, &mut sol).unwrap();

    let ax = matrix.mul_vec(&sol);
    for i in 0..3 {
        assert!((ax[i] - rhs[i]).abs() < 1e-9);
    }
}

#[test]
fn lu_factorize_then_multi_solve() {
    let triplets = vec![(0, 0, 2.0), (1, 1, 3.0), (2, 2, 5.0)];
    let matrix = CsrMatrix::from_triplets(3, 3, &triplets);

    let mut solver = FaerLu::new();
    solver.factorize(&matrix).unwrap();

    let mut sol = [0.0; 3];
    solver.solve(&[4.0, 9.0, 25.0], &mut sol).unwrap();
    assert!((sol[0] - 2.0).abs() < 1e-10);
    assert!((sol[1] - 3.0).abs() < 1e-10);
    assert!((sol[2] - 5.0).abs() < 1e-10);

    solver.solve(&[1.0, 1.0, 1.0], &mut sol).unwrap();
    assert!((sol[0] - 0.5).abs() < 1e-10);
}

#[test]
fn solve_before_factorize_is_error() {
    let solver = FaerLu::new();
    let mut sol = [0.0; 2];
    assert!(solver.solve(&[1.0, 1.0], &mut sol).is_err());
}

#[test]
fn non_square_rejected() {
    let matrix = CsrMatrix::from_triplets(2, 3, &[(0, 0, 1.0)]);
    let mut solver = FaerLlt::new();
    assert!(solver.factorize(&matrix).is_err());
}
